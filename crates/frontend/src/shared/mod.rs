pub mod api_utils;
pub mod club_context;
pub mod format;
pub mod icons;
pub mod page_frame;

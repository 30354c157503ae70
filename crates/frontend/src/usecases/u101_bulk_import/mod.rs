pub mod api;
pub mod flow;
pub mod view;

pub use view::{PlayerCsvImport, TeamCsvImport};

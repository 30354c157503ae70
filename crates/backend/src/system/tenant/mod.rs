pub mod extractor;

pub use extractor::ClubContext;

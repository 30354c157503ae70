pub mod aggregate;

pub use aggregate::{Player, PlayerId};

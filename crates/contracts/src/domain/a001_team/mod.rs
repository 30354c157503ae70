pub mod aggregate;

pub use aggregate::{Team, TeamId};

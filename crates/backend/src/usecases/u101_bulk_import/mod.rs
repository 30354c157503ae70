pub mod csv_reader;
pub mod executor;
pub mod roster;
pub mod service;
pub mod store;
pub mod validator;

pub use store::{DbRosterStore, RosterStore};

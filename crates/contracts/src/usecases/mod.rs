pub mod common;
pub mod u101_bulk_import;

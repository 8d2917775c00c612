//! Parsing for the benchmark harness epoch log.

pub mod parse;
pub mod row;

pub use parse::parse_epoch_file;
pub use row::EpochRecord;

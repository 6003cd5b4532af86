//! CSV reading utilities.

mod reader;

pub use reader::{RawTable, read_raw_table, read_source};

//! Defines the training/test table and a reader for it.

mod table_struct;
mod reader;

pub use table_struct::Table;
pub use reader::TableReader;

//! Table file persistence, memory-mapped views, and sorting.

pub mod mmap_table;
pub mod sorter;
pub mod table_file;

pub use mmap_table::{ReadTable, WriteTable};
pub use sorter::{binary_search_first, sort_by_end};
pub use table_file::TableFile;

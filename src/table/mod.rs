pub mod reader;
pub mod row_table;
pub mod writer;

pub use reader::{FileReader, ReadError, StreamReader, TableReader};
pub use row_table::{RowTable, TableError};
pub use writer::{FileWriter, StreamWriter, TableWriter, WriteError};

//! CSV reading utilities.

mod raw;
mod reader;

pub use raw::RawTable;
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_columns,
    read_csv_table,
    validate_encoding,
};

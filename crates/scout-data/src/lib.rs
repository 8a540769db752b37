//! Flat-file I/O for the record browser
//!
//! Reading and writing is always whole-file: the store is loaded once at
//! session start and written back wholesale on explicit save. There is
//! no streaming and no partial persistence.

pub mod csv_io;
pub mod export;

use thiserror::Error;

// Re-exports
pub use csv_io::{read_rows, read_rows_from_bytes, write_rows};
pub use export::export_csv;

/// Errors that can occur in file operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}

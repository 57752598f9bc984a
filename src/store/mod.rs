//! Record Store Module
//!
//! In-memory customer working set mirrored to a CSV file on every mutation.

mod record_file;
mod store;


use thiserror::Error;

use crate::error::AppError;

// Re-export public types
pub use record_file::{read_customers, write_customers, HEADER};
pub use store::CustomerStore;

// == Store Error ==
/// Failures while reading or writing the backing file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row without exactly five columns
    #[error("malformed row at line {line}: expected 5 fields, found {found}")]
    Malformed { line: u64, found: usize },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::internal("Store operation failed", err)
    }
}

use std::path::PathBuf;

use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// The dataset file does not exist
    #[error("Dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Error while reading the dataset file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),

    /// Two source columns normalize to the same name
    #[error("Duplicate column after normalization: {0}")]
    DuplicateColumn(String),

    /// A column the dashboard cannot work without is absent
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

impl From<polars::error::PolarsError> for ComputeError {
    fn from(error: polars::error::PolarsError) -> Self {
        let compute_error = match error {
            polars::error::PolarsError::NoData(_) => {
                ComputeError::DataFrame(format!("No data: {}", error))
            }
            polars::error::PolarsError::ShapeMismatch(_) => {
                ComputeError::DataFrame(format!("Shape mismatch: {}", error))
            }
            polars::error::PolarsError::SchemaMismatch(_) => {
                ComputeError::DataFrame(format!("Schema mismatch: {}", error))
            }
            polars::error::PolarsError::ComputeError(_) => {
                ComputeError::DataFrame(format!("Compute error: {}", error))
            }
            polars::error::PolarsError::IO { .. } => {
                ComputeError::DataFrame(format!("Read error: {}", error))
            }
            _ => ComputeError::DataFrame(error.to_string()),
        };
        error!(?compute_error, "DataFrame error");
        compute_error
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;

use thiserror::Error;

/// Error types for Chebyshev spectral operations.
///
/// Every variant is a configuration or contract error. Numerical conditions
/// (ill-conditioned or non-smooth input) are never reported as errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChebError {
    /// Grid size, domain bounds or filter parameters are not acceptable
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// No session is active
    #[error("no active session; call init first")]
    NotInitialized,
    /// A session is already active and must be cleaned up first
    #[error("a session is already active; call cleanup first")]
    AlreadyInitialized,
    /// Collocation index outside `[0, n)`
    #[error("index {index} out of range for grid of {n} points")]
    IndexOutOfRange { index: usize, n: usize },
    /// Buffer length does not match the grid size
    #[error("buffer length {actual} does not match grid size {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    /// Evaluation point outside the configured interval
    #[error("point {x} lies outside the domain [{lower}, {upper}]")]
    OutOfDomain { x: f64, lower: f64, upper: f64 },
    /// A sample file holds a field that is not a number
    #[error("line {line}: column '{column}' holds '{value}', expected a number")]
    InvalidSample {
        line: u64,
        column: String,
        value: String,
    },
    /// Reading or writing sample files failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<csv::Error> for ChebError {
    fn from(err: csv::Error) -> Self {
        ChebError::Io(err.to_string())
    }
}

impl From<std::io::Error> for ChebError {
    fn from(err: std::io::Error) -> Self {
        ChebError::Io(err.to_string())
    }
}

/// Result type for Chebyshev spectral operations
pub type Result<T> = std::result::Result<T, ChebError>;

/// Fails with [`ChebError::SizeMismatch`] unless `actual == expected`.
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(ChebError::SizeMismatch { expected, actual });
    }
    Ok(())
}

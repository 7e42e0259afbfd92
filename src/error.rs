use thiserror::Error;

/// Error type returned by the comparison kernel.
///
/// No kind is retried inside the core; a failed call leaves no partial
/// mutation visible to the caller.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid parameters supplied before any allocation happened.
    #[error("parameter error: {0}")]
    Parameter(String),

    /// Unknown magic, unsupported version, or truncated buffer on load.
    #[error("format error: {0}")]
    Format(String),

    /// Out-of-range or inverted sub-sequence / sub-region extraction.
    #[error("bounds error: {0}")]
    Bounds(String),

    /// I/O failure at the sequence-load or serialize boundary.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

use std::fmt;

/// Result type for sleepmerge-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Channel descriptor violates its scaling invariants
    InvalidChannel { label: String, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidChannel { label, reason } => {
                write!(f, "Invalid channel '{}': {}", label, reason)
            }
        }
    }
}

impl std::error::Error for Error {}

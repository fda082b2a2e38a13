use std::fmt;

/// Result type for sleepmerge-profiles operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the profiles layer
#[derive(Debug)]
pub enum Error {
    /// Reading the export directory failed
    Directory(sleepmerge_core::Error),

    /// Reconciliation failed
    Engine(sleepmerge_engine::Error),

    /// No profile registered under this name
    UnknownProfile(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Directory(err) => write!(f, "Directory error: {}", err),
            Error::Engine(err) => write!(f, "Reconciliation error: {}", err),
            Error::UnknownProfile(name) => write!(f, "Unknown profile: {}", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Directory(err) => Some(err),
            Error::Engine(err) => Some(err),
            Error::UnknownProfile(_) => None,
        }
    }
}

impl From<sleepmerge_core::Error> for Error {
    fn from(err: sleepmerge_core::Error) -> Self {
        Error::Directory(err)
    }
}

impl From<sleepmerge_engine::Error> for Error {
    fn from(err: sleepmerge_engine::Error) -> Self {
        Error::Engine(err)
    }
}

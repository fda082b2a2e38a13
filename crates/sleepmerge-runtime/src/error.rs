use std::fmt;

/// Result type for sleepmerge-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// No enabled profile accepts the directory
    NoCompatibleProfile,

    /// The detected profile found no usable session
    NoSessions { profile: String },

    /// Profile layer error (directory access, reconciliation, unknown profile)
    Profile(sleepmerge_profiles::Error),

    /// Encoding the merged output failed
    Codec(anyhow::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoCompatibleProfile => write!(f, "No compatible device profile for this directory"),
            Error::NoSessions { profile } => write!(f, "No sessions found ({})", profile),
            Error::Profile(err) => write!(f, "Profile error: {}", err),
            Error::Codec(err) => write!(f, "Codec error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Profile(err) => Some(err),
            Error::Codec(err) => Some(err.as_ref()),
            Error::Io(err) => Some(err),
            Error::NoCompatibleProfile | Error::NoSessions { .. } | Error::Config(_) => None,
        }
    }
}

impl From<sleepmerge_profiles::Error> for Error {
    fn from(err: sleepmerge_profiles::Error) -> Self {
        Error::Profile(err)
    }
}

impl From<sleepmerge_core::Error> for Error {
    fn from(err: sleepmerge_core::Error) -> Self {
        match err {
            sleepmerge_core::Error::Io(err) => Error::Io(err),
            sleepmerge_core::Error::Config(msg) => Error::Config(msg),
            other => Error::Profile(sleepmerge_profiles::Error::Directory(other)),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

use chrono::NaiveDateTime;
use std::fmt;

/// Result type for sleepmerge-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconciling a session
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A file declares a record duration other than the profile's fixed one
    RecordDurationMismatch {
        path: String,
        expected_ms: i64,
        found_ms: i64,
    },

    /// No decoded file overlaps the session's declared bounds
    NoOverlappingData {
        session_start: NaiveDateTime,
        session_end: NaiveDateTime,
    },

    /// Candidate files overlap the session but not each other for a full record
    EmptyWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RecordDurationMismatch {
                path,
                expected_ms,
                found_ms,
            } => write!(
                f,
                "Record duration mismatch in {}: expected {} ms, found {} ms",
                path, expected_ms, found_ms
            ),
            Error::NoOverlappingData {
                session_start,
                session_end,
            } => write!(
                f,
                "No overlapping data between {} and {}",
                session_start, session_end
            ),
            Error::EmptyWindow { start, end } => {
                write!(f, "Aligned window is empty ({} .. {})", start, end)
            }
        }
    }
}

impl std::error::Error for Error {}

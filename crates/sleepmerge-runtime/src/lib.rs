//! Profile facade: detection, sorted session listing, loading and export.

pub mod client;
pub mod config;
pub mod error;

pub use client::{Scan, SleepMerge};
pub use config::{Config, ProfileConfig};
pub use error::{Error, Result};

// Re-exported so callers need only this crate for the common path.
pub use sleepmerge_core::{ExportDirectory, FsDirectory, MemoryDirectory, SignalCodec};
pub use sleepmerge_types::{Session, SignalFile};

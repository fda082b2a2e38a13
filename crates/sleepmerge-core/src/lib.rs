//! Seams to the collaborators the reconciliation core does not own:
//! the export directory, the container codec and the progress callback.

pub mod codec;
pub mod directory;
pub mod error;
pub mod path;
pub mod progress;

pub use codec::SignalCodec;
pub use directory::{ExportDirectory, FsDirectory, MemoryDirectory};
pub use error::{Error, Result};
pub use path::{expand_tilde, resolve_workspace_path};
pub use progress::{Progress, ProgressFn};

// Engine module - reconciliation core (interval index, alignment, selection, extraction)
// This layer sits between decoded files (types) and the device profiles

pub mod annotations;
mod error;
pub mod extract;
pub mod interval;
pub mod labels;
pub mod postprocess;
pub mod quirks;
mod reconcile;
pub mod record;
pub mod select;
pub mod stitch;
pub mod window;

pub use error::{Error, Result};
pub use interval::IntervalIndex;
pub use labels::{LabelTable, canonicalize, canonicalize_label, is_housekeeping};
pub use postprocess::drop_unfitted_sensors;
pub use quirks::QuirkPolicy;
pub use reconcile::{ANONYMOUS_PATIENT, reconcile};
pub use record::{FileRecord, RecordContext};
pub use window::{AlignedWindow, align_window};

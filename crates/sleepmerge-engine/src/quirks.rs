//! Vendor deviations from nominal file semantics.
//!
//! Each quirk is a small standalone policy function; profiles opt in through
//! [`QuirkPolicy`] so the shared reconciliation path never branches on vendor.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sleepmerge_types::{Annotation, SignalHeader};

/// Quirks a device profile declares for its files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuirkPolicy {
    /// Annotation onsets mark the end of the event rather than its start
    pub onset_marks_event_end: bool,
    /// Discontinuous files end at the session's declared end
    pub discontinuous_ends_at_session_end: bool,
}

impl QuirkPolicy {
    pub const NONE: QuirkPolicy = QuirkPolicy {
        onset_marks_event_end: false,
        discontinuous_ends_at_session_end: false,
    };

    pub fn apply_to_annotation(&self, annotation: Annotation) -> Annotation {
        if self.onset_marks_event_end {
            onset_from_event_end(annotation)
        } else {
            annotation
        }
    }

    pub fn file_end(
        &self,
        header: &SignalHeader,
        computed_end: NaiveDateTime,
        session_end: NaiveDateTime,
    ) -> NaiveDateTime {
        if self.discontinuous_ends_at_session_end {
            discontinuous_end(header, computed_end, session_end)
        } else {
            computed_end
        }
    }
}

/// Move an end-stamped annotation back to its start: `onset - duration`, floored at zero.
pub fn onset_from_event_end(annotation: Annotation) -> Annotation {
    let shift = annotation.duration.unwrap_or(0.0);
    Annotation {
        onset: (annotation.onset - shift).max(0.0),
        ..annotation
    }
}

/// A discontinuous file's trailing record offset cannot be trusted; it runs to the session end.
pub fn discontinuous_end(
    header: &SignalHeader,
    computed_end: NaiveDateTime,
    session_end: NaiveDateTime,
) -> NaiveDateTime {
    if header.is_discontinuous() {
        session_end
    } else {
        computed_end
    }
}

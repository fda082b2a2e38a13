use sleepmerge_types::{Annotation, add_millis, millis_between, seconds_to_millis};

use crate::record::FileRecord;
use crate::window::AlignedWindow;

/// Re-base every candidate annotation falling inside the window onto the window start.
///
/// `onset' = onset + (file_start - window_start) / 1000`. Annotations whose
/// absolute time lies outside `[window.start, window.end]`, or beyond the
/// representable time range, are dropped. The
/// result is ordered by onset, keeping candidate order for equal onsets.
pub fn retime_annotations(candidates: &[&FileRecord], window: &AlignedWindow) -> Vec<Annotation> {
    let mut retimed = Vec::new();

    for record in candidates {
        let shift_seconds = millis_between(window.start, record.start) as f64 / 1000.0;
        for annotation in &record.annotations {
            if !annotation.onset.is_finite() {
                continue;
            }
            let Some(absolute) = add_millis(record.start, seconds_to_millis(annotation.onset)) else {
                tracing::debug!(path = %record.path, onset = annotation.onset, "Dropping annotation with unrepresentable onset");
                continue;
            };
            if !window.contains(absolute) {
                continue;
            }
            retimed.push(Annotation {
                onset: annotation.onset + shift_seconds,
                ..annotation.clone()
            });
        }
    }

    retimed.sort_by(|a, b| a.onset.total_cmp(&b.onset));
    retimed
}

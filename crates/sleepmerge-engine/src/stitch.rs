//! Joining of back-to-back segments into a single record.
//!
//! A device that splits one recording across consecutive files (for example on
//! an hourly boundary) produces segments with an identical channel layout where
//! each segment starts exactly where the previous one ended. Candidates of a
//! session are joined so the merged channel comes from one contiguous source.

use sleepmerge_types::millis_between;

use crate::record::FileRecord;

/// Join every chain of exactly abutting, layout-identical records.
///
/// A joined record takes the position of its earliest-inserted member. Records
/// that overlap, leave a gap, or whose arrays do not fill their declared records
/// are left alone.
pub fn stitch_contiguous(records: Vec<FileRecord>) -> Vec<FileRecord> {
    let mut out: Vec<FileRecord> = Vec::with_capacity(records.len());
    for record in records {
        push_or_join(&mut out, record);
    }
    out
}

fn push_or_join(out: &mut Vec<FileRecord>, record: FileRecord) {
    let mut current = record;
    let mut position = out.len();

    while let Some(index) = out.iter().position(|r| abuts(r, &current) || abuts(&current, r)) {
        let other = out.remove(index);
        if index < position {
            position = index;
        } else {
            position = position.min(out.len());
        }
        current = if abuts(&other, &current) {
            join(other, current)
        } else {
            join(current, other)
        };
    }

    position = position.min(out.len());
    out.insert(position, current);
}

/// `next` continues `prev` with no gap and no overlap.
fn abuts(prev: &FileRecord, next: &FileRecord) -> bool {
    prev.end == next.start && prev.same_layout(next) && is_packed(prev) && is_packed(next)
}

/// Records are back to back and every array holds exactly its declared samples.
fn is_packed(record: &FileRecord) -> bool {
    record.record_count.checked_mul(record.record_duration_ms) == Some(record.duration_ms())
        && record
            .channels
            .iter()
            .zip(&record.samples)
            .all(|(c, s)| record.record_count.checked_mul(c.samples_per_record as i64) == Some(s.len() as i64))
}

fn join(mut prev: FileRecord, next: FileRecord) -> FileRecord {
    let shift_seconds = millis_between(prev.start, next.start) as f64 / 1000.0;

    tracing::debug!(first = %prev.path, second = %next.path, "Joining contiguous segments");

    for (ours, theirs) in prev.samples.iter_mut().zip(next.samples) {
        ours.extend(theirs);
    }
    prev.annotations.extend(
        next.annotations
            .into_iter()
            .map(|mut a| {
                a.onset += shift_seconds;
                a
            })
            .filter(|a| a.onset.is_finite()),
    );
    prev.record_count = prev.record_count.saturating_add(next.record_count);
    prev.end = next.end;
    prev.path = format!("{}+{}", prev.path, next.path);
    prev
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use sleepmerge_types::{Annotation, ChannelDescriptor, add_millis};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap()
    }

    fn segment(path: &str, offset_s: i64, records: i64, label: &str, base: f64) -> FileRecord {
        let spr = 3;
        let start = add_millis(t0(), offset_s * 1000).unwrap();
        FileRecord {
            path: path.to_string(),
            start,
            end: add_millis(start, records * 60_000).unwrap(),
            record_duration_ms: 60_000,
            record_count: records,
            channels: vec![ChannelDescriptor {
                label: label.to_string(),
                transducer: String::new(),
                physical_dimension: String::new(),
                physical_min: 0.0,
                physical_max: 100.0,
                digital_min: 0,
                digital_max: 100,
                prefilter: String::new(),
                samples_per_record: spr,
                reserved: String::new(),
            }],
            samples: vec![vec![base; (records as usize) * spr]],
            annotations: vec![Annotation::new(30.0, None, path)],
        }
    }

    #[test]
    fn test_chain_is_joined_in_order() {
        let records = vec![
            segment("a", 0, 2, "Flow", 1.0),
            segment("b", 120, 2, "Flow", 2.0),
            segment("c", 240, 1, "Flow", 3.0),
        ];
        let out = stitch_contiguous(records);
        assert_eq!(out.len(), 1);
        let joined = &out[0];
        assert_eq!(joined.record_count, 5);
        assert_eq!(joined.end, add_millis(t0(), 300_000).unwrap());
        assert_eq!(joined.samples[0].len(), 15);
        assert_eq!(&joined.samples[0][5..7], &[1.0, 2.0]);
        let onsets: Vec<f64> = joined.annotations.iter().map(|a| a.onset).collect();
        assert_eq!(onsets, vec![30.0, 150.0, 270.0]);
    }

    #[test]
    fn test_out_of_order_middle_segment_closes_chain() {
        let records = vec![
            segment("a", 0, 1, "Flow", 1.0),
            segment("c", 120, 1, "Flow", 3.0),
            segment("b", 60, 1, "Flow", 2.0),
        ];
        let out = stitch_contiguous(records);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].samples[0], vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_gap_overlap_and_layout_change_are_not_joined() {
        let records = vec![
            segment("a", 0, 1, "Flow", 1.0),
            segment("gap", 120, 1, "Flow", 2.0),
            segment("overlap", 150, 1, "Flow", 3.0),
            segment("other", 60, 1, "Pressure", 4.0),
        ];
        let out = stitch_contiguous(records);
        assert_eq!(out.len(), 4);
        let paths: Vec<&str> = out.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "gap", "overlap", "other"]);
    }

    #[test]
    fn test_short_arrays_are_not_joined() {
        let mut a = segment("a", 0, 1, "Flow", 1.0);
        a.samples[0].pop();
        let b = segment("b", 60, 1, "Flow", 2.0);
        assert_eq!(stitch_contiguous(vec![a, b]).len(), 2);
    }

    #[test]
    fn test_non_finite_onsets_are_not_carried_over() {
        let a = segment("a", 0, 1, "Flow", 1.0);
        let mut b = segment("b", 60, 1, "Flow", 2.0);
        b.annotations.push(Annotation::new(f64::INFINITY, None, "garbage"));
        let out = stitch_contiguous(vec![a, b]);
        assert_eq!(out.len(), 1);
        let descriptions: Vec<&str> = out[0].annotations.iter().map(|a| a.description.as_str()).collect();
        assert_eq!(descriptions, vec!["a", "b"]);
    }
}

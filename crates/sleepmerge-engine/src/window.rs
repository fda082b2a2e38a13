use chrono::NaiveDateTime;
use sleepmerge_types::{add_millis, millis_between};

/// Time range covered by every candidate, truncated to whole records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub record_duration_ms: i64,
}

impl AlignedWindow {
    pub fn duration_ms(&self) -> i64 {
        millis_between(self.start, self.end)
    }

    /// Less than one full record survives alignment.
    pub fn is_empty(&self) -> bool {
        self.duration_ms() <= 0
    }

    /// `ceil(duration / record duration)`; zero for an empty window.
    pub fn record_count(&self) -> i64 {
        let duration = self.duration_ms();
        if duration <= 0 || self.record_duration_ms <= 0 {
            return 0;
        }
        (duration + self.record_duration_ms - 1) / self.record_duration_ms
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Intersect candidate spans and truncate the end down to a record boundary
/// measured from the window start.
///
/// Returns `None` when there are no spans. When the spans do not mutually
/// overlap the result is an empty window ending at the earliest span end.
pub fn align_window<I>(spans: I, record_duration_ms: i64) -> Option<AlignedWindow>
where
    I: IntoIterator<Item = (NaiveDateTime, NaiveDateTime)>,
{
    let mut spans = spans.into_iter();
    let (mut start, mut raw_end) = spans.next()?;
    for (s, e) in spans {
        start = start.max(s);
        raw_end = raw_end.min(e);
    }

    let span_ms = millis_between(start, raw_end);
    let end = if span_ms > 0 && record_duration_ms > 0 {
        add_millis(raw_end, -(span_ms % record_duration_ms))?
    } else {
        raw_end
    };

    Some(AlignedWindow {
        start,
        end,
        record_duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_window_is_intersection_truncated_to_records() {
        let spans = vec![(at(22, 0, 0), at(23, 0, 30)), (at(22, 0, 10), at(23, 30, 0))];
        let window = align_window(spans, 60_000).unwrap();
        assert_eq!(window.start, at(22, 0, 10));
        assert_eq!(window.end, at(23, 0, 10));
        assert_eq!(window.duration_ms() % 60_000, 0);
        assert_eq!(window.record_count(), 60);
    }

    #[test]
    fn test_pairwise_window_bounds() {
        // Sweep offsets so window bounds are checked across many alignments
        for offset_s in 0..180u32 {
            let a = (at(22, 0, 0), at(23, 0, 0));
            let b_start = at(22, 0, 0) + chrono::Duration::seconds(offset_s as i64);
            let b = (b_start, at(23, 10, 7));
            let window = align_window(vec![a, b], 60_000).unwrap();
            assert!(window.start >= a.0.max(b.0));
            assert!(window.end <= a.1.min(b.1));
            assert_eq!(window.duration_ms().rem_euclid(60_000), 0);
        }
    }

    #[test]
    fn test_no_spans_yields_none() {
        assert!(align_window(Vec::new(), 60_000).is_none());
    }

    #[test]
    fn test_disjoint_spans_yield_empty_window() {
        let spans = vec![(at(22, 0, 0), at(22, 30, 0)), (at(23, 0, 0), at(23, 30, 0))];
        let window = align_window(spans, 60_000).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.record_count(), 0);
    }

    #[test]
    fn test_sub_record_overlap_is_empty() {
        let spans = vec![(at(22, 0, 0), at(22, 30, 0)), (at(22, 29, 30), at(23, 0, 0))];
        let window = align_window(spans, 60_000).unwrap();
        assert!(window.is_empty());
    }
}

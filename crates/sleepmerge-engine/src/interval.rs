use chrono::NaiveDateTime;

/// Closed `[start, end]` spans with overlap queries.
///
/// Sessions carry tens of files at most, so entries live in insertion order and
/// queries scan linearly; results keep insertion order, which callers rely on
/// for first-inserted-wins tie breaking.
#[derive(Debug, Clone)]
pub struct IntervalIndex<T> {
    entries: Vec<(NaiveDateTime, NaiveDateTime, T)>,
}

impl<T> Default for IntervalIndex<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> IntervalIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, start: NaiveDateTime, end: NaiveDateTime, value: T) {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        self.entries.push((start, end, value));
    }

    /// Consume the index, keeping values whose span shares at least one
    /// instant with `[start, end]`, in insertion order.
    pub fn into_overlapping(self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<T> {
        self.entries
            .into_iter()
            .filter(|(s, e, _)| *s <= end && *e >= start)
            .map(|(_, _, value)| value)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn evening() -> IntervalIndex<&'static str> {
        let mut index = IntervalIndex::new();
        index.insert(at(20), at(21), "evening");
        index.insert(at(22), at(23), "late");
        index.insert(at(21), at(22), "middle");
        index
    }

    #[test]
    fn test_overlap_query_keeps_insertion_order() {
        assert_eq!(evening().into_overlapping(at(21), at(22)), vec!["evening", "late", "middle"]);
        assert_eq!(evening().into_overlapping(at(22), at(23)), vec!["late", "middle"]);
        assert!(evening().into_overlapping(at(10), at(11)).is_empty());
    }

    #[test]
    fn test_touching_spans_overlap() {
        let mut index = IntervalIndex::new();
        index.insert(at(20), at(21), 1);
        assert_eq!(index.into_overlapping(at(21), at(22)), vec![1]);
    }

    #[test]
    fn test_inverted_insert_is_normalized() {
        let mut index = IntervalIndex::new();
        index.insert(at(23), at(21), 7);
        assert_eq!(index.into_overlapping(at(22), at(22)), vec![7]);
    }
}

use chrono::NaiveDateTime;
use sleepmerge_types::millis_between;

use crate::select::ChannelSelection;
use crate::window::AlignedWindow;

/// `[start, end)` sample indices of `window` inside a file starting at `file_start`.
///
/// `start = floor(offset(window.start) * rate)`, `end = ceil(offset(window.end) * rate)`
/// with `rate = samples_per_record / record_duration_ms`, computed in integers so
/// grid-aligned boundaries land exactly.
pub fn sample_range(
    file_start: NaiveDateTime,
    samples_per_record: usize,
    record_duration_ms: i64,
    window: &AlignedWindow,
) -> (usize, usize) {
    if record_duration_ms <= 0 {
        return (0, 0);
    }
    let spr = samples_per_record as i128;
    let rec = record_duration_ms as i128;

    let from = millis_between(file_start, window.start).max(0) as i128;
    let to = millis_between(file_start, window.end).max(0) as i128;

    let start = (from * spr).div_euclid(rec);
    let end = (to * spr + rec - 1).div_euclid(rec);
    (start as usize, end.max(start) as usize)
}

/// Copy `values[start..end]`, clamped to the array.
pub fn slice_clamped(values: &[f64], start: usize, end: usize) -> Vec<f64> {
    let end = end.min(values.len());
    let start = start.min(end);
    values[start..end].to_vec()
}

/// Truncate or pad to exactly `len` samples; padding repeats the last sample (or 0.0).
pub fn fit_to_length(mut values: Vec<f64>, len: usize) -> Vec<f64> {
    if values.len() > len {
        values.truncate(len);
    } else if values.len() < len {
        let fill = values.last().copied().unwrap_or(0.0);
        values.resize(len, fill);
    }
    values
}

/// Extract the selected channel's samples for the window, sized to the nominal
/// `record_count * samples_per_record`.
pub fn extract_channel(selection: &ChannelSelection<'_>, window: &AlignedWindow) -> Vec<f64> {
    let record = selection.record;
    let spr = selection.samples_per_record();
    let values = &record.samples[selection.channel];

    let (start, end) = sample_range(record.start, spr, record.record_duration_ms, window);
    if end > values.len() {
        tracing::warn!(
            path = %record.path,
            label = selection.label(),
            wanted = end,
            available = values.len(),
            "Channel shorter than its declared span; clamping"
        );
    }

    let nominal = window.record_count() as usize * spr;
    fit_to_length(slice_clamped(values, start, end), nominal)
}

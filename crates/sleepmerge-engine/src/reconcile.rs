use chrono::NaiveDateTime;
use sleepmerge_types::{CONTINUOUS_TAG, SignalFile, SignalHeader};

use crate::annotations::retime_annotations;
use crate::extract::extract_channel;
use crate::interval::IntervalIndex;
use crate::record::FileRecord;
use crate::select::select_channels;
use crate::stitch::stitch_contiguous;
use crate::window::{AlignedWindow, align_window};
use crate::{Error, Result};

/// Patient field of merged output (anonymized).
pub const ANONYMOUS_PATIENT: &str = "X X X X";

/// Merge a session's file records into one record-aligned signal file.
///
/// Only records overlapping `[session_start, session_end]` take part, and only
/// those are stitched together. Each output channel is copied from exactly one
/// (possibly stitched) record: the one with the highest samples-per-record for
/// that label.
pub fn reconcile(
    records: Vec<FileRecord>,
    session_start: NaiveDateTime,
    session_end: NaiveDateTime,
    record_duration_ms: i64,
) -> Result<SignalFile> {
    let mut index = IntervalIndex::new();
    for record in records {
        index.insert(record.start, record.end, record);
    }

    let candidates = stitch_contiguous(index.into_overlapping(session_start, session_end));
    let candidates: Vec<&FileRecord> = candidates.iter().collect();
    let no_data = || Error::NoOverlappingData {
        session_start,
        session_end,
    };
    if candidates.is_empty() {
        return Err(no_data());
    }

    let window = align_window(candidates.iter().map(|r| (r.start, r.end)), record_duration_ms)
        .ok_or_else(no_data)?;
    if window.is_empty() {
        return Err(Error::EmptyWindow {
            start: window.start,
            end: window.end,
        });
    }
    tracing::debug!(
        start = %window.start,
        end = %window.end,
        candidates = candidates.len(),
        "Aligned session window"
    );

    let selections = select_channels(&candidates);
    let mut channels = Vec::with_capacity(selections.len());
    let mut samples = Vec::with_capacity(selections.len());
    for selection in &selections {
        channels.push(selection.record.channels[selection.channel].clone());
        samples.push(extract_channel(selection, &window));
    }

    let annotations = retime_annotations(&candidates, &window);
    let header = synthesize_header(&window, channels);

    tracing::info!(
        channels = header.channels.len(),
        records = header.record_count,
        annotations = annotations.len(),
        "Reconciled session"
    );

    Ok(SignalFile {
        header,
        samples,
        annotations,
    })
}

fn synthesize_header(
    window: &AlignedWindow,
    channels: Vec<sleepmerge_types::ChannelDescriptor>,
) -> SignalHeader {
    SignalHeader {
        patient_id: ANONYMOUS_PATIENT.to_string(),
        recording_id: format!(
            "Startdate {} X X X",
            window.start.format("%d-%b-%Y").to_string().to_uppercase()
        ),
        start: window.start,
        record_duration: window.record_duration_ms as f64 / 1000.0,
        record_count: window.record_count(),
        reserved: CONTINUOUS_TAG.to_string(),
        channels,
        record_onsets: Vec::new(),
    }
}

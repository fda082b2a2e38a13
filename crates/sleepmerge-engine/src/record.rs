use chrono::NaiveDateTime;
use sleepmerge_types::{Annotation, ChannelDescriptor, SignalFile, millis_between};

use crate::labels::{LabelTable, canonicalize_label, is_housekeeping};
use crate::quirks::QuirkPolicy;
use crate::{Error, Result};

/// Per-profile settings needed to turn a decoded file into a [`FileRecord`].
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    pub labels: &'a LabelTable,
    pub quirks: QuirkPolicy,
    /// Fixed record duration every file of the profile must declare
    pub record_duration_ms: i64,
    /// Declared end of the session being reconciled
    pub session_end: NaiveDateTime,
}

/// One decoded file prepared for reconciliation.
///
/// Housekeeping channels are gone, labels are canonical and vendor quirks have
/// been applied. Owned by a single reconciliation call.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub path: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub record_duration_ms: i64,
    pub record_count: i64,
    pub channels: Vec<ChannelDescriptor>,
    /// Indexed like `channels`
    pub samples: Vec<Vec<f64>>,
    /// Onsets in seconds from `start`
    pub annotations: Vec<Annotation>,
}

impl FileRecord {
    /// Build a record from a decoded file.
    ///
    /// Returns `Ok(None)` for files that are skipped without failing the session:
    /// no records, a malformed channel table, or a record layout whose end cannot
    /// be represented. A declared record duration that
    /// differs from the profile's is fatal; an unspecified (zero) one is accepted.
    pub fn from_signal_file(
        path: &str,
        file: SignalFile,
        ctx: &RecordContext<'_>,
    ) -> Result<Option<Self>> {
        let SignalFile {
            header,
            samples,
            annotations,
        } = file;

        if header.record_count <= 0 {
            tracing::warn!(path, record_count = header.record_count, "Skipping file without records");
            return Ok(None);
        }

        let declared_ms = header.record_duration_ms();
        if declared_ms != 0 && declared_ms != ctx.record_duration_ms {
            return Err(Error::RecordDurationMismatch {
                path: path.to_string(),
                expected_ms: ctx.record_duration_ms,
                found_ms: declared_ms,
            });
        }

        if samples.len() != header.channels.len() {
            tracing::warn!(
                path,
                channels = header.channels.len(),
                arrays = samples.len(),
                "Skipping file whose sample arrays do not match its channel table"
            );
            return Ok(None);
        }

        let mut channels = Vec::new();
        let mut kept_samples = Vec::new();
        for (descriptor, values) in header.channels.iter().zip(samples) {
            if is_housekeeping(&descriptor.label) {
                continue;
            }
            if let Err(err) = descriptor.validate() {
                tracing::warn!(path, error = %err, "Skipping file with malformed channel");
                return Ok(None);
            }
            channels.push(descriptor.with_label(canonicalize_label(&descriptor.label, ctx.labels)));
            kept_samples.push(values);
        }

        let annotations = annotations
            .into_iter()
            .map(|a| ctx.quirks.apply_to_annotation(a))
            .collect();

        let fallback_seconds = ctx.record_duration_ms as f64 / 1000.0;
        let Some(computed_end) = header.end_with(fallback_seconds) else {
            tracing::warn!(
                path,
                record_count = header.record_count,
                "Skipping file whose end lies outside the representable time range"
            );
            return Ok(None);
        };
        let end = ctx.quirks.file_end(&header, computed_end, ctx.session_end);

        Ok(Some(Self {
            path: path.to_string(),
            start: header.start,
            end,
            record_duration_ms: ctx.record_duration_ms,
            record_count: header.record_count,
            channels,
            samples: kept_samples,
            annotations,
        }))
    }

    pub fn duration_ms(&self) -> i64 {
        millis_between(self.start, self.end)
    }

    /// Same canonical labels with the same samples-per-record, in the same order.
    pub fn same_layout(&self, other: &FileRecord) -> bool {
        self.record_duration_ms == other.record_duration_ms
            && self.channels.len() == other.channels.len()
            && self
                .channels
                .iter()
                .zip(&other.channels)
                .all(|(a, b)| a.label == b.label && a.samples_per_record == b.samples_per_record)
    }
}

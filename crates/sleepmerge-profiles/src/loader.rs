use sleepmerge_core::{ExportDirectory, Progress};
use sleepmerge_engine::{FileRecord, RecordContext, drop_unfitted_sensors, reconcile};
use sleepmerge_types::{Session, SignalFile};

use crate::traits::{ProfileDescriptor, ProfileOptions, RecordDecoder};
use crate::Result;

/// Decode every file of `session` and reconcile them into one signal file.
///
/// Files are processed one at a time. Undecodable files and files without
/// records are skipped; a file whose record duration contradicts the profile
/// fails the whole session.
pub async fn load_session(
    dir: &dyn ExportDirectory,
    descriptor: &ProfileDescriptor,
    decoder: &dyn RecordDecoder,
    options: &ProfileOptions,
    session: &Session,
    progress: &mut Progress<'_>,
) -> Result<SignalFile> {
    let labels = options.label_table(descriptor);
    let ctx = RecordContext {
        labels: &labels,
        quirks: descriptor.quirks,
        record_duration_ms: descriptor.record_duration_ms,
        session_end: session.end,
    };

    let parts = session.files.len();
    let mut records = Vec::with_capacity(parts);
    for (part, handle) in session.files.values().enumerate() {
        let bytes = dir.read(&handle.path).await?;
        let decoded = decoder.decode_file(&bytes, &mut |done, total| {
            progress.report_within(part, parts, done, total)
        });
        drop(bytes);
        progress.report_within(part + 1, parts, 0, 1);

        let Some(file) = decoded else {
            tracing::warn!(path = %handle.path, "Skipping undecodable file");
            continue;
        };
        if let Some(record) = FileRecord::from_signal_file(&handle.path, file, &ctx)? {
            records.push(record);
        }
    }
    tracing::debug!(session = %session.id, decoded = records.len(), files = parts, "Decoded session files");

    let mut merged = reconcile(records, session.start, session.end, descriptor.record_duration_ms)?;
    if options.drop_unfitted_sensors {
        let dropped = drop_unfitted_sensors(&mut merged, descriptor.optional_sensor_labels);
        if !dropped.is_empty() {
            tracing::info!(session = %session.id, ?dropped, "Dropped unfitted sensor channels");
        }
    }
    progress.finish();
    Ok(merged)
}

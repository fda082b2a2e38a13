use std::collections::BTreeMap;

use sleepmerge_core::{ExportDirectory, Progress};
use sleepmerge_types::{FileHandle, Session, has_suffix_ignore_case, session_id_for, split_parent};

use crate::traits::{ProfileDescriptor, RecordDecoder};
use crate::Result;

/// Find every session in `dir`.
///
/// Each file ending in the descriptor's marker suffix yields one session whose
/// span comes from the marker's header. The session's files are the marker's
/// siblings with the profile's file suffix, keyed by file name. Markers with an
/// unreadable header or no records are skipped.
pub async fn discover(
    dir: &dyn ExportDirectory,
    descriptor: &ProfileDescriptor,
    decoder: &dyn RecordDecoder,
    progress: &mut Progress<'_>,
) -> Result<Vec<Session>> {
    let paths = dir.paths();
    let markers: Vec<&String> = paths
        .iter()
        .filter(|p| has_suffix_ignore_case(p, descriptor.session_marker_suffix))
        .collect();

    let mut sessions = Vec::new();
    for (done, marker) in markers.iter().enumerate() {
        let bytes = dir.read(marker).await?;
        progress.report(done, markers.len());

        let Some(header) = decoder.decode_header(&bytes) else {
            tracing::warn!(profile = descriptor.id, path = %marker, "Skipping marker with unreadable header");
            continue;
        };
        if header.record_count <= 0 {
            tracing::warn!(
                profile = descriptor.id,
                path = %marker,
                record_count = header.record_count,
                "Skipping marker without records"
            );
            continue;
        }

        let Some(end) = header.end_with(descriptor.record_duration_seconds()) else {
            tracing::warn!(
                profile = descriptor.id,
                path = %marker,
                record_count = header.record_count,
                "Skipping marker whose end lies outside the representable time range"
            );
            continue;
        };
        let files = sibling_files(&paths, marker, descriptor.file_suffix);
        tracing::debug!(
            profile = descriptor.id,
            path = %marker,
            start = %header.start,
            %end,
            files = files.len(),
            "Discovered session"
        );

        sessions.push(Session {
            id: session_id_for(descriptor.id, marker),
            profile: descriptor.id.to_string(),
            start: header.start,
            end,
            files,
        });
    }
    progress.finish();

    tracing::info!(profile = descriptor.id, sessions = sessions.len(), "Session discovery finished");
    Ok(sessions)
}

fn sibling_files(paths: &[String], marker: &str, suffix: &str) -> BTreeMap<String, FileHandle> {
    let (parent, _) = split_parent(marker);
    paths
        .iter()
        .filter(|p| has_suffix_ignore_case(p, suffix))
        .filter_map(|p| {
            let (dir, name) = split_parent(p);
            (dir == parent).then(|| (name.to_string(), FileHandle { path: p.clone() }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_files_stay_in_marker_directory() {
        let paths: Vec<String> = [
            "STR.edf",
            "DATALOG/20240301/20240301_220000_BRP.edf",
            "DATALOG/20240301/20240301_220000_EVE.edf",
            "DATALOG/20240301/notes.txt",
            "DATALOG/20240302/20240302_220000_BRP.edf",
        ]
        .iter()
        .map(|p| p.to_string())
        .collect();

        let files = sibling_files(&paths, "DATALOG/20240301/20240301_220000_EVE.edf", ".edf");
        let keys: Vec<&str> = files.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["20240301_220000_BRP.edf", "20240301_220000_EVE.edf"]);
        assert_eq!(
            files["20240301_220000_BRP.edf"].path,
            "DATALOG/20240301/20240301_220000_BRP.edf"
        );
    }

    #[test]
    fn test_sibling_files_at_root() {
        let paths = vec!["a.SPO2".to_string(), "b.spo2".to_string(), "sub/c.spo2".to_string()];
        let files = sibling_files(&paths, "a.SPO2", ".spo2");
        assert_eq!(files.len(), 2);
        assert!(files.contains_key("a.SPO2"));
        assert!(files.contains_key("b.spo2"));
    }
}

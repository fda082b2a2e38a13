use async_trait::async_trait;
use sleepmerge_core::{ExportDirectory, ProgressFn};
use sleepmerge_engine::{LabelTable, QuirkPolicy};
use sleepmerge_types::{Session, SignalFile, SignalHeader, has_suffix_ignore_case};

use crate::Result;

/// Static description of a device family.
///
/// Everything the generic discovery and loading code needs to know about a
/// vendor lives here, so adding a device means adding a table, not code paths.
#[derive(Debug, Clone, Copy)]
pub struct ProfileDescriptor {
    /// Stable identifier, e.g. "resmed"
    pub id: &'static str,
    pub name: &'static str,
    /// Root-level files that must all be present for the profile to apply
    pub required_files: &'static [&'static str],
    /// One file with this suffix per session
    pub session_marker_suffix: &'static str,
    /// Files in the marker's directory with this suffix belong to the session
    pub file_suffix: &'static str,
    pub record_duration_ms: i64,
    /// Canonical label -> vendor spellings
    pub labels: &'static [(&'static str, &'static [&'static str])],
    /// Canonical labels of sensors that may be worn or not (substring match)
    pub optional_sensor_labels: &'static [&'static str],
    pub quirks: QuirkPolicy,
}

impl ProfileDescriptor {
    pub fn record_duration_seconds(&self) -> f64 {
        self.record_duration_ms as f64 / 1000.0
    }

    pub fn label_table(&self) -> LabelTable {
        LabelTable::from_static(self.labels)
    }

    /// A directory matches on its required root files alone. Profiles without
    /// required files match when a session marker exists anywhere below the
    /// root, so a recognized card with no recorded nights still matches.
    pub fn matches(&self, dir: &dyn ExportDirectory) -> bool {
        let paths = dir.paths();
        if self.required_files.is_empty() {
            return paths
                .iter()
                .any(|p| has_suffix_ignore_case(p, self.session_marker_suffix));
        }
        self.required_files
            .iter()
            .all(|required| paths.iter().any(|p| p.eq_ignore_ascii_case(required)))
    }
}

/// User-adjustable behavior of a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileOptions {
    /// Extra vendor spellings, merged into the profile's label table
    pub label_aliases: Vec<(String, Vec<String>)>,
    /// Remove optional sensor channels that never carried a reading
    pub drop_unfitted_sensors: bool,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            label_aliases: Vec::new(),
            drop_unfitted_sensors: true,
        }
    }
}

impl ProfileOptions {
    /// The descriptor's label table extended with configured aliases.
    pub fn label_table(&self, descriptor: &ProfileDescriptor) -> LabelTable {
        let mut table = descriptor.label_table();
        for (canonical, aliases) in &self.label_aliases {
            table.add_aliases(canonical, aliases.iter().map(String::as_str));
        }
        table
    }
}

/// Turns raw file bytes into decoded signal files.
///
/// Decode failures are not errors at this level: a file that cannot be read
/// is skipped by its caller, so both methods return `None` for corrupt input.
pub trait RecordDecoder: Send + Sync {
    /// Header only, used during discovery.
    fn decode_header(&self, bytes: &[u8]) -> Option<SignalHeader>;

    /// Header plus samples. `on_progress(done, total)` may be called from
    /// long per-sample loops.
    fn decode_file(
        &self,
        bytes: &[u8],
        on_progress: &mut dyn FnMut(usize, usize),
    ) -> Option<SignalFile>;
}

/// A device family: detection, session discovery and session loading.
#[async_trait]
pub trait DeviceProfile: Send + Sync {
    fn descriptor(&self) -> &'static ProfileDescriptor;

    fn decoder(&self) -> &dyn RecordDecoder;

    fn options(&self) -> &ProfileOptions;

    fn id(&self) -> &'static str {
        self.descriptor().id
    }

    /// Cheap structural check; reads no file contents.
    fn validate_directory(&self, dir: &dyn ExportDirectory) -> bool {
        self.descriptor().matches(dir)
    }

    /// Enumerate the sessions in `dir`. Order is unspecified.
    async fn sessions(
        &self,
        dir: &dyn ExportDirectory,
        on_progress: Option<ProgressFn<'_>>,
    ) -> Result<Vec<Session>> {
        let mut progress = sleepmerge_core::Progress::new(on_progress);
        crate::discovery::discover(dir, self.descriptor(), self.decoder(), &mut progress).await
    }

    /// Decode and reconcile every file of `session` into one signal file.
    async fn load_session(
        &self,
        dir: &dyn ExportDirectory,
        session: &Session,
        on_progress: Option<ProgressFn<'_>>,
    ) -> Result<SignalFile> {
        let mut progress = sleepmerge_core::Progress::new(on_progress);
        crate::loader::load_session(
            dir,
            self.descriptor(),
            self.decoder(),
            self.options(),
            session,
            &mut progress,
        )
        .await
    }
}

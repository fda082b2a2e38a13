//! Export directory layouts for tests.

use std::path::Path;

use anyhow::Result;
use sleepmerge_core::MemoryDirectory;
use sleepmerge_types::SignalFile;
use tempfile::TempDir;

/// Collects files for a synthetic export, then materializes it in memory or
/// on disk.
///
/// # Example
/// ```
/// use sleepmerge_testing::{at, CardBuilder, SignalFileBuilder};
///
/// let eve = SignalFileBuilder::new(at(2024, 3, 1, 22, 0, 0)).records(60).build();
/// let dir = CardBuilder::resmed()
///     .night("20240301", "20240301_220000_EVE.edf", &eve)
///     .build();
/// assert_eq!(dir.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CardBuilder {
    files: Vec<(String, Vec<u8>)>,
}

impl CardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card with the root summary file a ResMed profile requires.
    pub fn resmed() -> Self {
        Self::new().file("STR.edf", b"{}".to_vec())
    }

    pub fn file(mut self, path: &str, bytes: Vec<u8>) -> Self {
        self.files.push((path.to_string(), bytes));
        self
    }

    /// JSON-encoded signal file under `DATALOG/<folder>/<name>`.
    pub fn night(self, folder: &str, name: &str, file: &SignalFile) -> Self {
        let bytes = serde_json::to_vec(file).expect("fixture serializes");
        self.file(&format!("DATALOG/{}/{}", folder, name), bytes)
    }

    pub fn build(self) -> MemoryDirectory {
        let mut dir = MemoryDirectory::new();
        for (path, bytes) in self.files {
            dir.insert(path, bytes);
        }
        dir
    }

    /// Write the card below `root`.
    pub fn write_to(&self, root: &Path) -> Result<()> {
        for (path, bytes) in &self.files {
            let target = root.join(path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(target, bytes)?;
        }
        Ok(())
    }

    /// Write the card into a fresh temporary directory.
    pub fn write_temp(&self) -> Result<TempDir> {
        let temp = TempDir::new()?;
        self.write_to(temp.path())?;
        Ok(temp)
    }
}

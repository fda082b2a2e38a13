use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read-only view of a device export: relative path -> file contents.
///
/// Paths are relative to the export root and always `/`-separated.
#[async_trait]
pub trait ExportDirectory: Send + Sync {
    /// Every file path in the export, sorted.
    fn paths(&self) -> Vec<String>;

    fn contains(&self, path: &str) -> bool {
        self.paths().iter().any(|p| p == path)
    }

    /// Read a whole file.
    async fn read(&self, path: &str) -> Result<Vec<u8>>;
}

/// Export directory backed by the local filesystem.
///
/// The listing is taken once at open time; later changes on disk are not seen.
#[derive(Debug, Clone)]
pub struct FsDirectory {
    root: PathBuf,
    paths: Vec<String>,
}

impl FsDirectory {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(Error::NotFound(root.display().to_string()));
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&root).follow_links(false) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&root) else {
                continue;
            };
            let joined = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            paths.push(joined);
        }
        paths.sort();

        tracing::debug!(root = %root.display(), files = paths.len(), "Opened export directory");
        Ok(Self { root, paths })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ExportDirectory for FsDirectory {
    fn paths(&self) -> Vec<String> {
        self.paths.clone()
    }

    fn contains(&self, path: &str) -> bool {
        self.paths.binary_search_by(|p| p.as_str().cmp(path)).is_ok()
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        // Only listed paths are readable, so `..` segments cannot escape the root
        if !self.contains(path) {
            return Err(Error::NotFound(path.to_string()));
        }
        let bytes = tokio::fs::read(self.root.join(path)).await?;
        Ok(bytes)
    }
}

/// Export directory held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    pub fn with_file(mut self, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl ExportDirectory for MemoryDirectory {
    fn paths(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_directory_reads_and_lists_sorted() {
        let dir = MemoryDirectory::new()
            .with_file("b.edf", vec![2])
            .with_file("a.edf", vec![1]);

        assert_eq!(dir.paths(), vec!["a.edf".to_string(), "b.edf".to_string()]);
        assert!(dir.contains("a.edf"));
        assert_eq!(dir.read("b.edf").await.unwrap(), vec![2]);
        assert!(matches!(dir.read("c.edf").await, Err(Error::NotFound(_))));
    }
}

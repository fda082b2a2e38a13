use sleepmerge_core::*;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_fs_directory_lists_relative_slash_paths() {
    let temp = TempDir::new().unwrap();
    let day = temp.path().join("DATALOG").join("20240301");
    fs::create_dir_all(&day).unwrap();
    fs::write(temp.path().join("STR.edf"), b"str").unwrap();
    fs::write(day.join("20240301_223000_EVE.edf"), b"eve").unwrap();

    let dir = FsDirectory::open(temp.path()).unwrap();
    assert_eq!(
        dir.paths(),
        vec![
            "DATALOG/20240301/20240301_223000_EVE.edf".to_string(),
            "STR.edf".to_string(),
        ]
    );
    assert!(dir.contains("STR.edf"));
    assert!(!dir.contains("DATALOG"));

    let bytes = dir
        .read("DATALOG/20240301/20240301_223000_EVE.edf")
        .await
        .unwrap();
    assert_eq!(bytes, b"eve");
}

#[tokio::test]
async fn test_fs_directory_refuses_unlisted_paths() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("night.spo2"), b"x").unwrap();

    let dir = FsDirectory::open(temp.path()).unwrap();
    assert!(matches!(dir.read("../etc/passwd").await, Err(Error::NotFound(_))));
}

#[test]
fn test_fs_directory_requires_existing_root() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");
    assert!(matches!(FsDirectory::open(&missing), Err(Error::NotFound(_))));
}

#[test]
fn test_resolve_workspace_path_prefers_explicit() {
    let path = resolve_workspace_path(Some("/explicit/data")).unwrap();
    assert_eq!(path, std::path::PathBuf::from("/explicit/data"));
}

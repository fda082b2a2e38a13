use std::sync::Arc;

use sleepmerge_core::MemoryDirectory;
use sleepmerge_profiles::{
    DeviceProfile, Error, OximetryProfile, ProfileOptions, create_all_profiles, create_profile,
    detect_profile, get_profile_descriptor, get_profile_names,
};
use sleepmerge_testing::assertions::{assert_record_aligned, labels};
use sleepmerge_testing::{JsonCodec, at, flat_oximetry};

#[tokio::test]
async fn test_no_reading_pair_loads_as_zero() {
    let bytes = flat_oximetry(at(2024, 3, 1, 23, 0, 0), &[(97, 64), (0x7F, 0xFF), (96, 66)], 0);
    let dir = MemoryDirectory::new().with_file("night.spo2", bytes);
    let profile = OximetryProfile::new();

    let sessions = profile.sessions(&dir, None).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].end, at(2024, 3, 1, 23, 0, 3));

    let merged = profile.load_session(&dir, &sessions[0], None).await.unwrap();
    assert_record_aligned(&merged).unwrap();
    assert_eq!(merged.channel_samples("SpO2"), Some(&[97.0, 0.0, 96.0][..]));
    assert_eq!(merged.channel_samples("Pulse"), Some(&[64.0, 0.0, 66.0][..]));
}

#[tokio::test]
async fn test_padded_samples_load() {
    let bytes = flat_oximetry(at(2024, 3, 1, 23, 0, 0), &[(95, 70), (94, 71)], 2);
    let dir = MemoryDirectory::new().with_file("night.SPO2", bytes);
    let profile = OximetryProfile::new();

    let sessions = profile.sessions(&dir, None).await.unwrap();
    let merged = profile.load_session(&dir, &sessions[0], None).await.unwrap();
    assert_eq!(merged.channel_samples("SpO2"), Some(&[95.0, 94.0][..]));
}

#[tokio::test]
async fn test_sensor_off_all_night() {
    let bytes = flat_oximetry(at(2024, 3, 1, 23, 0, 0), &[(0x7F, 0xFF); 120], 0);
    let dir = MemoryDirectory::new().with_file("night.spo2", bytes);

    let profile = OximetryProfile::new();
    let sessions = profile.sessions(&dir, None).await.unwrap();
    let merged = profile.load_session(&dir, &sessions[0], None).await.unwrap();
    assert!(labels(&merged).is_empty());

    let keep = OximetryProfile::with_options(ProfileOptions {
        drop_unfitted_sensors: false,
        ..ProfileOptions::default()
    });
    let merged = keep.load_session(&dir, &sessions[0], None).await.unwrap();
    assert_eq!(labels(&merged), vec!["SpO2", "Pulse"]);
    assert_eq!(merged.header.record_count, 120);
}

#[tokio::test]
async fn test_each_night_is_its_own_session() {
    let first = flat_oximetry(at(2024, 3, 1, 23, 0, 0), &[(97, 60); 30], 0);
    let second = flat_oximetry(at(2024, 3, 2, 23, 0, 0), &[(91, 80); 45], 0);
    let dir = MemoryDirectory::new()
        .with_file("2024-03-01.spo2", first)
        .with_file("2024-03-02.spo2", second)
        .with_file("2024-03-03.spo2", vec![0x01]);
    let profile = OximetryProfile::new();

    let sessions = profile.sessions(&dir, None).await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].files.len(), 3);

    let merged = profile.load_session(&dir, &sessions[1], None).await.unwrap();
    assert_eq!(merged.header.start, at(2024, 3, 2, 23, 0, 0));
    assert_eq!(merged.header.record_count, 45);
    assert!(merged.channel_samples("SpO2").unwrap().iter().all(|&v| v == 91.0));
}

#[test]
fn test_detects_flat_export() {
    let bytes = flat_oximetry(at(2024, 3, 1, 23, 0, 0), &[(97, 64)], 0);
    let dir = MemoryDirectory::new().with_file("exports/night.spo2", bytes);
    let profiles = create_all_profiles(Arc::new(JsonCodec));

    let detected = detect_profile(&dir, &profiles).unwrap();
    assert_eq!(detected.id(), "oximetry");

    let nothing = MemoryDirectory::new().with_file("readme.txt", b"hello".to_vec());
    assert!(detect_profile(&nothing, &profiles).is_none());
}

#[test]
fn test_registry() {
    assert_eq!(get_profile_names(), vec!["resmed", "oximetry"]);
    assert_eq!(get_profile_descriptor("resmed").unwrap().record_duration_ms, 60_000);
    assert!(get_profile_descriptor("philips").is_none());

    let profile = create_profile("oximetry", Arc::new(JsonCodec), ProfileOptions::default()).unwrap();
    assert_eq!(profile.id(), "oximetry");
    assert!(matches!(
        create_profile("philips", Arc::new(JsonCodec), ProfileOptions::default()),
        Err(Error::UnknownProfile(name)) if name == "philips"
    ));
}

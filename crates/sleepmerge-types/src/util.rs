use chrono::{NaiveDateTime, TimeDelta};
use uuid::Uuid;

/// Shift an instant by a signed number of milliseconds.
///
/// Returns `None` when the result falls outside the representable range,
/// which corrupt headers can easily request.
pub fn add_millis(instant: NaiveDateTime, millis: i64) -> Option<NaiveDateTime> {
    TimeDelta::try_milliseconds(millis).and_then(|delta| instant.checked_add_signed(delta))
}

/// Signed milliseconds from `from` to `to`.
pub fn millis_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_milliseconds()
}

/// Deterministic session identifier derived from the profile and marker path.
///
/// The same card yields the same identifiers on every scan.
pub fn session_id_for(profile: &str, marker_path: &str) -> String {
    let key = format!("{}:{}", profile, marker_path);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string()
}

/// ASCII case-insensitive suffix check for file names.
pub fn has_suffix_ignore_case(path: &str, suffix: &str) -> bool {
    path.len() >= suffix.len()
        && path.is_char_boundary(path.len() - suffix.len())
        && path[path.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Split a `/`-separated relative path into (parent directory, file name).
pub fn split_parent(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

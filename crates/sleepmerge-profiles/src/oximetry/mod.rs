mod decoder;

use async_trait::async_trait;
use sleepmerge_engine::QuirkPolicy;

use crate::traits::{DeviceProfile, ProfileDescriptor, ProfileOptions, RecordDecoder};

pub use decoder::{FlatHeader, FlatOximetryDecoder, parse_flat_header};

/// Flat `.spo2` files written by standalone finger oximeters.
///
/// Every file is its own session marker; there is no root index file.
pub static DESCRIPTOR: ProfileDescriptor = ProfileDescriptor {
    id: "oximetry",
    name: "Flat oximetry export",
    required_files: &[],
    session_marker_suffix: ".spo2",
    file_suffix: ".spo2",
    record_duration_ms: 1_000,
    labels: &[("SpO2", &["SPO2", "Oxygen Saturation"]), ("Pulse", &["PR", "Pulse Rate"])],
    optional_sensor_labels: &["spo2", "pulse"],
    quirks: QuirkPolicy::NONE,
};

#[derive(Default)]
pub struct OximetryProfile {
    decoder: FlatOximetryDecoder,
    options: ProfileOptions,
}

impl OximetryProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ProfileOptions) -> Self {
        Self {
            decoder: FlatOximetryDecoder,
            options,
        }
    }
}

#[async_trait]
impl DeviceProfile for OximetryProfile {
    fn descriptor(&self) -> &'static ProfileDescriptor {
        &DESCRIPTOR
    }

    fn decoder(&self) -> &dyn RecordDecoder {
        &self.decoder
    }

    fn options(&self) -> &ProfileOptions {
        &self.options
    }
}

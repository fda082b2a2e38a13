mod labels;

use std::sync::Arc;

use async_trait::async_trait;
use sleepmerge_core::SignalCodec;
use sleepmerge_engine::QuirkPolicy;

use crate::container::ContainerDecoder;
use crate::traits::{DeviceProfile, ProfileDescriptor, ProfileOptions, RecordDecoder};

pub use labels::{LABELS, OPTIONAL_SENSORS};

/// ResMed S9/AirSense SD card layout.
///
/// `STR.edf` sits at the card root; each night lives in
/// `DATALOG/<yyyymmdd>/` with one `*EVE.edf` event file per session next to
/// the waveform (`BRP`), low-rate (`PLD`) and oximetry (`SAD`) files.
pub static DESCRIPTOR: ProfileDescriptor = ProfileDescriptor {
    id: "resmed",
    name: "ResMed",
    required_files: &["STR.edf"],
    session_marker_suffix: "EVE.edf",
    file_suffix: ".edf",
    record_duration_ms: 60_000,
    labels: LABELS,
    optional_sensor_labels: OPTIONAL_SENSORS,
    quirks: QuirkPolicy {
        onset_marks_event_end: true,
        discontinuous_ends_at_session_end: true,
    },
};

pub struct ResMedProfile {
    decoder: ContainerDecoder,
    options: ProfileOptions,
}

impl ResMedProfile {
    pub fn new(codec: Arc<dyn SignalCodec>) -> Self {
        Self::with_options(codec, ProfileOptions::default())
    }

    pub fn with_options(codec: Arc<dyn SignalCodec>, options: ProfileOptions) -> Self {
        Self {
            decoder: ContainerDecoder::new(codec),
            options,
        }
    }
}

#[async_trait]
impl DeviceProfile for ResMedProfile {
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

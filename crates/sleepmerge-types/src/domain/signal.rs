use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::util::add_millis;
use crate::{Error, Result};

/// Reserved-field prefix marking a discontinuous recording.
pub const DISCONTINUOUS_TAG: &str = "EDF+D";

/// Reserved-field value written on merged output.
pub const CONTINUOUS_TAG: &str = "EDF+C";

/// One measurement stream in a signal file's channel table.
///
/// Scaling follows the usual container convention: a digital value in
/// `[digital_min, digital_max]` maps linearly onto `[physical_min, physical_max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    pub label: String,
    /// Source tag (transducer type)
    #[serde(default)]
    pub transducer: String,
    /// Physical unit, e.g. "L/s" or "%"
    #[serde(default)]
    pub physical_dimension: String,
    pub physical_min: f64,
    pub physical_max: f64,
    pub digital_min: i32,
    pub digital_max: i32,
    #[serde(default)]
    pub prefilter: String,
    pub samples_per_record: usize,
    #[serde(default)]
    pub reserved: String,
}

impl ChannelDescriptor {
    /// Check the scaling invariants (`digital_max > digital_min`, `physical_max > physical_min`).
    pub fn validate(&self) -> Result<()> {
        if self.digital_max <= self.digital_min {
            return Err(Error::InvalidChannel {
                label: self.label.clone(),
                reason: format!(
                    "digital max {} is not above digital min {}",
                    self.digital_max, self.digital_min
                ),
            });
        }
        if self.physical_max <= self.physical_min {
            return Err(Error::InvalidChannel {
                label: self.label.clone(),
                reason: format!(
                    "physical max {} is not above physical min {}",
                    self.physical_max, self.physical_min
                ),
            });
        }
        Ok(())
    }

    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..self.clone()
        }
    }
}

/// Timed event attached to a signal file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Seconds from the owning file's start
    pub onset: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub description: String,
}

impl Annotation {
    pub fn new(onset: f64, duration: Option<f64>, description: impl Into<String>) -> Self {
        Self {
            onset,
            duration,
            description: description.into(),
        }
    }
}

/// Header of a decoded signal file: timing plus channel table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalHeader {
    #[serde(default)]
    pub patient_id: String,
    #[serde(default)]
    pub recording_id: String,
    pub start: NaiveDateTime,
    /// Seconds per data record; zero when the file leaves it unspecified
    pub record_duration: f64,
    pub record_count: i64,
    /// Reserved header field; carries the continuity tag
    #[serde(default)]
    pub reserved: String,
    pub channels: Vec<ChannelDescriptor>,
    /// Per-record start offsets in seconds, when the container records them.
    /// Empty means records are laid out back to back.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub record_onsets: Vec<f64>,
}

impl SignalHeader {
    /// Offset in seconds of record `index` from the file start.
    fn record_onset_with(&self, index: usize, record_duration: f64) -> f64 {
        self.record_onsets
            .get(index)
            .copied()
            .unwrap_or(index as f64 * record_duration)
    }

    /// Declared record duration, or `fallback` when the file leaves it unspecified.
    pub fn effective_record_duration(&self, fallback: f64) -> f64 {
        if self.record_duration > 0.0 {
            self.record_duration
        } else {
            fallback
        }
    }

    /// `start + (last record onset + record duration)`.
    ///
    /// A file without records ends where it starts. `None` when the declared
    /// layout places the end beyond the representable time range.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end_with(self.record_duration)
    }

    /// Like [`end`](Self::end), substituting `fallback` seconds when the
    /// declared record duration is zero.
    pub fn end_with(&self, fallback: f64) -> Option<NaiveDateTime> {
        if self.record_count <= 0 {
            return Some(self.start);
        }
        let duration = self.effective_record_duration(fallback);
        let onset = self.record_onset_with(self.record_count as usize - 1, duration);
        add_millis(self.start, seconds_to_millis(onset + duration))
    }

    pub fn record_duration_ms(&self) -> i64 {
        seconds_to_millis(self.record_duration)
    }

    pub fn is_discontinuous(&self) -> bool {
        self.reserved.trim_start().starts_with(DISCONTINUOUS_TAG)
    }

    pub fn channel(&self, label: &str) -> Option<(usize, &ChannelDescriptor)> {
        self.channels.iter().enumerate().find(|(_, c)| c.label == label)
    }
}

/// Decoded signal file: header, one sample array per channel, annotations.
///
/// This is also the shape of a merged session handed to the codec for encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalFile {
    pub header: SignalHeader,
    /// Physical sample values, indexed like `header.channels`
    pub samples: Vec<Vec<f64>>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Record-aligned multi-channel result of reconciling one session.
pub type MergedOutput = SignalFile;

impl SignalFile {
    pub fn signal_count(&self) -> usize {
        self.header.channels.len()
    }

    pub fn channel_samples(&self, label: &str) -> Option<&[f64]> {
        let (index, _) = self.header.channel(label)?;
        self.samples.get(index).map(Vec::as_slice)
    }

    /// Remove a channel together with its sample array.
    pub fn remove_channel(&mut self, index: usize) -> Option<(ChannelDescriptor, Vec<f64>)> {
        if index >= self.header.channels.len() || index >= self.samples.len() {
            return None;
        }
        let descriptor = self.header.channels.remove(index);
        let samples = self.samples.remove(index);
        Some((descriptor, samples))
    }
}

pub fn seconds_to_millis(seconds: f64) -> i64 {
    (seconds * 1000.0).round() as i64
}

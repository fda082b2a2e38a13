//! Builders for synthetic device files.

use chrono::{NaiveDate, NaiveDateTime};
use sleepmerge_types::{Annotation, ChannelDescriptor, SignalFile, SignalHeader};

/// Instant from calendar fields. Panics on an invalid date.
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .expect("valid fixture date")
}

/// Channel with symmetric scaling wide enough for any fixture value.
pub fn channel(label: &str, samples_per_record: usize) -> ChannelDescriptor {
    ChannelDescriptor {
        label: label.to_string(),
        transducer: String::new(),
        physical_dimension: String::new(),
        physical_min: -32768.0,
        physical_max: 32767.0,
        digital_min: -32768,
        digital_max: 32767,
        prefilter: String::new(),
        samples_per_record,
        reserved: String::new(),
    }
}

/// Fluent builder for a decoded [`SignalFile`].
///
/// Defaults to one-minute records. Channels added before `records` are sized
/// when `build` runs, so call order does not matter.
pub struct SignalFileBuilder {
    start: NaiveDateTime,
    record_duration: f64,
    record_count: i64,
    reserved: String,
    record_onsets: Vec<f64>,
    channels: Vec<(ChannelDescriptor, Box<dyn Fn(usize) -> f64>)>,
    annotations: Vec<Annotation>,
}

impl SignalFileBuilder {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            start,
            record_duration: 60.0,
            record_count: 1,
            reserved: String::new(),
            record_onsets: Vec::new(),
            channels: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn record_duration(mut self, seconds: f64) -> Self {
        self.record_duration = seconds;
        self
    }

    pub fn records(mut self, count: i64) -> Self {
        self.record_count = count;
        self
    }

    /// Mark the file discontinuous with explicit per-record onsets.
    pub fn discontinuous(mut self, onsets: Vec<f64>) -> Self {
        self.reserved = "EDF+D".to_string();
        self.record_count = onsets.len() as i64;
        self.record_onsets = onsets;
        self
    }

    /// Channel whose sample `i` is `value(i)`.
    pub fn channel_with(
        mut self,
        label: &str,
        samples_per_record: usize,
        value: impl Fn(usize) -> f64 + 'static,
    ) -> Self {
        self.channels
            .push((channel(label, samples_per_record), Box::new(value)));
        self
    }

    pub fn constant(self, label: &str, samples_per_record: usize, value: f64) -> Self {
        self.channel_with(label, samples_per_record, move |_| value)
    }

    /// Channel counting up from zero, so sample values equal their index.
    pub fn ramp(self, label: &str, samples_per_record: usize) -> Self {
        self.channel_with(label, samples_per_record, |i| i as f64)
    }

    pub fn annotation(mut self, onset: f64, duration: Option<f64>, description: &str) -> Self {
        self.annotations
            .push(Annotation::new(onset, duration, description));
        self
    }

    pub fn build(self) -> SignalFile {
        let records = self.record_count.max(0) as usize;
        let mut channels = Vec::with_capacity(self.channels.len());
        let mut samples = Vec::with_capacity(self.channels.len());
        for (descriptor, value) in self.channels {
            let len = records * descriptor.samples_per_record;
            samples.push((0..len).map(&value).collect());
            channels.push(descriptor);
        }

        SignalFile {
            header: SignalHeader {
                patient_id: String::new(),
                recording_id: String::new(),
                start: self.start,
                record_duration: self.record_duration,
                record_count: self.record_count,
                reserved: self.reserved,
                channels,
                record_onsets: self.record_onsets,
            },
            samples,
            annotations: self.annotations,
        }
    }

    /// Build and encode as the JSON container understood by [`crate::JsonCodec`].
    pub fn to_bytes(self) -> Vec<u8> {
        serde_json::to_vec(&self.build()).expect("fixture serializes")
    }
}

/// Byte image of a flat `.spo2` export.
///
/// `samples` are raw (SpO2, pulse) byte pairs; `padding` extra bytes follow
/// each pair.
pub fn flat_oximetry(start: NaiveDateTime, samples: &[(u8, u8)], padding: usize) -> Vec<u8> {
    use chrono::{Datelike, Timelike};

    const HEADER_OFFSET: usize = 32;
    let mut bytes = vec![0u8; HEADER_OFFSET + 228];
    bytes[0..2].copy_from_slice(&(HEADER_OFFSET as u16).to_le_bytes());

    let fields = [
        start.year(),
        start.month() as i32,
        start.day() as i32,
        start.hour() as i32,
        start.minute() as i32,
        start.second() as i32,
    ];
    for (i, field) in fields.iter().enumerate() {
        let offset = HEADER_OFFSET + 200 + i * 4;
        bytes[offset..offset + 4].copy_from_slice(&field.to_le_bytes());
    }
    let offset = HEADER_OFFSET + 224;
    bytes[offset..offset + 4].copy_from_slice(&(samples.len() as i32).to_le_bytes());

    for &(spo2, pulse) in samples {
        bytes.push(spo2);
        bytes.push(pulse);
        bytes.resize(bytes.len() + padding, 0);
    }
    bytes
}

use chrono::{NaiveDate, NaiveDateTime};
use sleepmerge_types::{ChannelDescriptor, SignalFile, SignalHeader};

use crate::traits::RecordDecoder;

// Layout, relative to the header offset `h` stored in the first two bytes:
// six little-endian i32 date fields at h+200, the i32 sample count at h+224,
// samples from h+228. Each sample is SpO2 then pulse, one byte each, possibly
// followed by padding.
const DATE_OFFSET: usize = 200;
const COUNT_OFFSET: usize = 224;
const PAYLOAD_OFFSET: usize = 228;

/// SpO2/pulse byte pair the oximeter writes when no finger is detected.
const NO_READING: (u8, u8) = (0x7F, 0xFF);

const PROGRESS_STRIDE: usize = 4096;

/// Parsed fixed header of a flat oximetry file.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatHeader {
    pub start: NaiveDateTime,
    pub sample_count: i64,
    pub payload_start: usize,
    pub bytes_per_sample: usize,
}

fn read_u16_le(bytes: &[u8], offset: usize) -> Option<u16> {
    let raw = bytes.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([raw[0], raw[1]]))
}

fn read_i32_le(bytes: &[u8], offset: usize) -> Option<i32> {
    let raw = bytes.get(offset..offset + 4)?;
    Some(i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

pub fn parse_flat_header(bytes: &[u8]) -> Option<FlatHeader> {
    let h = read_u16_le(bytes, 0)? as usize;
    let payload_start = h + PAYLOAD_OFFSET;
    if payload_start > bytes.len() {
        return None;
    }

    let mut fields = [0i32; 6];
    for (i, field) in fields.iter_mut().enumerate() {
        *field = read_i32_le(bytes, h + DATE_OFFSET + i * 4)?;
    }
    let [year, month, day, hour, minute, second] = fields;
    let start = NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)?
        .and_hms_opt(
            u32::try_from(hour).ok()?,
            u32::try_from(minute).ok()?,
            u32::try_from(second).ok()?,
        )?;

    let sample_count = i64::from(read_i32_le(bytes, h + COUNT_OFFSET)?);
    let bytes_per_sample = if sample_count > 0 {
        let per = (bytes.len() - payload_start) / sample_count as usize;
        if per < 2 {
            return None;
        }
        per
    } else {
        0
    };

    Some(FlatHeader {
        start,
        sample_count,
        payload_start,
        bytes_per_sample,
    })
}

fn channel(label: &str, transducer: &str, dimension: &str) -> ChannelDescriptor {
    ChannelDescriptor {
        label: label.to_string(),
        transducer: transducer.to_string(),
        physical_dimension: dimension.to_string(),
        physical_min: 0.0,
        physical_max: 255.0,
        digital_min: 0,
        digital_max: 255,
        prefilter: String::new(),
        samples_per_record: 1,
        reserved: String::new(),
    }
}

impl FlatHeader {
    /// One-second records, one SpO2 and one pulse sample each.
    pub fn to_signal_header(&self) -> SignalHeader {
        SignalHeader {
            patient_id: String::new(),
            recording_id: String::new(),
            start: self.start,
            record_duration: 1.0,
            record_count: self.sample_count,
            reserved: String::new(),
            channels: vec![
                channel("SpO2", "Pulse oximeter", "%"),
                channel("Pulse", "Pulse oximeter", "bpm"),
            ],
            record_onsets: Vec::new(),
        }
    }
}

/// Decoder for the vendor's flat `.spo2` export.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatOximetryDecoder;

impl RecordDecoder for FlatOximetryDecoder {
    fn decode_header(&self, bytes: &[u8]) -> Option<SignalHeader> {
        parse_flat_header(bytes).map(|h| h.to_signal_header())
    }

    fn decode_file(
        &self,
        bytes: &[u8],
        on_progress: &mut dyn FnMut(usize, usize),
    ) -> Option<SignalFile> {
        let flat = parse_flat_header(bytes)?;
        let count = flat.sample_count.max(0) as usize;

        let mut spo2 = Vec::with_capacity(count);
        let mut pulse = Vec::with_capacity(count);
        for i in 0..count {
            let offset = flat.payload_start + i * flat.bytes_per_sample;
            let pair = (*bytes.get(offset)?, *bytes.get(offset + 1)?);
            let (s, p) = if pair == NO_READING { (0, 0) } else { pair };
            spo2.push(f64::from(s));
            pulse.push(f64::from(p));

            if i % PROGRESS_STRIDE == 0 {
                on_progress(i, count);
            }
        }
        on_progress(count, count);

        Some(SignalFile {
            header: flat.to_signal_header(),
            samples: vec![spo2, pulse],
            annotations: Vec::new(),
        })
    }
}

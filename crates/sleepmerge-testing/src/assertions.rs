//! Assertions on merged output.

use anyhow::{Result, bail};
use sleepmerge_types::SignalFile;

/// Channel labels of `file`, in output order.
pub fn labels(file: &SignalFile) -> Vec<&str> {
    file.header.channels.iter().map(|c| c.label.as_str()).collect()
}

/// Every sample array holds exactly `record_count * samples_per_record` values.
pub fn assert_record_aligned(file: &SignalFile) -> Result<()> {
    if file.samples.len() != file.header.channels.len() {
        bail!(
            "{} channels but {} sample arrays",
            file.header.channels.len(),
            file.samples.len()
        );
    }
    let records = file.header.record_count.max(0) as usize;
    for (channel, samples) in file.header.channels.iter().zip(&file.samples) {
        let expected = records * channel.samples_per_record;
        if samples.len() != expected {
            bail!(
                "Channel {} has {} samples, expected {}",
                channel.label,
                samples.len(),
                expected
            );
        }
    }
    Ok(())
}

/// Annotation onsets are non-decreasing.
pub fn assert_annotations_sorted(file: &SignalFile) -> Result<()> {
    for pair in file.annotations.windows(2) {
        if pair[1].onset < pair[0].onset {
            bail!(
                "Annotation '{}' at {} precedes '{}' at {}",
                pair[1].description,
                pair[1].onset,
                pair[0].description,
                pair[0].onset
            );
        }
    }
    Ok(())
}

use crate::record::FileRecord;

/// Chosen source for one canonical channel.
#[derive(Debug, Clone, Copy)]
pub struct ChannelSelection<'a> {
    pub record: &'a FileRecord,
    /// Index into `record.channels` / `record.samples`
    pub channel: usize,
}

impl ChannelSelection<'_> {
    pub fn label(&self) -> &str {
        &self.record.channels[self.channel].label
    }

    pub fn samples_per_record(&self) -> usize {
        self.record.channels[self.channel].samples_per_record
    }
}

/// Pick, per canonical label, the candidate channel with the most samples per record.
///
/// Ties go to the first candidate in iteration order. The result lists labels in
/// the order they are first seen.
pub fn select_channels<'a>(candidates: &[&'a FileRecord]) -> Vec<ChannelSelection<'a>> {
    let mut selected: Vec<ChannelSelection<'a>> = Vec::new();

    for &record in candidates {
        for (index, descriptor) in record.channels.iter().enumerate() {
            let candidate = ChannelSelection {
                record,
                channel: index,
            };
            match selected.iter_mut().find(|s| s.label() == descriptor.label) {
                Some(current) => {
                    if descriptor.samples_per_record > current.samples_per_record() {
                        *current = candidate;
                    }
                }
                None => selected.push(candidate),
            }
        }
    }

    for selection in &selected {
        tracing::debug!(
            label = selection.label(),
            source = %selection.record.path,
            samples_per_record = selection.samples_per_record(),
            "Selected channel source"
        );
    }

    selected
}

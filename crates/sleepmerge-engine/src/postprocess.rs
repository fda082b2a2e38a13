use sleepmerge_types::SignalFile;

/// Remove optional-sensor channels that never report a positive value.
///
/// A channel is optional when its label contains one of `optional_labels`
/// (ASCII case-insensitive). Such a channel is dropped, descriptor and samples
/// together, when every sample is `<= 0`, which is how an unfitted sensor shows
/// up. Returns the labels removed.
pub fn drop_unfitted_sensors(file: &mut SignalFile, optional_labels: &[&str]) -> Vec<String> {
    let needles: Vec<String> = optional_labels.iter().map(|l| l.to_ascii_lowercase()).collect();
    let mut removed = Vec::new();

    let mut index = file.header.channels.len();
    while index > 0 {
        index -= 1;
        let label = file.header.channels[index].label.to_ascii_lowercase();
        if !needles.iter().any(|n| label.contains(n.as_str())) {
            continue;
        }
        let unfitted = file
            .samples
            .get(index)
            .is_none_or(|values| values.iter().all(|v| *v <= 0.0));
        if unfitted && let Some((descriptor, _)) = file.remove_channel(index) {
            tracing::debug!(label = %descriptor.label, "Dropping unfitted sensor channel");
            removed.push(descriptor.label);
        }
    }

    removed.reverse();
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sleepmerge_types::{ChannelDescriptor, SignalHeader};

    fn channel(label: &str) -> ChannelDescriptor {
        ChannelDescriptor {
            label: label.to_string(),
            transducer: String::new(),
            physical_dimension: String::new(),
            physical_min: 0.0,
            physical_max: 100.0,
            digital_min: 0,
            digital_max: 100,
            prefilter: String::new(),
            samples_per_record: 4,
            reserved: String::new(),
        }
    }

    fn file(channels: Vec<(&str, Vec<f64>)>) -> SignalFile {
        SignalFile {
            header: SignalHeader {
                patient_id: String::new(),
                recording_id: String::new(),
                start: NaiveDate::from_ymd_opt(2024, 3, 1)
                    .unwrap()
                    .and_hms_opt(22, 0, 0)
                    .unwrap(),
                record_duration: 60.0,
                record_count: 1,
                reserved: String::new(),
                channels: channels.iter().map(|(l, _)| channel(l)).collect(),
                record_onsets: Vec::new(),
            },
            samples: channels.into_iter().map(|(_, s)| s).collect(),
            annotations: Vec::new(),
        }
    }

    #[test]
    fn test_all_zero_optional_channel_is_removed() {
        let mut f = file(vec![
            ("Flow", vec![0.0; 4]),
            ("SpO2", vec![0.0; 4]),
            ("Pulse", vec![-1.0, 0.0, 0.0, 0.0]),
        ]);
        let removed = drop_unfitted_sensors(&mut f, &["spo2", "pulse"]);
        assert_eq!(removed, vec!["SpO2", "Pulse"]);
        assert_eq!(f.signal_count(), 1);
        assert_eq!(f.samples.len(), 1);
        assert_eq!(f.header.channels[0].label, "Flow");
    }

    #[test]
    fn test_single_positive_sample_keeps_channel() {
        let mut samples = vec![0.0; 4000];
        samples[3999] = 5.0;
        let mut f = file(vec![("SpO2", samples)]);
        let removed = drop_unfitted_sensors(&mut f, &["spo2", "pulse"]);
        assert!(removed.is_empty());
        assert_eq!(f.signal_count(), 1);
    }

    #[test]
    fn test_non_optional_zero_channel_is_kept() {
        let mut f = file(vec![("Snore", vec![0.0; 4]), ("Pulse", vec![0.0; 4])]);
        let before = f.signal_count();
        let removed = drop_unfitted_sensors(&mut f, &["spo2", "pulse"]);
        assert_eq!(removed, vec!["Pulse"]);
        assert_eq!(f.signal_count(), before - 1);
        assert_eq!(f.header.channels[0].label, "Snore");
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let mut f = file(vec![("Pulse.1s", vec![0.0; 4])]);
        assert_eq!(drop_unfitted_sensors(&mut f, &["PULSE"]), vec!["Pulse.1s"]);
    }
}

use sleepmerge_types::ChannelDescriptor;

/// Container-format pseudo-channels that never carry physiological data.
pub const HOUSEKEEPING_LABELS: &[&str] = &["EDF Annotations", "BDF Annotations", "Crc16"];

/// Canonical channel name -> vendor/locale aliases.
///
/// Matching is exact and case-sensitive. A canonical name always maps to itself,
/// so canonicalizing an already canonical channel set changes nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelTable {
    entries: Vec<(String, Vec<String>)>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_static(table: &[(&str, &[&str])]) -> Self {
        let mut labels = Self::new();
        for (canonical, aliases) in table {
            labels.add_aliases(canonical, aliases.iter().copied());
        }
        labels
    }

    /// Register aliases for a canonical name, extending any existing entry.
    pub fn add_aliases<I, S>(&mut self, canonical: &str, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = match self.entries.iter().position(|(c, _)| c == canonical) {
            Some(index) => index,
            None => {
                self.entries.push((canonical.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        let known = &mut self.entries[index].1;
        for alias in aliases {
            let alias = alias.into();
            if !known.contains(&alias) {
                known.push(alias);
            }
        }
    }

    pub fn canonical_for(&self, label: &str) -> Option<&str> {
        if let Some((canonical, _)) = self.entries.iter().find(|(c, _)| c == label) {
            return Some(canonical);
        }
        self.entries
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| a == label))
            .map(|(canonical, _)| canonical.as_str())
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }
}

/// Canonical form of a single label; unknown labels pass through untouched.
pub fn canonicalize_label<'a>(label: &'a str, table: &'a LabelTable) -> &'a str {
    table.canonical_for(label).unwrap_or(label)
}

/// Replace every descriptor's label with its canonical form.
pub fn canonicalize(channels: &[ChannelDescriptor], table: &LabelTable) -> Vec<ChannelDescriptor> {
    channels
        .iter()
        .map(|c| c.with_label(canonicalize_label(&c.label, table)))
        .collect()
}

/// Annotation/integrity pseudo-channels and unlabeled slots.
pub fn is_housekeeping(label: &str) -> bool {
    let trimmed = label.trim();
    trimmed.is_empty() || HOUSEKEEPING_LABELS.contains(&trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(label: &str) -> ChannelDescriptor {
        ChannelDescriptor {
            label: label.to_string(),
            transducer: String::new(),
            physical_dimension: String::new(),
            physical_min: 0.0,
            physical_max: 1.0,
            digital_min: 0,
            digital_max: 1,
            prefilter: String::new(),
            samples_per_record: 1,
            reserved: String::new(),
        }
    }

    fn table() -> LabelTable {
        LabelTable::from_static(&[
            ("Flow", &["Flow.40ms", "Flujo.40ms"]),
            ("Pressure", &["Press.2s"]),
        ])
    }

    fn labels(channels: &[ChannelDescriptor]) -> Vec<&str> {
        channels.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_aliases_map_to_canonical() {
        let channels = vec![descriptor("Flow.40ms"), descriptor("Press.2s"), descriptor("Flujo.40ms")];
        let out = canonicalize(&channels, &table());
        assert_eq!(labels(&out), vec!["Flow", "Pressure", "Flow"]);
    }

    #[test]
    fn test_unknown_and_differently_cased_labels_pass_through() {
        let channels = vec![descriptor("Leak.2s"), descriptor("flow.40ms")];
        let out = canonicalize(&channels, &table());
        assert_eq!(labels(&out), vec!["Leak.2s", "flow.40ms"]);
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let channels = vec![descriptor("Flow.40ms"), descriptor("Press.2s"), descriptor("Other")];
        let once = canonicalize(&channels, &table());
        let twice = canonicalize(&once, &table());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_add_aliases_extends_existing_entry() {
        let mut t = table();
        t.add_aliases("Flow", ["Débit.40ms"]);
        t.add_aliases("Snore", ["Snore.2s"]);
        assert_eq!(t.canonical_for("Débit.40ms"), Some("Flow"));
        assert_eq!(t.canonical_for("Flow.40ms"), Some("Flow"));
        assert_eq!(t.canonical_for("Snore.2s"), Some("Snore"));
        assert_eq!(t.canonical_names().count(), 3);
    }

    #[test]
    fn test_housekeeping_labels() {
        assert!(is_housekeeping("EDF Annotations"));
        assert!(is_housekeeping("EDF Annotations  "));
        assert!(is_housekeeping("Crc16"));
        assert!(is_housekeeping("   "));
        assert!(!is_housekeeping("Flow.40ms"));
    }
}

//! Station name lookup.

use std::collections::HashMap;

use crate::domain::{StationId, StationIdentity};

/// Station id → display name mapping.
///
/// Built from station metadata; ids without a known name are rendered
/// with an `Unknown (<id>)` fallback label instead of failing.
#[derive(Debug, Clone, Default)]
pub struct StationNameLookup {
    names: HashMap<StationId, String>,
}

impl StationNameLookup {
    /// Build the lookup from identity records.
    ///
    /// Records missing either the id or a non-blank name are skipped.
    /// When an id repeats, the later record wins.
    pub fn from_identities(identities: &[StationIdentity]) -> Self {
        let names = identities
            .iter()
            .filter_map(|identity| {
                let id = identity.id.as_ref()?;
                let name = identity.name.as_deref().map(str::trim)?;
                if name.is_empty() {
                    return None;
                }
                Some((id.clone(), name.to_string()))
            })
            .collect();

        Self { names }
    }

    /// Look up a station name.
    pub fn get(&self, id: &StationId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// The name to display for a station, falling back to `Unknown (<id>)`.
    pub fn display_name(&self, id: &StationId) -> String {
        match self.get(id) {
            Some(name) => name.to_string(),
            None => unknown_label(id),
        }
    }

    /// Number of stations with a known name.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Fallback label for a station with no metadata.
pub fn unknown_label(id: &StationId) -> String {
    format!("Unknown ({})", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    #[test]
    fn skips_incomplete_identities() {
        let identities = vec![
            StationIdentity::new(id("3005"), "7th & Flower"),
            StationIdentity {
                id: None,
                name: Some("Orphan".to_string()),
            },
            StationIdentity {
                id: Some(id("3006")),
                name: None,
            },
            StationIdentity {
                id: Some(id("3007")),
                name: Some("  ".to_string()),
            },
        ];

        let lookup = StationNameLookup::from_identities(&identities);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get(&id("3005")), Some("7th & Flower"));
        assert_eq!(lookup.get(&id("3006")), None);
        assert_eq!(lookup.get(&id("3007")), None);
    }

    #[test]
    fn later_identity_wins() {
        let identities = vec![
            StationIdentity::new(id("3005"), "Old Name"),
            StationIdentity::new(id("3005"), "New Name"),
        ];

        let lookup = StationNameLookup::from_identities(&identities);
        assert_eq!(lookup.get(&id("3005")), Some("New Name"));
    }

    #[test]
    fn display_name_falls_back() {
        let lookup = StationNameLookup::default();
        assert!(lookup.is_empty());
        assert_eq!(lookup.display_name(&id("4214")), "Unknown (4214)");
    }
}

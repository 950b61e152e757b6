use std::collections::HashMap;
use tracing::warn;

/// A field reported in a unit other than the first one seen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitMismatch {
    pub field: String,
    pub expected: Option<String>,
    pub found: Option<String>,
    pub occurrences: u64,
}

/// Remembers the first unit seen per field and collects every later
/// disagreement.
///
/// Values are never converted. A field's numbers are fed to the histograms
/// as-is, so mismatches are surfaced to the caller instead.
#[derive(Debug, Clone, Default)]
pub struct UnitTracker {
    first_seen: HashMap<String, Option<String>>,
    mismatches: Vec<UnitMismatch>,
}

impl UnitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `unit` for `field`. Returns `false` when it disagrees with the
    /// unit the field was first seen with.
    pub fn observe(&mut self, field: &str, unit: Option<&str>) -> bool {
        let Some(expected) = self.first_seen.get(field) else {
            self.first_seen
                .insert(field.to_string(), unit.map(str::to_string));
            return true;
        };
        if expected.as_deref() == unit {
            return true;
        }

        let expected = expected.clone();
        match self
            .mismatches
            .iter_mut()
            .find(|m| m.field == field && m.found.as_deref() == unit)
        {
            Some(m) => m.occurrences += 1,
            None => {
                warn!(
                    field,
                    expected = expected.as_deref().unwrap_or("<none>"),
                    found = unit.unwrap_or("<none>"),
                    "inconsistent units, values are used unconverted"
                );
                self.mismatches.push(UnitMismatch {
                    field: field.to_string(),
                    expected,
                    found: unit.map(str::to_string),
                    occurrences: 1,
                });
            }
        }
        false
    }

    /// First unit seen for `field`; the outer `None` means never observed.
    pub fn unit_of(&self, field: &str) -> Option<Option<&str>> {
        self.first_seen.get(field).map(Option::as_deref)
    }

    pub fn mismatches(&self) -> &[UnitMismatch] {
        &self.mismatches
    }

    pub fn into_mismatches(self) -> Vec<UnitMismatch> {
        self.mismatches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_unit_wins() {
        let mut t = UnitTracker::new();
        assert!(t.observe("memory", Some("MB")));
        assert!(t.observe("memory", Some("MB")));
        assert!(!t.observe("memory", Some("GB")));
        assert_eq!(t.unit_of("memory"), Some(Some("MB")));
        assert_eq!(t.unit_of("disk"), None);
    }

    #[test]
    fn mismatches_are_grouped_by_found_unit() {
        let mut t = UnitTracker::new();
        t.observe("memory", Some("MB"));
        t.observe("memory", Some("GB"));
        t.observe("memory", Some("GB"));
        t.observe("memory", None);
        t.observe("wall_time", None);
        t.observe("wall_time", None);

        let m = t.mismatches();
        assert_eq!(m.len(), 2);
        assert_eq!(m[0].found.as_deref(), Some("GB"));
        assert_eq!(m[0].occurrences, 2);
        assert_eq!(m[1].expected.as_deref(), Some("MB"));
        assert_eq!(m[1].found, None);
    }
}

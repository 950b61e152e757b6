use crate::records::Record;
use std::collections::BTreeMap;
use tracing::warn;

/// Records partitioned by the string value of one field.
#[derive(Debug, Clone, Default)]
pub struct Grouping<'a> {
    /// Group value to members, in lexicographic order of the value.
    pub groups: BTreeMap<String, Vec<&'a Record>>,
    /// Records where the field was missing or not a string.
    pub dropped: usize,
}

impl<'a> Grouping<'a> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a Record])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

pub fn group_by_field<'a, I>(records: I, field: &str) -> Grouping<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut grouping = Grouping::default();
    for r in records {
        match r.string_field(field) {
            Some(value) => grouping
                .groups
                .entry(value.to_string())
                .or_default()
                .push(r),
            None => grouping.dropped += 1,
        }
    }
    if grouping.dropped > 0 {
        warn!(
            field,
            dropped = grouping.dropped,
            "records without a string value for the grouping field were dropped"
        );
    }
    grouping
}

/// Removes groups with fewer than `threshold` members. Returns how many
/// groups were removed.
pub fn filter_by_threshold(grouping: &mut Grouping<'_>, threshold: usize) -> usize {
    let before = grouping.groups.len();
    grouping.groups.retain(|_, members| members.len() >= threshold);
    before - grouping.groups.len()
}

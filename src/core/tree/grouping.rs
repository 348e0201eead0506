//! Record filtering and generation grouping

use crate::core::models::{GenerationKey, PersonRecord};
use crate::debug;
use std::cmp::Ordering;

/// Keep only records that can be placed in the tree
///
/// Records without a digit-only `ID` are dropped silently. Survivors keep
/// their sheet order.
#[must_use]
pub fn select_valid(records: Vec<PersonRecord>) -> Vec<PersonRecord> {
    let total = records.len();
    let valid: Vec<PersonRecord> = records
        .into_iter()
        .filter(|person| {
            let keep = person.is_valid();
            if !keep {
                debug!("Skipping record with invalid ID '{}'", person.id);
            }
            keep
        })
        .collect();
    debug!("{} of {total} records have a valid ID", valid.len());
    valid
}

/// Valid person records partitioned by generation
///
/// Iteration yields generations in numeric ascending order; within a
/// generation, records keep the order they were added in. Keys of equal
/// numeric value keep the order they first appeared in.
#[derive(Debug, Clone, Default)]
pub struct Generations {
    groups: Vec<(GenerationKey, Vec<PersonRecord>)>,
}

impl Generations {
    /// Create an empty grouping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Group already-validated records by their generation key
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PersonRecord>) -> Self {
        let mut generations = Self::new();
        for person in records {
            generations.add(person.clone());
        }
        generations
    }

    /// Add a record to the end of its generation
    pub fn add(&mut self, person: PersonRecord) {
        let key = GenerationKey::from_cell(&person.generation);
        if let Some((_, people)) = self.groups.iter_mut().find(|(k, _)| *k == key) {
            people.push(person);
            return;
        }
        let at = self
            .groups
            .partition_point(|(k, _)| k.sort_order(&key) != Ordering::Greater);
        self.groups.insert(at, (key, vec![person]));
    }

    /// Iterate over `(key, records)` in numeric generation order
    pub fn iter(&self) -> impl Iterator<Item = (&GenerationKey, &[PersonRecord])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Records of a single generation
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[PersonRecord]> {
        let key = GenerationKey::from_cell(key);
        self.groups
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Sorted generation keys
    pub fn keys(&self) -> impl Iterator<Item = &GenerationKey> {
        self.groups.iter().map(|(k, _)| k)
    }

    /// Number of generations
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no generation holds any record
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of records across all generations
    #[must_use]
    pub fn person_count(&self) -> usize {
        self.groups.iter().map(|(_, v)| v.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, generation: &str) -> PersonRecord {
        PersonRecord::new(id, generation)
    }

    #[test]
    fn test_select_valid_drops_bad_ids() {
        let records = vec![
            person("1", "1"),
            person("", "1"),
            person("x2", "1"),
            person("3", "2"),
        ];
        let valid = select_valid(records);
        let ids: Vec<&str> = valid.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_grouping_sorts_numerically() {
        let records = vec![person("1", "10"), person("2", "2"), person("3", "1")];
        let generations = Generations::from_records(&records);
        let keys: Vec<&str> = generations.keys().map(GenerationKey::as_str).collect();
        assert_eq!(keys, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_equal_numeric_keys_keep_first_seen_order() {
        let records = vec![person("1", "2"), person("2", "02"), person("3", "1")];
        let generations = Generations::from_records(&records);
        let keys: Vec<&str> = generations.keys().map(GenerationKey::as_str).collect();
        assert_eq!(keys, vec!["1", "2", "02"]);

        let records = vec![person("1", "02"), person("2", "2")];
        let generations = Generations::from_records(&records);
        let keys: Vec<&str> = generations.keys().map(GenerationKey::as_str).collect();
        assert_eq!(keys, vec!["02", "2"]);
    }

    #[test]
    fn test_blank_generation_groups_under_one() {
        let records = vec![person("1", ""), person("2", " "), person("3", "1")];
        let generations = Generations::from_records(&records);
        assert_eq!(generations.len(), 1);
        let ids: Vec<&str> = generations
            .get("1")
            .unwrap()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_order_within_generation_preserved() {
        let records = vec![person("9", "2"), person("4", "2"), person("7", "2")];
        let generations = Generations::from_records(&records);
        let ids: Vec<&str> = generations
            .get("2")
            .unwrap()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["9", "4", "7"]);
        assert_eq!(generations.person_count(), 3);
    }
}

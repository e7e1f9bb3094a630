//! FILENAME: core/subtable-engine/src/aggregate.rs
//! Composite-key aggregation.
//!
//! Counts records per composite key. Every ordering derived from an
//! aggregation is first-seen order: keys (and distinct values) iterate in
//! the order they were first produced while scanning records in input order.
//! This keeps country and classifier listings reproducible run to run.

use std::hash::Hash;

use engine::{Record, RecordSet};
use rustc_hash::FxHashMap;

use crate::key::CompositeKey;

// ============================================================================
// DISTINCT VALUES
// ============================================================================

/// Insertion-ordered set: de-duplicates values, remembering first-seen order.
#[derive(Debug, Clone)]
pub struct DistinctValues<T> {
    /// Map from value to its position (for deduplication).
    positions: FxHashMap<T, usize>,
    /// Values in first-seen order.
    ordered: Vec<T>,
}

impl<T: Clone + Eq + Hash> DistinctValues<T> {
    pub fn new() -> Self {
        DistinctValues {
            positions: FxHashMap::default(),
            ordered: Vec::new(),
        }
    }

    /// Adds a value. Returns true when it had not been seen before.
    pub fn insert(&mut self, value: T) -> bool {
        if self.positions.contains_key(&value) {
            return false;
        }
        self.positions.insert(value.clone(), self.ordered.len());
        self.ordered.push(value);
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.positions.contains_key(value)
    }

    /// First-seen position of a value.
    pub fn position(&self, value: &T) -> Option<usize> {
        self.positions.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.ordered.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.ordered
    }
}

impl<T: Clone + Eq + Hash> Default for DistinctValues<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> FromIterator<T> for DistinctValues<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut distinct = DistinctValues::new();
        for value in iter {
            distinct.insert(value);
        }
        distinct
    }
}

// ============================================================================
// KEY COUNTS
// ============================================================================

/// Count per composite key, iterated in first-seen key order.
#[derive(Debug, Clone, Default)]
pub struct KeyCounts {
    slots: FxHashMap<CompositeKey, usize>,
    entries: Vec<(CompositeKey, u64)>,
}

impl KeyCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count of a key by one.
    pub fn increment(&mut self, key: CompositeKey) {
        match self.slots.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.slots.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Count for a key; 0 when the key never occurred.
    pub fn get(&self, key: &CompositeKey) -> u64 {
        self.slots
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CompositeKey, u64)> + '_ {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    pub fn keys(&self) -> impl Iterator<Item = &CompositeKey> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Counts records per composite key.
///
/// `key_fn` may yield zero or more keys per record; each yielded key is
/// incremented by one. Empty input yields empty counts.
pub fn aggregate<F, I>(records: &RecordSet, mut key_fn: F) -> KeyCounts
where
    F: FnMut(&Record<'_>) -> I,
    I: IntoIterator<Item = CompositeKey>,
{
    let mut counts = KeyCounts::new();
    for record in records.records() {
        for key in key_fn(&record) {
            counts.increment(key);
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyValue;
    use engine::CellValue;

    fn countries() -> RecordSet {
        RecordSet::new(
            vec!["applicant".to_string(), "grant".to_string()],
            vec![
                vec![CellValue::text("US"), CellValue::text("RU")],
                vec![CellValue::text("RU"), CellValue::text("RU")],
                vec![CellValue::text("US"), CellValue::text("RU")],
                vec![CellValue::text("DE"), CellValue::text("US")],
            ],
        )
    }

    #[test]
    fn counts_pairs_in_first_seen_order() {
        let set = countries();
        let counts = aggregate(&set, |r| {
            Some(CompositeKey::new([
                KeyValue::from(r.get(0)),
                KeyValue::from(r.get(1)),
            ]))
        });

        let keys: Vec<String> = counts.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["(US, RU)", "(RU, RU)", "(DE, US)"]);
        assert_eq!(
            counts.get(&CompositeKey::new([KeyValue::text("US"), KeyValue::text("RU")])),
            2
        );
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn one_record_may_feed_several_keys() {
        let set = countries();
        let counts = aggregate(&set, |r| {
            vec![
                CompositeKey::single(KeyValue::from(r.get(0))),
                CompositeKey::single(KeyValue::from(r.get(1))),
            ]
        });
        assert_eq!(counts.get(&CompositeKey::single("RU")), 4);
        assert_eq!(counts.total(), 8);
    }

    #[test]
    fn empty_input_gives_empty_counts() {
        let set = RecordSet::new(vec!["a".to_string()], Vec::new());
        let counts = aggregate(&set, |r| Some(CompositeKey::single(KeyValue::from(r.get(0)))));
        assert!(counts.is_empty());
        assert_eq!(counts.get(&CompositeKey::single("x")), 0);
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let distinct: DistinctValues<&str> = ["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(distinct.into_vec(), vec!["b", "a", "c"]);
    }
}

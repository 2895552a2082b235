//! Ordered integer tables keyed by degree or BFS distance.

use std::collections::BTreeMap;

/// Ordered `key -> value` table, where the key is a degree or a BFS distance.
///
/// Only keys with at least one contributing vertex are present.
///
/// # Examples
/// ```
/// use strider_core::DegreeTable;
///
/// let table: DegreeTable = [(1, 10), (3, 30)].into_iter().collect();
/// assert_eq!(table.get(3), Some(30));
/// assert_eq!(table.dense(), vec![0, 10, 0, 30]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DegreeTable(BTreeMap<usize, u64>);

impl DegreeTable {
    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: usize) -> Option<u64> {
        self.0.get(&key).copied()
    }

    /// Number of keys present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no key is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(key, value)` rows in ascending key order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, u64)> + '_ {
        self.0.iter().map(|(&key, &value)| (key, value))
    }

    /// Iterates keys in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.0.keys().copied()
    }

    /// Largest key present.
    #[must_use]
    pub fn max_key(&self) -> Option<usize> {
        self.0.keys().next_back().copied()
    }

    /// Values indexed from zero up to the largest key, with gaps set to zero.
    #[must_use]
    pub fn dense(&self) -> Vec<u64> {
        let Some(max) = self.max_key() else {
            return Vec::new();
        };
        (0..=max).map(|key| self.get(key).unwrap_or(0)).collect()
    }
}

impl FromIterator<(usize, u64)> for DegreeTable {
    fn from_iter<I: IntoIterator<Item = (usize, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Per-key `(sum, count)` accumulator reduced to floored averages.
#[derive(Debug, Default)]
pub(crate) struct MeanAccumulator(BTreeMap<usize, (u128, u64)>);

impl MeanAccumulator {
    pub(crate) fn add(&mut self, key: usize, value: u64) {
        let entry = self.0.entry(key).or_default();
        entry.0 += u128::from(value);
        entry.1 += 1;
    }

    pub(crate) fn finish(self) -> DegreeTable {
        self.0
            .into_iter()
            .filter(|&(_, (_, count))| count != 0)
            .map(|(key, (sum, count))| (key, saturating_u64(sum / u128::from(count))))
            .collect()
    }
}

/// Per-key `(numerator, denominator)` sums reduced to floored ratios.
#[derive(Debug, Default)]
pub(crate) struct RatioAccumulator(BTreeMap<usize, (u128, u128)>);

impl RatioAccumulator {
    pub(crate) fn add(&mut self, key: usize, numerator: u64, denominator: u64) {
        let entry = self.0.entry(key).or_default();
        entry.0 += u128::from(numerator);
        entry.1 += u128::from(denominator);
    }

    pub(crate) fn finish(self) -> DegreeTable {
        self.0
            .into_iter()
            .filter(|&(_, (_, denominator))| denominator != 0)
            .map(|(key, (numerator, denominator))| (key, saturating_u64(numerator / denominator)))
            .collect()
    }
}

fn saturating_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

//! Store of truncated derivations.
//!
//! When the depth budget runs out the explainer records the cut-off tuple,
//! extended with its rule id and level, and hands out the entry's index so
//! the branch can be expanded later without starting from the root.

use provex_engine::{Domain, Tuple};

/// Append-only, deduplicating list of extended tuples.
///
/// Indices are positional and stay valid for the lifetime of the cache.
#[derive(Debug, Clone, Default)]
pub struct SubproofCache {
    entries: Vec<Tuple>,
}

impl SubproofCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `entry`, appending it if no equal entry is stored yet.
    pub fn insert_or_find(&mut self, entry: Tuple) -> usize {
        if let Some(idx) = self.entries.iter().position(|e| *e == entry) {
            return idx;
        }
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&[Domain]> {
        self.entries.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Domain]> {
        self.entries.iter().map(Vec::as_slice)
    }
}

/// Split an extended tuple into its user cells, rule id and level.
pub(crate) fn split_extended(entry: &[Domain]) -> Option<(&[Domain], Domain, Domain)> {
    match entry {
        [user @ .., rule_id, level] => Some((user, *rule_id, *level)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_entries_share_an_index() {
        let mut c = SubproofCache::new();
        let first = c.insert_or_find(vec![0, 2, 2, 2]);
        let again = c.insert_or_find(vec![0, 2, 2, 2]);
        assert_eq!(first, again);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn distinct_entries_get_increasing_indices() {
        let mut c = SubproofCache::new();
        let a = c.insert_or_find(vec![0, 1, 1, 1]);
        let b = c.insert_or_find(vec![1, 2, 1, 1]);
        let d = c.insert_or_find(vec![0, 1, 2, 1]);
        assert_eq!((a, b, d), (0, 1, 2));
        // earlier indices are unaffected by later insertions
        assert_eq!(c.get(0), Some(&[0, 1, 1, 1][..]));
    }

    #[test]
    fn get_out_of_range() {
        let c = SubproofCache::new();
        assert!(c.is_empty());
        assert_eq!(c.get(0), None);
    }

    #[test]
    fn iter_in_insertion_order() {
        let mut c = SubproofCache::new();
        c.insert_or_find(vec![5, 1, 1]);
        c.insert_or_find(vec![6, 1, 1]);
        let firsts: Vec<Domain> = c.iter().map(|e| e[0]).collect();
        assert_eq!(firsts, vec![5, 6]);
    }

    #[test]
    fn split_extended_takes_trailing_pair() {
        assert_eq!(
            split_extended(&[7, 8, 2, 3]),
            Some((&[7, 8][..], 2, 3))
        );
        assert_eq!(split_extended(&[2, 3]), Some((&[][..], 2, 3)));
        assert_eq!(split_extended(&[1]), None);
    }
}

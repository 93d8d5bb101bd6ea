//! Basket

use smallvec::SmallVec;

use crate::items::{CATALOG_SIZE, ItemId};

/// Per-variant counts of the items in a basket.
///
/// Pricing only depends on how many of each variant remain, never on which particular items
/// or in which order, so the solvers work on tallies rather than item lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Tally {
    counts: [u32; CATALOG_SIZE],
}

impl Tally {
    /// Count the items in a basket.
    pub fn from_items(items: &[ItemId]) -> Self {
        let mut tally = Tally::default();

        for item in items {
            if let Some(count) = tally.counts.get_mut(item.index()) {
                *count = count.saturating_add(1);
            }
        }

        tally
    }

    /// Build a tally from explicit per-variant counts, ordered by catalog position.
    pub const fn from_counts(counts: [u32; CATALOG_SIZE]) -> Self {
        Tally { counts }
    }

    /// Per-variant counts, ordered by catalog position.
    pub const fn counts(&self) -> &[u32; CATALOG_SIZE] {
        &self.counts
    }

    /// Number of items of the given variant.
    pub fn count(&self, item: ItemId) -> u32 {
        self.counts.get(item.index()).copied().unwrap_or_default()
    }

    /// Total number of items.
    pub fn len(&self) -> u64 {
        self.counts.iter().copied().map(u64::from).sum()
    }

    /// Whether no items remain.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|count| *count == 0)
    }

    /// One representative of every variant that has at least one item, in catalog order.
    pub fn slice(&self) -> SmallVec<[ItemId; CATALOG_SIZE]> {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .filter_map(|(idx, _)| ItemId::from_index(idx))
            .collect()
    }

    /// If every present variant occurs equally often, returns that count and the number of
    /// present variants.
    pub fn uniform(&self) -> Option<(u32, usize)> {
        let mut present = self.counts.iter().copied().filter(|count| *count > 0);
        let first = present.next()?;
        let mut variants = 1;

        for count in present {
            if count != first {
                return None;
            }

            variants += 1;
        }

        Some((first, variants))
    }

    /// Removes one item of each of the given variants.
    #[must_use]
    pub fn without(mut self, items: &[ItemId]) -> Self {
        for item in items {
            if let Some(count) = self.counts.get_mut(item.index()) {
                *count = count.saturating_sub(1);
            }
        }

        self
    }

    /// Canonical memo key for this tally.
    pub fn signature(&self) -> Signature {
        let mut counts: SmallVec<[u32; CATALOG_SIZE]> = self
            .counts
            .iter()
            .copied()
            .filter(|count| *count > 0)
            .collect();

        counts.sort_unstable();

        Signature(counts)
    }
}

/// Sorted non-zero per-variant counts.
///
/// Two baskets share a signature exactly when one can be turned into the other by relabelling
/// variants, which leaves their cheapest grouping price unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(SmallVec<[u32; CATALOG_SIZE]>);

impl Signature {
    /// The sorted counts.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{items::item_ids, validation::ValidationError};

    use super::*;

    fn tally(ids: &[i64]) -> Result<Tally, ValidationError> {
        Ok(Tally::from_items(&item_ids(ids.iter().copied())?))
    }

    #[test]
    fn from_items_counts_each_variant() -> TestResult {
        let tally = tally(&[1, 1, 2, 5, 5, 5])?;

        assert_eq!(tally.counts(), &[2, 1, 0, 0, 3]);
        assert_eq!(tally.count(ItemId::new(5)?), 3);
        assert_eq!(tally.len(), 6);
        assert!(!tally.is_empty());

        Ok(())
    }

    #[test]
    fn empty_tally() {
        let tally = Tally::from_items(&[]);

        assert!(tally.is_empty());
        assert_eq!(tally.len(), 0);
        assert!(tally.slice().is_empty());
        assert_eq!(tally.uniform(), None);
        assert!(tally.signature().as_slice().is_empty());
    }

    #[test]
    fn slice_takes_one_of_each_present_variant() -> TestResult {
        let tally = tally(&[4, 2, 2, 4, 4])?;
        let slice: Vec<u8> = tally.slice().iter().map(|id| id.get()).collect();

        assert_eq!(slice, vec![2, 4]);

        Ok(())
    }

    #[test]
    fn uniform_detects_equal_counts() -> TestResult {
        assert_eq!(tally(&[1, 2, 3, 1, 2, 3])?.uniform(), Some((2, 3)));
        assert_eq!(tally(&[4])?.uniform(), Some((1, 1)));
        assert_eq!(tally(&[1, 1, 2])?.uniform(), None);

        Ok(())
    }

    #[test]
    fn without_removes_one_of_each() -> TestResult {
        let tally = tally(&[1, 1, 2, 3])?;
        let reduced = tally.without(&[ItemId::new(1)?, ItemId::new(3)?]);

        assert_eq!(reduced.counts(), &[1, 1, 0, 0, 0]);

        Ok(())
    }

    #[test]
    fn signature_ignores_variant_labels() -> TestResult {
        let a = tally(&[1, 1, 1, 2, 2, 2, 3])?;
        let b = tally(&[5, 4, 4, 4, 2, 2, 2])?;

        assert_eq!(a.signature(), b.signature());
        assert_eq!(a.signature().as_slice(), &[1, 3, 3]);

        Ok(())
    }

    #[test]
    fn signature_distinguishes_different_shapes() -> TestResult {
        let a = tally(&[1, 1, 2, 2])?;
        let b = tally(&[1, 1, 1, 2])?;
        let c = tally(&[1, 2, 3, 4])?;

        assert_ne!(a.signature(), b.signature());
        assert_ne!(a.signature(), c.signature());

        Ok(())
    }
}

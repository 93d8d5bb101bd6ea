//! Solvers for basket pricing

use smallvec::SmallVec;

use crate::{
    basket::Tally,
    items::{CATALOG_SIZE, ItemId},
    prices::Price,
};

pub mod frequency;
pub mod partition;

/// One discounted group of distinct variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Variants in the group, one item each
    pub items: SmallVec<[ItemId; CATALOG_SIZE]>,

    /// Discounted price of the whole group
    pub price: Price,
}

impl Group {
    /// Number of items in the group.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cheapest price for a basket, together with one grouping that achieves it.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    /// Total cost of the basket after discounts
    pub total: Price,

    /// Groups the basket was split into, largest first
    pub groups: SmallVec<[Group; 10]>,
}

/// Trait for pricing a basket at its cheapest possible grouping
pub trait Solver {
    /// Minimum total price for the given items.
    ///
    /// An empty basket costs nothing.
    fn price(&mut self, items: &[ItemId]) -> Price;
}

/// Non-empty subsets of `0..variants` as bitmasks, largest subsets first.
///
/// Bigger groups earn bigger discounts, so trying them first finds good completions early and
/// lets later branches reuse memoized results.
pub(crate) fn subsets_largest_first(variants: usize) -> impl Iterator<Item = u32> {
    let full = 1_u32 << variants;

    (1..=variants).rev().flat_map(move |size| {
        (1..full)
            .rev()
            .filter(move |mask| usize::try_from(mask.count_ones()).is_ok_and(|ones| ones == size))
    })
}

/// Items of `slice` selected by the bits of `mask`.
pub(crate) fn pick(slice: &[ItemId], mask: u32) -> SmallVec<[ItemId; CATALOG_SIZE]> {
    slice
        .iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1 << bit) != 0)
        .map(|(_, item)| *item)
        .collect()
}

/// Search state for a tally whose cheapest completion is still unknown.
///
/// Solvers keep frames on an explicit stack rather than recursing, so basket size is bounded by
/// memory instead of the thread's stack.
pub(crate) struct Frame {
    pub(crate) tally: Tally,

    /// Candidate groups not yet tried
    masks: smallvec::IntoIter<[u32; 32]>,

    /// Price of the group that led to the frame above this one
    pending: Price,

    best: Option<Price>,
}

impl Frame {
    pub(crate) fn new(tally: Tally, masks: impl IntoIterator<Item = u32>) -> Self {
        let masks: SmallVec<[u32; 32]> = masks.into_iter().collect();

        Frame {
            tally,
            masks: masks.into_iter(),
            pending: Price::zero(),
            best: None,
        }
    }

    /// Next candidate group to try.
    pub(crate) fn next_mask(&mut self) -> Option<u32> {
        self.masks.next()
    }

    /// Records a candidate total.
    pub(crate) fn consider(&mut self, price: Price) {
        self.best = Some(self.best.map_or(price, |best| best.min(price)));
    }

    /// Parks `group_price` while the frame pushed above this one is searched.
    pub(crate) fn descend(&mut self, group_price: Price) {
        self.pending = group_price;
    }

    /// Resumes after the frame above finished with `completion`.
    pub(crate) fn resume(&mut self, completion: Price) {
        self.consider(self.pending + completion);
    }

    /// Cheapest total seen so far.
    pub(crate) fn best(&self) -> Price {
        self.best.unwrap_or_default()
    }
}

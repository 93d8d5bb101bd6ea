//! Optimal partition solver
//!
//! Splits a basket into groups of distinct variants so that the total discounted price is as
//! low as possible. Taking one item of every present variant gives a slice of at most
//! [`CATALOG_SIZE`] items; every non-empty subset of that slice is a candidate next group, and
//! the rest of the basket is priced the same way. The cheapest way to finish pricing a remaining
//! basket (its completion cost) only depends on the sorted per-variant counts, so completion
//! costs are memoized on the basket's [`Signature`] and reused whenever another branch reaches
//! an equivalent basket.
//!
//! A remaining basket in which every present variant occurs equally often is priced directly as
//! full groups, provided the catalog never charges more per item for a bigger group. Otherwise
//! it is searched like any other basket.
//!
//! The search runs on an explicit stack, so very large baskets only cost memory.
//!
//! The memo is owned by the solver and is never evicted automatically. Long-running processes
//! should call [`PartitionSolver::purge_cache`] periodically.

use std::cmp::Reverse;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{Span, debug, trace};

use crate::{
    basket::{Signature, Tally},
    catalog::Catalog,
    items::{CATALOG_SIZE, ItemId},
    prices::Price,
    solvers::{Frame, Group, Solver, SolverResult, pick, subsets_largest_first},
};

/// Memoized optimal partition solver.
///
/// A solver needs `&mut self` to price anything, so sharing one between threads requires
/// wrapping it in a lock; one solver per caller avoids the contention entirely.
#[derive(Debug, Clone)]
pub struct PartitionSolver {
    catalog: Catalog,

    /// Price of one group of each size, smallest first
    group_prices: [Price; CATALOG_SIZE],

    /// Signature -> cheapest completion cost
    memo: FxHashMap<Signature, Price>,

    /// Whether full groups are always cheapest for equal counts under this catalog
    uniform_fast_path: bool,
}

impl PartitionSolver {
    /// Create a solver for the given catalog with an empty memo.
    pub fn new(catalog: Catalog) -> Self {
        PartitionSolver {
            group_prices: catalog.discounts().group_prices(catalog.base_price()),
            uniform_fast_path: catalog.discounts().favours_larger_groups(),
            catalog,
            memo: FxHashMap::default(),
        }
    }

    /// The catalog this solver prices against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Minimum total price for the given items.
    #[tracing::instrument(
        name = "partition.price",
        level = "debug",
        skip_all,
        fields(items = items.len(), cached = tracing::field::Empty)
    )]
    pub fn price(&mut self, items: &[ItemId]) -> Price {
        let total = self.completion(Tally::from_items(items));

        Span::current().record("cached", self.memo.len());

        total
    }

    /// Minimum total price for the given items, along with one grouping that achieves it.
    #[tracing::instrument(
        name = "partition.solve",
        level = "debug",
        skip_all,
        fields(items = items.len(), groups = tracing::field::Empty)
    )]
    pub fn solve(&mut self, items: &[ItemId]) -> SolverResult {
        let tally = Tally::from_items(items);
        let total = self.completion(tally);
        let groups = self.groups(tally);

        Span::current().record("groups", groups.len());

        SolverResult { total, groups }
    }

    /// Discard every memoized completion cost.
    pub fn purge_cache(&mut self) {
        debug!(entries = self.memo.len(), "purging partition cache");

        self.memo = FxHashMap::default();
    }

    /// Number of memoized completion costs.
    pub fn cache_len(&self) -> usize {
        self.memo.len()
    }

    /// Cheapest price for grouping every item in `tally`.
    fn completion(&mut self, tally: Tally) -> Price {
        if let Some(price) = self.known(&tally) {
            return price;
        }

        let mut stack = vec![Self::frame(tally)];
        let mut total = Price::zero();

        while let Some(frame) = stack.last_mut() {
            if let Some(mask) = frame.next_mask() {
                let group = pick(&frame.tally.slice(), mask);
                let price = self.group_price(group.len());
                let rest = frame.tally.without(&group);

                match self.known(&rest) {
                    Some(completion) => frame.consider(price + completion),
                    None => {
                        frame.descend(price);
                        stack.push(Self::frame(rest));
                    }
                }

                continue;
            }

            let best = frame.best();

            if let Some(done) = stack.pop() {
                self.memo.insert(done.tally.signature(), best);
            }

            match stack.last_mut() {
                Some(parent) => parent.resume(best),
                None => total = best,
            }
        }

        total
    }

    /// Completion cost that needs no search: empty baskets, memo hits and, when the discount
    /// table allows it, baskets with equal counts of every present variant.
    fn known(&self, tally: &Tally) -> Option<Price> {
        if tally.is_empty() {
            return Some(Price::zero());
        }

        let signature = tally.signature();

        if let Some(price) = self.memo.get(&signature) {
            trace!(signature = ?signature.as_slice(), "memo hit");

            return Some(*price);
        }

        // Equal counts: one full group per occurrence is optimal.
        if let Some((count, variants)) = self.uniform(tally) {
            return Some(self.uniform_price(count, variants));
        }

        trace!(signature = ?signature.as_slice(), "memo miss");

        None
    }

    fn frame(tally: Tally) -> Frame {
        Frame::new(tally, subsets_largest_first(tally.slice().len()))
    }

    /// Walks the memo back down to recover the groups behind a completion cost.
    fn groups(&mut self, mut tally: Tally) -> SmallVec<[Group; 10]> {
        let mut groups: SmallVec<[Group; 10]> = SmallVec::new();

        while !tally.is_empty() {
            let slice = tally.slice();

            if let Some((count, variants)) = self.uniform(&tally) {
                let price = self.group_price(variants);

                groups.extend((0..count).map(|_| Group {
                    items: slice.clone(),
                    price,
                }));

                break;
            }

            let target = self.completion(tally);
            let mut chosen = None;

            for mask in subsets_largest_first(slice.len()) {
                let items = pick(&slice, mask);
                let price = self.group_price(items.len());

                if price + self.completion(tally.without(&items)) == target {
                    chosen = Some(Group { items, price });

                    break;
                }
            }

            let Some(group) = chosen else {
                unreachable!("the memoized completion cost always comes from some subset");
            };

            tally = tally.without(&group.items);
            groups.push(group);
        }

        groups.sort_by_key(|group| Reverse(group.len()));

        groups
    }

    /// Count and variant total of a tally that takes the fast path.
    fn uniform(&self, tally: &Tally) -> Option<(u32, usize)> {
        if self.uniform_fast_path {
            tally.uniform()
        } else {
            None
        }
    }

    fn group_price(&self, size: usize) -> Price {
        let Some(price) = size
            .checked_sub(1)
            .and_then(|idx| self.group_prices.get(idx))
        else {
            unreachable!("groups hold between one and CATALOG_SIZE items");
        };

        *price
    }

    fn uniform_price(&self, count: u32, variants: usize) -> Price {
        let Some(price) = self.catalog.discounts().price_of(
            self.catalog.base_price(),
            variants,
            u64::from(count),
        ) else {
            unreachable!("a tally never holds more than CATALOG_SIZE variants");
        };

        price
    }
}

impl Default for PartitionSolver {
    fn default() -> Self {
        PartitionSolver::new(Catalog::default())
    }
}

impl Solver for PartitionSolver {
    fn price(&mut self, items: &[ItemId]) -> Price {
        PartitionSolver::price(self, items)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use rusty_money::iso::EUR;

    use crate::{discounts::DiscountTable, items::item_ids, validation::ValidationError};

    use super::*;

    fn price(ids: &[i64]) -> Result<u64, ValidationError> {
        let items = item_ids(ids.iter().copied())?;

        Ok(*PartitionSolver::default().price(&items))
    }

    #[test]
    fn empty_basket_is_free() -> TestResult {
        assert_eq!(price(&[])?, 0);

        Ok(())
    }

    #[test]
    fn single_item_costs_base_price() -> TestResult {
        for id in 1..=5 {
            assert_eq!(price(&[id])?, 800);
        }

        Ok(())
    }

    #[test]
    fn distinct_items_get_group_discount() -> TestResult {
        assert_eq!(price(&[1, 2])?, 1520);
        assert_eq!(price(&[1, 2, 3])?, 2160);
        assert_eq!(price(&[1, 2, 3, 4])?, 2560);
        assert_eq!(price(&[1, 2, 3, 4, 5])?, 3000);

        Ok(())
    }

    #[test]
    fn duplicates_cannot_share_a_group() -> TestResult {
        assert_eq!(price(&[1, 1])?, 1600);
        assert_eq!(price(&[1, 1, 2])?, 1520 + 800);

        Ok(())
    }

    #[test]
    fn two_groups_of_four_beat_five_and_three() -> TestResult {
        assert_eq!(price(&[1, 1, 2, 2, 3, 3, 4, 5])?, 5120);

        Ok(())
    }

    #[test]
    fn memo_holds_only_non_uniform_signatures() -> TestResult {
        let items = item_ids([1, 1, 2, 2, 3, 3, 4, 5])?;
        let mut solver = PartitionSolver::default();

        solver.price(&items);

        let top = Tally::from_counts([1, 2, 1, 2, 2]).signature();
        let uniform = Tally::from_counts([1, 1, 1, 1, 0]).signature();

        assert_eq!(solver.memo.get(&top), Some(&Price::new(5120)));
        assert!(!solver.memo.contains_key(&uniform));

        Ok(())
    }

    #[test]
    fn purge_cache_empties_memo() -> TestResult {
        let items = item_ids([1, 1, 2, 3])?;
        let mut solver = PartitionSolver::default();

        let before = solver.price(&items);
        solver.purge_cache();

        assert_eq!(solver.cache_len(), 0);
        assert_eq!(solver.price(&items), before);

        Ok(())
    }

    #[test]
    fn solve_groups_add_up_to_total() -> TestResult {
        let items = item_ids([1, 1, 2, 2, 3, 3, 4, 5])?;
        let result = PartitionSolver::default().solve(&items);

        let sizes: Vec<usize> = result.groups.iter().map(Group::len).collect();
        let sum: Price = result.groups.iter().map(|group| group.price).sum();

        assert_eq!(sizes, vec![4, 4]);
        assert_eq!(sum, result.total);
        assert_eq!(result.total, Price::new(5120));

        Ok(())
    }

    #[test]
    fn solve_expands_uniform_baskets() -> TestResult {
        let items = item_ids([2, 4, 2, 4, 2, 4])?;
        let result = PartitionSolver::default().solve(&items);

        assert_eq!(result.groups.len(), 3);
        assert!(result.groups.iter().all(|group| group.len() == 2));
        assert_eq!(result.total, Price::new(3 * 1520));

        Ok(())
    }

    #[test]
    fn solve_empty_basket() {
        let result = PartitionSolver::default().solve(&[]);

        assert_eq!(result.total, Price::zero());
        assert!(result.groups.is_empty());
    }

    fn pairs_catalog() -> TestResult<Catalog> {
        let discounts = DiscountTable::from_multipliers([
            (1, 1.0),
            (2, 0.5),
            (3, 1.0),
            (4, 1.0),
            (5, 1.0),
        ])?;

        Ok(Catalog::new(Price::new(800), discounts, EUR))
    }

    #[test]
    fn equal_counts_are_searched_when_smaller_groups_are_cheaper() -> TestResult {
        let mut solver = PartitionSolver::new(pairs_catalog()?);
        let items = item_ids([1, 2, 3, 4])?;

        assert_eq!(solver.price(&items), Price::new(1600));

        let uniform = Tally::from_counts([1, 1, 1, 1, 0]).signature();

        assert_eq!(solver.memo.get(&uniform), Some(&Price::new(1600)));

        Ok(())
    }

    #[test]
    fn solve_splits_equal_counts_into_cheaper_pairs() -> TestResult {
        let items = item_ids([1, 2, 3, 4, 1, 2, 3, 4])?;
        let result = PartitionSolver::new(pairs_catalog()?).solve(&items);

        assert_eq!(result.total, Price::new(3200));
        assert_eq!(result.groups.len(), 4);
        assert!(result.groups.iter().all(|group| group.len() == 2));
        assert_eq!(result.groups.iter().map(|group| group.price).sum::<Price>(), result.total);

        Ok(())
    }
}

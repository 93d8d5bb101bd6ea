//! Frequency table solver
//!
//! A straightforward baseline: memoizes on the raw per-variant counts and, at every step, tries
//! each of the `2^CATALOG_SIZE - 1` variant subsets whose variants are all still in stock. It
//! has no fast path and no relabelling of equivalent baskets, which makes it slower than
//! [`PartitionSolver`](super::partition::PartitionSolver) but simple enough to check it against.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    basket::Tally,
    catalog::Catalog,
    items::{CATALOG_SIZE, ItemId},
    prices::Price,
    solvers::{Frame, Solver, pick, subsets_largest_first},
};

/// Baseline solver with a fresh memo per basket.
#[derive(Debug, Clone, Copy)]
pub struct FrequencySolver {
    group_prices: [Price; CATALOG_SIZE],
}

impl FrequencySolver {
    /// Create a solver for the given catalog.
    pub fn new(catalog: &Catalog) -> Self {
        FrequencySolver {
            group_prices: catalog.discounts().group_prices(catalog.base_price()),
        }
    }

    fn completion(&self, root: Tally) -> Price {
        if root.is_empty() {
            return Price::zero();
        }

        let catalog: SmallVec<[ItemId; CATALOG_SIZE]> = ItemId::all().collect();
        let mut memo: FxHashMap<Tally, Price> = FxHashMap::default();
        let mut stack = vec![Frame::new(root, in_stock(&catalog, root))];
        let mut total = Price::zero();

        while let Some(frame) = stack.last_mut() {
            if let Some(mask) = frame.next_mask() {
                let group = pick(&catalog, mask);
                let price = self.group_price(group.len());
                let rest = frame.tally.without(&group);

                if rest.is_empty() {
                    frame.consider(price);
                } else if let Some(completion) = memo.get(&rest) {
                    frame.consider(price + *completion);
                } else {
                    frame.descend(price);
                    stack.push(Frame::new(rest, in_stock(&catalog, rest)));
                }

                continue;
            }

            let best = frame.best();

            if let Some(done) = stack.pop() {
                memo.insert(done.tally, best);
            }

            match stack.last_mut() {
                Some(parent) => parent.resume(best),
                None => total = best,
            }
        }

        total
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
}

/// Masks over the whole catalog whose variants all remain in `tally`.
fn in_stock(catalog: &[ItemId], tally: Tally) -> impl Iterator<Item = u32> {
    subsets_largest_first(catalog.len())
        .filter(move |mask| pick(catalog, *mask).iter().all(|item| tally.count(*item) > 0))
}

impl Default for FrequencySolver {
    fn default() -> Self {
        FrequencySolver::new(&Catalog::default())
    }
}

impl Solver for FrequencySolver {
    fn price(&mut self, items: &[ItemId]) -> Price {
        self.completion(Tally::from_items(items))
    }
}

//! Discounts

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{items::CATALOG_SIZE, prices::Price};

/// Errors specific to building a discount table.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// No multiplier was supplied for a group size the catalog can form.
    #[error("no discount defined for groups of {0} distinct items")]
    MissingGroupSize(usize),

    /// A multiplier was supplied for a group size the catalog can never form.
    #[error("groups of {0} distinct items are impossible with a catalog of {CATALOG_SIZE}")]
    UnexpectedGroupSize(usize),

    /// A multiplier fell outside `[0, 1]`.
    #[error("discount multiplier {multiplier} for groups of {group_size} must be within [0, 1]")]
    OutOfRange {
        /// Group size the multiplier was given for
        group_size: usize,

        /// The rejected multiplier
        multiplier: f64,
    },
}

/// Discount multiplier per group size.
///
/// A group of `n` distinct variants costs `base price × n × multiplier(n)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountTable {
    multipliers: [Percentage; CATALOG_SIZE],
}

impl DiscountTable {
    /// Build a table from `(group size, multiplier)` pairs.
    ///
    /// Every group size in `1..=CATALOG_SIZE` must be present. If a size appears more than once,
    /// the last multiplier given for it is used.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if a size is missing or impossible, or a multiplier lies
    /// outside `[0, 1]`.
    pub fn from_multipliers(
        entries: impl IntoIterator<Item = (usize, f64)>,
    ) -> Result<Self, DiscountError> {
        let mut multipliers: [Option<Percentage>; CATALOG_SIZE] = [None; CATALOG_SIZE];

        for (group_size, multiplier) in entries {
            let Some(slot) = group_size
                .checked_sub(1)
                .and_then(|idx| multipliers.get_mut(idx))
            else {
                return Err(DiscountError::UnexpectedGroupSize(group_size));
            };

            if !(0.0..=1.0).contains(&multiplier) {
                return Err(DiscountError::OutOfRange {
                    group_size,
                    multiplier,
                });
            }

            *slot = Some(Percentage::from(multiplier));
        }

        let mut table = [Percentage::from(1.0); CATALOG_SIZE];

        for (idx, (slot, multiplier)) in table.iter_mut().zip(multipliers).enumerate() {
            *slot = multiplier.ok_or(DiscountError::MissingGroupSize(idx + 1))?;
        }

        Ok(DiscountTable { multipliers: table })
    }

    /// Multiplier applied to a group of `group_size` distinct items.
    pub fn multiplier(&self, group_size: usize) -> Option<Percentage> {
        group_size
            .checked_sub(1)
            .and_then(|idx| self.multipliers.get(idx))
            .copied()
    }

    /// Price of one group of `group_size` distinct items at `base_price` each.
    pub fn group_price(&self, base_price: Price, group_size: usize) -> Option<Price> {
        self.price_of(base_price, group_size, 1)
    }

    /// Price of `groups` identical groups of `group_size` distinct items, discounted once over
    /// the whole amount.
    pub fn price_of(&self, base_price: Price, group_size: usize, groups: u64) -> Option<Price> {
        let multiplier = self.multiplier(group_size)?;
        let items = u64::try_from(group_size).ok()?.checked_mul(groups)?;

        Some(base_price.scale(items).apply_discount(multiplier))
    }

    /// Price of one group of every size at `base_price` each, smallest group first.
    pub fn group_prices(&self, base_price: Price) -> [Price; CATALOG_SIZE] {
        let mut prices = [Price::zero(); CATALOG_SIZE];
        let mut undiscounted = base_price;

        for (price, multiplier) in prices.iter_mut().zip(self.multipliers) {
            *price = undiscounted.apply_discount(multiplier);
            undiscounted = undiscounted + base_price;
        }

        prices
    }

    /// Whether growing a group never raises the price per item.
    ///
    /// Only then is splitting a basket with equal counts of every present variant into full
    /// groups guaranteed to be cheapest.
    pub fn favours_larger_groups(&self) -> bool {
        self.multipliers
            .iter()
            .zip(self.multipliers.iter().skip(1))
            .all(|(smaller, larger)| (*larger) * Decimal::ONE <= (*smaller) * Decimal::ONE)
    }

    /// Iterate over `(group size, multiplier)` pairs, smallest group first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Percentage)> + '_ {
        self.multipliers
            .iter()
            .enumerate()
            .map(|(idx, multiplier)| (idx + 1, *multiplier))
    }
}

impl Default for DiscountTable {
    /// 0%, 5%, 10%, 20% and 25% off for groups of one to five distinct items.
    fn default() -> Self {
        DiscountTable {
            multipliers: [
                Percentage::from(1.0),
                Percentage::from(0.95),
                Percentage::from(0.9),
                Percentage::from(0.8),
                Percentage::from(0.75),
            ],
        }
    }
}

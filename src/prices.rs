//! Prices

use std::{
    iter::Sum,
    ops::{Add, Deref},
};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

use crate::validation::ValidationError;

/// Represents a non-negative price in pence/cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Creates a new Price
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// A price of nothing.
    pub const fn zero() -> Self {
        Price { value: 0 }
    }

    /// Creates a price from a signed number of minor units.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPrice`] if `minor` is negative.
    pub fn from_minor_units(minor: i64) -> Result<Self, ValidationError> {
        let Ok(value) = u64::try_from(minor) else {
            return Err(ValidationError::InvalidPrice(minor));
        };

        Ok(Price { value })
    }

    /// Creates a price from an amount in major units (e.g. euros), rounding half-up to the
    /// nearest minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPriceAmount`] if `major` is negative, not finite, or
    /// too large to be held in minor units.
    pub fn from_major_units(major: f64) -> Result<Self, ValidationError> {
        if !major.is_finite() || major < 0.0 {
            return Err(ValidationError::InvalidPriceAmount(major));
        }

        Decimal::from_f64_retain(major)
            .and_then(Self::from_major_decimal)
            .ok_or(ValidationError::InvalidPriceAmount(major))
    }

    /// Number of minor units.
    pub const fn minor_units(&self) -> u64 {
        self.value
    }

    /// Whether this price is zero.
    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Adds a number of minor units to this price.
    #[must_use]
    pub const fn add_minor_units(self, minor: u64) -> Self {
        Price::new(self.value.saturating_add(minor))
    }

    /// Multiplies this price by a whole quantity.
    #[must_use]
    pub const fn scale(self, quantity: u64) -> Self {
        Price::new(self.value.saturating_mul(quantity))
    }

    /// Applies a discount multiplier (e.g. `0.95` for 5% off).
    ///
    /// The discounted amount is re-normalised through major units, so rounding happens exactly
    /// as in [`Price::from_major_units`]. Multipliers below zero yield a zero price.
    #[must_use]
    pub fn apply_discount(self, multiplier: Percentage) -> Self {
        // decimal_percentage doesn't expose the underlying Decimal
        let multiplier = multiplier * Decimal::ONE;

        Decimal::from(self.value)
            .checked_mul(multiplier)
            .and_then(|minor| minor.checked_div(Decimal::ONE_HUNDRED))
            .and_then(Self::from_major_decimal)
            .unwrap_or(if multiplier.is_sign_negative() {
                Price::zero()
            } else {
                Price::new(u64::MAX)
            })
    }

    /// Converts this price to a displayable amount of money in the given currency.
    ///
    /// Returns `None` if the amount doesn't fit in signed minor units.
    pub fn to_money(self, currency: &Currency) -> Option<Money<'_, Currency>> {
        i64::try_from(self.value)
            .ok()
            .map(|minor| Money::from_minor(minor, currency))
    }

    fn from_major_decimal(major: Decimal) -> Option<Self> {
        major
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .map(Price::new)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, other: Price) -> Self::Output {
        self.add_minor_units(other.value)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::zero(), Add::add)
    }
}

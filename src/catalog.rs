//! Catalog configuration

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{Findable, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    discounts::{DiscountError, DiscountTable},
    prices::Price,
    validation::ValidationError,
};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid base price
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Invalid discount table
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Catalog file as written in YAML.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    /// ISO currency code used for display
    #[serde(default = "default_currency_code")]
    currency: String,

    /// Price of a single item in minor units
    base_price: i64,

    /// Group size -> discount multiplier
    discounts: FxHashMap<usize, f64>,
}

fn default_currency_code() -> String {
    "EUR".to_string()
}

/// Pricing rules for one catalog: what an item costs and how groups are discounted.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    base_price: Price,
    discounts: DiscountTable,
    currency: &'static Currency,
}

impl Catalog {
    /// Base price of a single item in the reference catalog.
    pub const BASE_PRICE: Price = Price::new(800);

    /// Create a catalog from its parts.
    pub fn new(base_price: Price, discounts: DiscountTable, currency: &'static Currency) -> Self {
        Catalog {
            base_price,
            discounts,
            currency,
        }
    }

    /// Parse a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the document is malformed, the base price is negative, the
    /// currency is unknown or the discount table is incomplete or out of range.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(yaml)?;

        let Some(currency) = Currency::find(&file.currency) else {
            return Err(CatalogError::UnknownCurrency(file.currency));
        };

        Ok(Catalog {
            base_price: Price::from_minor_units(file.base_price)?,
            discounts: DiscountTable::from_multipliers(file.discounts)?,
            currency,
        })
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed; see [`Catalog::from_yaml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Price of a single item.
    pub fn base_price(&self) -> Price {
        self.base_price
    }

    /// Discount multipliers per group size.
    pub fn discounts(&self) -> &DiscountTable {
        &self.discounts
    }

    /// Currency used when displaying prices.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(
            Catalog::BASE_PRICE,
            DiscountTable::default(),
            rusty_money::iso::EUR,
        )
    }
}

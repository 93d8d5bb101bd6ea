//! Validation

use thiserror::Error;

/// Errors raised when constructing value types from raw numeric input.
///
/// An invalid price is reported by one of two variants depending on the constructor it came
/// through: [`ValidationError::InvalidPrice`] carries the rejected minor units given to
/// [`Price::from_minor_units`](crate::prices::Price::from_minor_units), and
/// [`ValidationError::InvalidPriceAmount`] carries the rejected major amount given to
/// [`Price::from_major_units`](crate::prices::Price::from_major_units). Both messages name the
/// `'price'` argument.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A price was constructed from a negative number of minor units.
    #[error("could not construct price: invalid argument 'price' = {0} minor units, must not be negative")]
    InvalidPrice(i64),

    /// A price was constructed from a negative, non-finite or unrepresentable major unit amount.
    #[error(
        "could not construct price: invalid argument 'price' = {0}, must be a finite, non-negative amount"
    )]
    InvalidPriceAmount(f64),

    /// An item id fell outside the catalog range.
    #[error("could not construct item: invalid argument 'id' = {id}, must be between 1 and {max}")]
    InvalidItemId {
        /// The rejected id
        id: i64,

        /// Largest valid id
        max: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_price_message_names_field_and_constraint() {
        let message = ValidationError::InvalidPrice(-1).to_string();

        assert!(message.contains("'price' = -1"));
        assert!(message.contains("must not be negative"));
    }

    #[test]
    fn invalid_price_amount_message_names_field_and_constraint() {
        let message = ValidationError::InvalidPriceAmount(-1.5).to_string();

        assert!(message.contains("'price' = -1.5"));
        assert!(message.contains("finite, non-negative"));
    }

    #[test]
    fn invalid_item_id_message_names_range() {
        let message = ValidationError::InvalidItemId { id: 6, max: 5 }.to_string();

        assert!(message.contains("'id' = 6"));
        assert!(message.contains("between 1 and 5"));
    }
}

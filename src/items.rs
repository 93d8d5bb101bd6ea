//! Items

use std::fmt;

use crate::validation::ValidationError;

/// Number of distinct variants in the catalog.
pub const CATALOG_SIZE: usize = 5;

/// Identifies which catalog variant an item belongs to (`1..=CATALOG_SIZE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u8);

impl ItemId {
    /// Creates an item id, validating it lies within the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidItemId`] if `id` is outside `1..=CATALOG_SIZE`.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        match u8::try_from(id) {
            Ok(value) if (1..=MAX_ID).contains(&value) => Ok(ItemId(value)),
            _ => Err(ValidationError::InvalidItemId { id, max: MAX_ID }),
        }
    }

    /// Every item id in the catalog, in ascending order.
    pub fn all() -> impl Iterator<Item = ItemId> {
        (1..=MAX_ID).map(ItemId)
    }

    /// The numeric id.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position of this variant in the catalog.
    pub(crate) fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    /// Item id for a zero-based catalog position.
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index + 1)
            .ok()
            .filter(|id| *id <= MAX_ID)
            .map(ItemId)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the catalog is far smaller than u8::MAX"
)]
const MAX_ID: u8 = CATALOG_SIZE as u8;

impl TryFrom<i64> for ItemId {
    type Error = ValidationError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        ItemId::new(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Validates a list of raw ids, failing on the first invalid one.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidItemId`] for the first id outside the catalog.
pub fn item_ids(ids: impl IntoIterator<Item = i64>) -> Result<Vec<ItemId>, ValidationError> {
    ids.into_iter().map(ItemId::new).collect()
}

//! Setwise
//!
//! Setwise prices a basket drawn from a small catalog of variants where buying *distinct*
//! variants together earns a discount that grows with the size of the group. It finds the
//! grouping of the whole basket with the lowest total price.

pub mod basket;
pub mod catalog;
pub mod discounts;
pub mod items;
pub mod prelude;
pub mod prices;
pub mod receipt;
pub mod solvers;
pub mod utils;
pub mod validation;

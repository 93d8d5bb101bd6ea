//! Setwise prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Signature, Tally},
    catalog::{Catalog, CatalogError},
    discounts::{DiscountError, DiscountTable},
    items::{CATALOG_SIZE, ItemId, item_ids},
    prices::Price,
    receipt::{Receipt, ReceiptError},
    solvers::{
        Group, Solver, SolverResult, frequency::FrequencySolver, partition::PartitionSolver,
    },
    validation::ValidationError,
};

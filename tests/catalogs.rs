//! Integration tests for pricing against catalogs loaded from fixture files.

use std::path::PathBuf;

use rusty_money::iso::{EUR, GBP};
use testresult::TestResult;

use setwise::{
    catalog::Catalog, items::item_ids, prices::Price, receipt::Receipt,
    solvers::partition::PartitionSolver,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("catalogs")
        .join(format!("{name}.yml"))
}

#[test]
fn default_fixture_matches_built_in_catalog() -> TestResult {
    let catalog = Catalog::from_file(fixture("default"))?;
    let built_in = Catalog::default();

    assert_eq!(catalog.base_price(), built_in.base_price());
    assert_eq!(catalog.discounts(), built_in.discounts());
    assert_eq!(catalog.currency(), EUR);

    let items = item_ids([1, 1, 2, 2, 3, 3, 4, 5])?;

    assert_eq!(
        PartitionSolver::new(catalog).price(&items),
        PartitionSolver::new(built_in).price(&items)
    );

    Ok(())
}

#[test]
fn deep_discount_catalog_rounds_each_group() -> TestResult {
    let catalog = Catalog::from_file(fixture("deep-discount"))?;
    let mut solver = PartitionSolver::new(catalog);

    assert_eq!(catalog.currency(), GBP);
    assert_eq!(solver.price(&item_ids([1])?), Price::new(999));

    // 999 * 2 * 0.9 = 1798.2
    assert_eq!(solver.price(&item_ids([1, 2])?), Price::new(1798));

    // 999 * 5 * 0.6 + 999 * 3 * 0.8 = 2997 + 2397.6
    assert_eq!(
        solver.price(&item_ids([1, 1, 2, 2, 3, 3, 4, 5])?),
        Price::new(2997 + 2398)
    );

    Ok(())
}

#[test]
fn receipt_reflects_catalog() -> TestResult {
    let catalog = Catalog::from_file(fixture("deep-discount"))?;
    let result = PartitionSolver::new(catalog).solve(&item_ids([1, 2, 3, 4, 5])?);
    let receipt = Receipt::from_solver_result(&catalog, result);

    assert_eq!(receipt.subtotal(), Price::new(4995));
    assert_eq!(receipt.total(), Price::new(2997));
    assert_eq!(receipt.currency(), GBP);

    let mut out = Vec::new();
    receipt.write_to(&mut out)?;

    assert!(String::from_utf8(out)?.contains("40.00%"));

    Ok(())
}

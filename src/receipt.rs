//! Receipt

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    discounts::DiscountTable,
    prices::Price,
    solvers::{Group, SolverResult},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Final receipt for a priced basket.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Groups the basket was split into
    groups: SmallVec<[Group; 10]>,

    /// Total cost before any group discounts
    subtotal: Price,

    /// Total amount paid for all items after group discounts
    total: Price,

    /// Undiscounted price of a single item
    base_price: Price,

    /// Multipliers the groups were priced with
    discounts: DiscountTable,

    /// Currency used for displaying monetary values
    currency: &'static Currency,
}

impl Receipt {
    /// Build a receipt from a solver result and the catalog it was priced against.
    pub fn from_solver_result(catalog: &Catalog, result: SolverResult) -> Self {
        let items = result.groups.iter().map(|group| group.len() as u64).sum();

        Receipt {
            groups: result.groups,
            subtotal: catalog.base_price().scale(items),
            total: result.total,
            base_price: catalog.base_price(),
            discounts: *catalog.discounts(),
            currency: catalog.currency(),
        }
    }

    /// Groups the basket was split into, largest first.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Total cost before any group discounts
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Total amount paid for all items
    pub fn total(&self) -> Price {
        self.total
    }

    /// Amount saved by grouping.
    pub fn savings(&self) -> Price {
        Price::new(self.subtotal.saturating_sub(*self.total))
    }

    /// Savings as a fraction of the subtotal.
    pub fn savings_percent(&self) -> Percentage {
        if self.subtotal.is_zero() {
            return Percentage::from(0.0);
        }

        Percentage::from(Decimal::from(*self.savings()) / Decimal::from(*self.subtotal))
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Items", "Base Price", "Discount", "Price"]);

        for (idx, group) in self.groups.iter().enumerate() {
            let items: Vec<String> = group.items.iter().map(ToString::to_string).collect();
            let base_price = self.base_price.scale(group.len() as u64);
            let discount = self
                .discounts
                .multiplier(group.len())
                .map(percent_points_off)
                .unwrap_or_default();

            builder.push_record([
                format!("{}", idx + 1),
                items.join(" "),
                self.display(base_price),
                format!("{discount:.2}%"),
                self.display(group.price),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Alignment::center());
        table.modify(Columns::new(2..), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        let savings_points = percent_points(self.savings_percent());

        writeln!(out, " Subtotal: {}", self.display(self.subtotal))
            .map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Total:    {}", self.display(self.total))
            .map_err(|_err| ReceiptError::IO)?;
        writeln!(
            out,
            " Savings:  ({savings_points:.2}%) {}",
            self.display(self.savings())
        )
        .map_err(|_err| ReceiptError::IO)
    }

    fn display(&self, price: Price) -> String {
        price.to_money(self.currency).map_or_else(
            || format!("{} minor units", *price),
            |money| money.to_string(),
        )
    }
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Percent points taken off by a discount multiplier.
fn percent_points_off(multiplier: Percentage) -> Decimal {
    percent_points(Percentage::from(Decimal::ONE - multiplier * Decimal::ONE))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{items::item_ids, solvers::partition::PartitionSolver};

    use super::*;

    fn receipt(ids: &[i64]) -> Result<Receipt, crate::validation::ValidationError> {
        let catalog = Catalog::default();
        let mut solver = PartitionSolver::new(catalog);
        let result = solver.solve(&item_ids(ids.iter().copied())?);

        Ok(Receipt::from_solver_result(&catalog, result))
    }

    #[test]
    fn totals_and_savings() -> TestResult {
        let receipt = receipt(&[1, 1, 2, 2, 3, 3, 4, 5])?;

        assert_eq!(receipt.subtotal(), Price::new(6400));
        assert_eq!(receipt.total(), Price::new(5120));
        assert_eq!(receipt.savings(), Price::new(1280));
        assert_eq!(percent_points(receipt.savings_percent()), Decimal::from(20));
        assert_eq!(receipt.groups().len(), 2);

        Ok(())
    }

    #[test]
    fn empty_receipt_has_no_savings() -> TestResult {
        let receipt = receipt(&[])?;

        assert_eq!(receipt.subtotal(), Price::zero());
        assert_eq!(receipt.savings(), Price::zero());
        assert_eq!(receipt.savings_percent(), Percentage::from(0.0));

        Ok(())
    }

    #[test]
    fn percent_points_off_for_default_table() {
        let table = DiscountTable::default();
        let points: Vec<Decimal> = table
            .iter()
            .map(|(_, multiplier)| percent_points_off(multiplier))
            .collect();

        let expected: Vec<Decimal> = [0, 5, 10, 20, 25].into_iter().map(Decimal::from).collect();

        assert_eq!(points, expected);
    }

    #[test]
    fn write_to_renders_groups_and_summary() -> TestResult {
        let receipt = receipt(&[1, 2, 2])?;
        let mut out = Vec::new();

        receipt.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("#1 #2"), "{rendered}");
        assert!(rendered.contains("Subtotal:"), "{rendered}");
        assert!(rendered.contains("Savings:"), "{rendered}");
        assert!(rendered.contains("5.00%"), "{rendered}");

        Ok(())
    }
}

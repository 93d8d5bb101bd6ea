//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the basket demo
#[derive(Debug, Parser)]
pub struct ExampleBasketArgs {
    /// Item ids to price, e.g. `1 1 2 2 3 3 4 5`
    #[clap(required = true, allow_negative_numbers = true)]
    pub items: Vec<i64>,

    /// Catalog file to price against, defaults to the built-in catalog
    #[clap(short, long)]
    pub catalog: Option<PathBuf>,

    /// Also price the basket with the frequency table solver and compare timings
    #[clap(long)]
    pub compare: bool,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_items_and_flags() -> TestResult {
        let args = ExampleBasketArgs::try_parse_from([
            "basket",
            "1",
            "1",
            "2",
            "-c",
            "catalog.yml",
            "--compare",
        ])?;

        assert_eq!(args.items, vec![1, 1, 2]);
        assert_eq!(args.catalog, Some(PathBuf::from("catalog.yml")));
        assert!(args.compare);

        Ok(())
    }

    #[test]
    fn requires_at_least_one_item() {
        assert!(ExampleBasketArgs::try_parse_from(["basket"]).is_err());
    }
}

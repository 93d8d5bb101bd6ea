//! Basket Receipt Example
//!
//! Prices a basket of item ids at its cheapest grouping and prints the receipt.
//!
//! Use `-c` to load a catalog file instead of the built-in catalog
//! Use `--compare` to also time the frequency table solver
//! Set `RUST_LOG=setwise=debug` to see solver spans

use std::{io, io::Write, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing_subscriber::EnvFilter;

use setwise::{
    catalog::Catalog,
    items::item_ids,
    receipt::Receipt,
    solvers::{Solver, frequency::FrequencySolver, partition::PartitionSolver},
    utils::ExampleBasketArgs,
};

/// Basket Receipt Example
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = ExampleBasketArgs::parse();

    let catalog = match args.catalog.as_deref() {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::default(),
    };

    let items = item_ids(args.items)?;
    let mut solver = PartitionSolver::new(catalog);

    let start = Instant::now();
    let result = solver.solve(&items);
    let elapsed = start.elapsed();

    let receipt = Receipt::from_solver_result(&catalog, result);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    writeln!(
        handle,
        " {} ({}s)",
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    if args.compare {
        let start = Instant::now();
        let baseline = FrequencySolver::new(&catalog).price(&items);
        let baseline_elapsed = start.elapsed();

        writeln!(
            handle,
            " Frequency table solver: {} in {} ({}s)",
            *baseline,
            baseline_elapsed.human(Truncate::Nano),
            baseline_elapsed.as_secs_f32()
        )?;

        if baseline != receipt.total() {
            writeln!(handle, " Solvers disagree!")?;
        }
    }

    Ok(())
}

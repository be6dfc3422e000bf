//! Prints the truth table and basic properties of a formula.
//!
//! Run with:
//! ```bash
//! cargo run --example truth-table -- '((p->q)&p)'
//! cargo run --example truth-table -- --polish '->&pqq' --basis nand
//! ```

use clap::Parser;

use propositions::operators::Basis;
use propositions::semantics::{count_models, is_satisfiable, is_tautology, print_truth_table};
use propositions::syntax::Formula;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Formula to analyze.
    #[arg(value_name = "FORMULA")]
    formula: String,

    /// Read the formula in Polish (prefix) notation.
    #[clap(long)]
    polish: bool,

    /// Also convert the formula to the given basis
    /// (not-and-or, not-and, nand, implies-not, implies-false).
    #[clap(long, value_name = "BASIS")]
    basis: Option<Basis>,

    /// Log level.
    #[clap(long, value_name = "LEVEL", default_value = "info")]
    log_level: simplelog::LevelFilter,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let formula = if args.polish {
        Formula::parse_polish(&args.formula)?
    } else {
        Formula::parse(&args.formula)?
    };
    println!("formula = {}", formula);
    println!("polish = {}", formula.polish());
    println!("size = {}, depth = {}", formula.size(), formula.depth());
    println!();

    print_truth_table(&formula)?;
    println!();

    let variables: Vec<&String> = formula.variables().iter().collect();
    println!("tautology = {}", is_tautology(&formula));
    println!("satisfiable = {}", is_satisfiable(&formula));
    println!("models = {}", count_models(&formula, &variables));

    if let Some(basis) = args.basis {
        let reduced = basis.reduce(&formula);
        println!();
        println!("over {} = {}", basis, reduced);
        println!("size = {}", reduced.size());
    }

    Ok(())
}

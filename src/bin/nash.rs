//! Equilibrium Solver Binary
//!
//! Solves a catalog game and prints every equilibrium found.
//!
//! Options: --game, --algorithm, --exact, --epsilon, --all, --steps

use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use nashkit::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    Support,
    LemkeHowson,
    Lp,
    Pure,
}

#[derive(Parser)]
#[command(author, version, about = "Compute Nash equilibria of textbook games", long_about = None)]
struct Args {
    /// catalog game name
    #[arg(long, default_value = "battle_of_the_sexes")]
    game: String,
    #[arg(long, value_enum, default_value = "lemke-howson")]
    algorithm: Method,
    /// missing label for lemke-howson
    #[arg(long, default_value_t = 0)]
    start: usize,
    /// fix both players' support size for support enumeration
    #[arg(long)]
    size: Option<usize>,
    #[arg(long, conflicts_with = "epsilon")]
    exact: bool,
    /// floating-point tolerance
    #[arg(long)]
    epsilon: Option<f64>,
    /// report every equilibrium the algorithm can reach
    #[arg(long)]
    all: bool,
    /// step budget
    #[arg(long)]
    steps: Option<u64>,
}

impl Args {
    fn config(&self) -> Config {
        let algorithm = match self.algorithm {
            Method::Support => Algorithm::SupportEnumeration {
                size: self.size,
                balanced: true,
            },
            Method::LemkeHowson => Algorithm::LemkeHowson { start: self.start },
            Method::Lp => Algorithm::LpZeroSum,
            Method::Pure => Algorithm::PureEnumeration,
        };
        let precision = match (self.exact, self.epsilon) {
            (false, Some(epsilon)) => Precision::Floating { epsilon },
            _ => Precision::Exact,
        };
        let enumeration = match self.all {
            true => Enumeration::All,
            false => Enumeration::First,
        };
        let budget = Budget {
            steps: self.steps.or(Some(DEFAULT_STEP_BUDGET)),
            time: None,
        };
        Config::new(algorithm)
            .precision(precision)
            .enumeration(enumeration)
            .budget(budget)
    }
}

fn main() -> anyhow::Result<()> {
    log();
    let args = Args::parse();
    let game = catalog(&args.game)
        .with_context(|| format!("unknown game {}; try one of {}", args.game, CATALOG.join(", ")))?;
    let config = args.config();
    log::info!("solving {} with {}", args.game, config.algorithm);
    let solutions = solve(&game, &config).with_context(|| format!("solving {}", args.game))?;
    println!("{}", solutions);
    Ok(())
}

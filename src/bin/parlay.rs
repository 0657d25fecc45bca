use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use jackpot::constraints::Constraints;
use jackpot::file::ReadJsonFile;
use jackpot::leg::Leg;
use jackpot::optimise::{generate_all, suggest_swaps, DEFAULT_SWAPS};
use jackpot::print::{tabulate_legs, tabulate_parlays};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the leg pool from
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// stake placed on each parlay
    #[clap(short = 's', long, default_value = "10")]
    stake: f64,

    /// file to source the eligibility constraints from
    #[clap(long)]
    constraints: Option<PathBuf>,

    /// number of swap suggestions per parlay
    #[clap(long, default_value_t = DEFAULT_SWAPS)]
    swaps: usize,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !self.stake.is_finite() || self.stake <= 0.0 {
            bail!("stake must be a positive amount");
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let constraints = match &args.constraints {
        None => Constraints::default(),
        Some(path) => Constraints::read_json_file(path)?,
    };
    constraints.validate()?;

    let legs = Vec::<Leg>::read_json_file(&args.file)?;
    info!("loaded {} legs from {}", legs.len(), args.file.display());

    let parlays = generate_all(&legs, &constraints, args.stake)?;
    println!("Parlays:\n{}", Console::default().render(&tabulate_parlays(&parlays)));

    for parlay in &parlays {
        let selected = parlay.legs.iter().collect::<Vec<_>>();
        println!(
            "{} legs:\n{}",
            parlay.tolerance,
            Console::default().render(&tabulate_legs(&selected))
        );
        let swaps = suggest_swaps(parlay, &legs, &constraints, args.swaps);
        if !swaps.is_empty() {
            println!(
                "{} swaps:\n{}",
                parlay.tolerance,
                Console::default().render(&tabulate_legs(&swaps))
            );
        }
    }
    Ok(())
}

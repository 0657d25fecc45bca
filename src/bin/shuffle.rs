use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, StdRand};
use tracing::{debug, info};

use jackpot::constraints::Constraints;
use jackpot::file::ReadJsonFile;
use jackpot::filter::filter;
use jackpot::leg::Leg;
use jackpot::optimise::ParlayMetrics;
use jackpot::print::tabulate_legs;
use jackpot::sampler::{self, capped_predicate, sample};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the leg pool from
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// number of picks: 3, 4 or 5
    #[clap(short = 'p', long, default_value = "3")]
    picks: usize,

    /// stake placed on the combination
    #[clap(short = 's', long, default_value = "10")]
    stake: f64,

    /// seed for reproducible output
    #[clap(long)]
    seed: Option<u64>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !(3..=5).contains(&self.picks) {
            bail!("number of picks must be 3, 4 or 5");
        }
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

    let legs = Vec::<Leg>::read_json_file(&args.file)?;
    let constraints = Constraints::n_pick(args.picks);
    let pool = filter(&legs, &constraints);
    info!("{} of {} legs are eligible", pool.len(), legs.len());

    let mut rand = match args.seed {
        None => sampler::entropic(),
        Some(seed) => StdRand::seed(seed),
    };
    let selected = sample(
        &pool,
        args.picks,
        &mut rand,
        capped_predicate(constraints.max_per_team),
    );
    if selected.len() < args.picks {
        return Err(format!(
            "only {} legs from distinct games are available for a {}-pick",
            selected.len(),
            args.picks
        )
        .into());
    }

    let metrics = ParlayMetrics::compute(&selected, args.stake, 0.0)?;
    println!(
        "{}-pick at {:+} (decimal {:.3}), paying {:.2} on {:.2}, confidence {}%:\n{}",
        args.picks,
        metrics.american_odds,
        metrics.decimal_product,
        metrics.payout,
        metrics.stake,
        metrics.combined_confidence,
        Console::default().render(&tabulate_legs(&selected))
    );
    Ok(())
}

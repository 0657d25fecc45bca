use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::thread;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, StdRand};
use tracing::{debug, info};

use jackpot::candidate::{Assembler, Config};
use jackpot::constraints::Tier;
use jackpot::file::ReadJsonFile;
use jackpot::leg::Leg;
use jackpot::print::tabulate_candidates;
use jackpot::ranking::{Spin, SPIN_INTERVAL};
use jackpot::sampler;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the leg pool from
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// payout tier: 50k, 100k or 1M
    #[clap(short = 't', long, default_value = "50k")]
    tier: Tier,

    /// stake placed on each candidate
    #[clap(short = 's', long, default_value = "10")]
    stake: f64,

    /// maximum number of candidates to build
    #[clap(short = 'n', long)]
    count: Option<usize>,

    /// seed for reproducible output
    #[clap(long)]
    seed: Option<u64>,

    /// file to source the constraints and build options from
    #[clap(long)]
    config: Option<PathBuf>,

    /// spin through the candidates and lock one in
    #[clap(long)]
    spin: bool,

    /// print the candidates as JSON rather than a table
    #[clap(long)]
    json: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !self.stake.is_finite() || self.stake <= 0.0 {
            bail!("stake must be a positive amount");
        }
        if self.count == Some(0) {
            bail!("at least one candidate must be requested");
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

    let mut config = match &args.config {
        None => Config::default(),
        Some(path) => Config::read_json_file(path)?,
    };
    if let Some(count) = args.count {
        config.options.max_candidates = count;
    }
    let assembler = Assembler::try_from(config)?;
    debug!("config: {:?}", assembler.config());

    let legs = Vec::<Leg>::read_json_file(&args.file)?;
    info!("loaded {} legs from {}", legs.len(), args.file.display());

    let mut rand = match args.seed {
        None => sampler::entropic(),
        Some(seed) => StdRand::seed(seed),
    };
    let candidates = assembler.assemble(args.tier, args.stake, &legs, &mut rand)?;
    if candidates.is_empty() {
        info!(
            "no candidates reach the {} tier on a stake of {}",
            args.tier, args.stake
        );
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else {
        let table = tabulate_candidates(&candidates);
        println!(
            "{} candidates for the {} tier:\n{}",
            candidates.len(),
            args.tier,
            Console::default().render(&table)
        );
    }

    if args.spin {
        let mut spin = Spin::new(&candidates);
        spin.start();
        while spin.is_spinning() {
            if let Some(shown) = spin.tick(&mut rand) {
                debug!("flash: {:?}", shown.leg_ids);
            }
            thread::sleep(SPIN_INTERVAL);
        }
        if let Some(locked) = spin.lock_in() {
            let table = tabulate_candidates(std::slice::from_ref(locked));
            println!("Locked in:\n{}", Console::default().render(&table));
        }
    }
    Ok(())
}

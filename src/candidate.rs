//! Assembly of parlay candidates from a leg pool.
//!
//! Each attempt seeds a parlay with the highest-ranked eligible legs, fills the remaining slots at
//! random from the top of the pool while honouring game and team exclusivity, and keeps the result
//! only if it reaches the tier's target payout and has not been produced before. Accepted
//! candidates are ranked by their (heuristic) expected value.

use anyhow::bail;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tinyrand::Rand;
use tracing::{debug, trace};

use crate::constraints::{Constraints, Tier};
use crate::filter::filter;
use crate::leg::Leg;
use crate::odds::InvalidOdds;
use crate::sampler::Exclusivity;
use crate::{probs, ranking, sampler};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub leg_ids: Vec<String>,
    /// Stake multiplied by the decimal product, rounded to the cent.
    pub payout: f64,
    pub decimal_product: f64,
    /// Uncalibrated; see [probs].
    pub est_hit_prob: f64,
    pub legs: Vec<Leg>,
}
impl Candidate {
    pub fn expected_value(&self) -> f64 {
        self.est_hit_prob * self.payout
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("stake must be a positive, finite amount, got {0}")]
    InvalidStake(f64),

    #[error("insufficient eligible legs: {available} available, {required} required")]
    InsufficientLegs { required: usize, available: usize },

    #[error("{0}")]
    InvalidOdds(#[from] InvalidOdds),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOptions {
    pub max_candidates: usize,
    /// Upper bound on the number of assembly attempts, irrespective of pool size.
    pub attempts: usize,
    /// Upper bound on the number of random draws made while filling a single candidate.
    pub fill_attempts: usize,
    /// Number of top-ranked legs considered for seeding each candidate.
    pub seeds: usize,
    /// Random fill draws only from this many of the top-ranked legs.
    pub fill_window: usize,
}
impl BuildOptions {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.attempts == 0 {
            bail!("number of attempts must be at least 1");
        }
        if self.fill_window == 0 {
            bail!("fill window must span at least 1 leg");
        }
        Ok(())
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_candidates: 20,
            attempts: 2_000,
            fill_attempts: 2_000,
            seeds: 3,
            fill_window: 200,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub constraints: Constraints,
    pub options: BuildOptions,
}
impl Config {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.constraints.validate()?;
        self.options.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembler {
    config: Config,
}
impl Assembler {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn assemble(
        &self,
        tier: Tier,
        stake: f64,
        legs: &[Leg],
        rand: &mut impl Rand,
    ) -> Result<Vec<Candidate>, BuildError> {
        validate_stake(stake)?;
        let Config {
            constraints,
            options,
        } = &self.config;

        let pool = filter(legs, constraints);
        if pool.len() < constraints.min_legs {
            debug!(
                "insufficient quality legs: {} < {}",
                pool.len(),
                constraints.min_legs
            );
            return Ok(vec![]);
        }

        let target_payout = tier.target_payout();
        let max_payout = max_achievable_payout(&pool, constraints.max_legs, stake);
        if max_payout * (1.0 + PAYOUT_BOUND_SLACK) < target_payout {
            debug!("tier {tier} unreachable: at most {max_payout:.2} on a stake of {stake}");
            return Ok(vec![]);
        }

        let window = &pool[..usize::min(pool.len(), options.fill_window)];
        let leg_counts = constraints.max_legs - constraints.min_legs + 1;
        let mut candidates = Vec::with_capacity(usize::min(options.max_candidates, options.attempts));
        let mut produced = FxHashSet::default();
        let mut exclusivity = Exclusivity::new(constraints.max_per_team);
        let mut chosen: Vec<&Leg> = Vec::with_capacity(usize::min(constraints.max_legs, pool.len()));
        let mut attempts = 0;
        while attempts < options.attempts && candidates.len() < options.max_candidates {
            attempts += 1;
            let pick_count = constraints.min_legs + rand.next_lim_usize(leg_counts);
            chosen.clear();
            exclusivity.clear();

            for &leg in pool.iter().take(usize::min(options.seeds, pick_count)) {
                if exclusivity.admit(leg) {
                    chosen.push(leg);
                }
            }

            let mut fill_attempts = 0;
            while chosen.len() < pick_count && fill_attempts < options.fill_attempts {
                fill_attempts += 1;
                let leg = window[rand.next_lim_usize(window.len())];
                if exclusivity.admit(leg) {
                    chosen.push(leg);
                }
            }

            if chosen.len() < constraints.min_legs {
                trace!("attempt {attempts}: only {} legs assembled", chosen.len());
                continue;
            }

            let decimal_product: f64 = chosen.iter().map(|leg| leg.price_decimal).product();
            let payout = stake * decimal_product;
            if payout < target_payout {
                trace!("attempt {attempts}: payout {payout:.2} below target {target_payout}");
                continue;
            }

            let mut key = chosen.iter().map(|leg| leg.id.as_str()).collect::<Vec<_>>();
            key.sort_unstable();
            if !produced.insert(key) {
                continue;
            }

            candidates.push(Candidate {
                leg_ids: chosen.iter().map(|leg| leg.id.clone()).collect(),
                payout: round_cents(payout),
                decimal_product,
                est_hit_prob: probs::estimate(chosen.iter().copied()),
                legs: chosen.iter().map(|&leg| leg.clone()).collect(),
            });
        }
        debug!(
            "assembled {} candidates for tier {tier} in {attempts} attempts from {} eligible legs",
            candidates.len(),
            pool.len()
        );

        ranking::rank(&mut candidates);
        Ok(candidates)
    }
}

impl TryFrom<Config> for Assembler {
    type Error = anyhow::Error;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self { config })
    }
}

/// Builds up to `max_candidates` candidates under the default constraints, drawing randomness from
/// the system clock.
pub fn build_candidates(
    tier: Tier,
    stake: f64,
    legs: &[Leg],
    max_candidates: usize,
) -> Result<Vec<Candidate>, BuildError> {
    let assembler = Assembler {
        config: Config {
            constraints: Constraints::default(),
            options: BuildOptions {
                max_candidates,
                ..BuildOptions::default()
            },
        },
    };
    assembler.assemble(tier, stake, legs, &mut sampler::entropic())
}

pub fn validate_stake(stake: f64) -> Result<(), BuildError> {
    if !stake.is_finite() || stake <= 0.0 {
        return Err(BuildError::InvalidStake(stake));
    }
    Ok(())
}

/// Relative slack applied to [max_achievable_payout], whose product is taken in a different order
/// to that of any assembled parlay and may therefore fall a few ulps short of it.
const PAYOUT_BOUND_SLACK: f64 = 1e-9;

/// An upper bound on the payout of any parlay of at most `max_legs` legs drawn from `pool`: the
/// product of the highest prices. Every price is at least 1, so adding legs never lowers it.
fn max_achievable_payout(pool: &[&Leg], max_legs: usize, stake: f64) -> f64 {
    let mut prices = pool.iter().map(|leg| leg.price_decimal).collect::<Vec<_>>();
    prices.sort_unstable_by(|a, b| b.total_cmp(a));
    stake * prices.iter().take(max_legs).product::<f64>()
}

#[inline]
pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests;

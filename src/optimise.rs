//! Deterministic, greedy parlay construction for fixed risk profiles, with summary metrics and
//! swap suggestions.
//!
//! Unlike the randomised [Assembler](crate::candidate::Assembler), the greedy builder walks the
//! eligible legs strictly in order of quality and takes the first that fit the profile, so the same
//! pool always yields the same parlay.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::candidate::{round_cents, validate_stake, BuildError};
use crate::constraints::{Constraints, Tier};
use crate::filter::filter;
use crate::leg::Leg;
use crate::odds;
use crate::probs::{self, SliceExt};
use crate::sampler::Exclusivity;

pub const DEFAULT_SWAPS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    Balanced,
    Aggressive,
}
impl RiskTolerance {
    pub fn profile(&self) -> Profile {
        match self {
            RiskTolerance::Conservative => Profile {
                legs: 4,
                tier: Tier::FiftyK,
                max_per_team: 1,
            },
            RiskTolerance::Balanced => Profile {
                legs: 6,
                tier: Tier::HundredK,
                max_per_team: 2,
            },
            RiskTolerance::Aggressive => Profile {
                legs: 8,
                tier: Tier::OneM,
                max_per_team: 3,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub legs: usize,
    pub tier: Tier,
    pub max_per_team: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParlayMetrics {
    pub decimal_product: f64,
    pub american_odds: f64,
    pub stake: f64,
    pub payout: f64,
    pub est_hit_prob: f64,
    /// Geometric mean of the per-leg hit probabilities, as a percentage.
    pub combined_confidence: f64,
    /// Estimated hit probability times payout, less the stake.
    pub expected_value: f64,
    /// The share of legs that repeat a team already present in the parlay.
    pub correlation_risk: f64,
    /// Whether the payout reaches the profile's tier target.
    pub reaches_target: bool,
}
impl ParlayMetrics {
    pub fn compute(legs: &[&Leg], stake: f64, target_payout: f64) -> Result<Self, BuildError> {
        validate_stake(stake)?;
        let decimal_product: f64 = legs.iter().map(|leg| leg.price_decimal).product();
        let american_odds = odds::decimal_to_american(decimal_product)?;
        let payout = stake * decimal_product;
        let hit_probs = probs::leg_hit_probs(legs.iter().copied());
        let est_hit_prob = hit_probs.product();
        let teams = legs
            .iter()
            .map(|leg| leg.team.as_deref().unwrap_or(&leg.game_id))
            .collect::<FxHashSet<_>>();
        let correlation_risk = if legs.is_empty() {
            0.0
        } else {
            1.0 - teams.len() as f64 / legs.len() as f64
        };
        Ok(Self {
            decimal_product,
            american_odds,
            stake,
            payout: round_cents(payout),
            est_hit_prob,
            combined_confidence: (hit_probs.geometric_mean() * 100.0).round(),
            expected_value: round_cents(est_hit_prob * payout - stake),
            correlation_risk,
            reaches_target: payout >= target_payout,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parlay {
    pub tolerance: RiskTolerance,
    pub legs: Vec<Leg>,
    pub metrics: ParlayMetrics,
}

/// Selects `profile.legs` legs in order of quality, skipping any whose game is already used or
/// whose team has reached the profile's cap.
pub fn optimise<'a>(
    pool: &'a [Leg],
    constraints: &Constraints,
    profile: &Profile,
) -> Result<Vec<&'a Leg>, BuildError> {
    let eligible = filter(pool, constraints);
    let mut exclusivity = Exclusivity::new(profile.max_per_team);
    let mut selected = Vec::with_capacity(profile.legs);
    for leg in eligible {
        if selected.len() == profile.legs {
            break;
        }
        if exclusivity.admit(leg) {
            selected.push(leg);
        }
    }
    if selected.len() < profile.legs {
        return Err(BuildError::InsufficientLegs {
            required: profile.legs,
            available: selected.len(),
        });
    }
    Ok(selected)
}

pub fn generate(
    pool: &[Leg],
    constraints: &Constraints,
    tolerance: RiskTolerance,
    stake: f64,
) -> Result<Parlay, BuildError> {
    let profile = tolerance.profile();
    let legs = optimise(pool, constraints, &profile)?;
    let metrics = ParlayMetrics::compute(&legs, stake, profile.tier.target_payout())?;
    debug!("{tolerance} parlay: {metrics:?}");
    Ok(Parlay {
        tolerance,
        legs: legs.into_iter().cloned().collect(),
        metrics,
    })
}

/// One parlay for each risk tolerance, from the most to the least conservative.
pub fn generate_all(
    pool: &[Leg],
    constraints: &Constraints,
    stake: f64,
) -> Result<Vec<Parlay>, BuildError> {
    [
        RiskTolerance::Conservative,
        RiskTolerance::Balanced,
        RiskTolerance::Aggressive,
    ]
    .into_iter()
    .map(|tolerance| generate(pool, constraints, tolerance, stake))
    .collect()
}

/// Up to `n` eligible legs, not already in the parlay, ranked by quality.
pub fn suggest_swaps<'a>(
    parlay: &Parlay,
    pool: &'a [Leg],
    constraints: &Constraints,
    n: usize,
) -> Vec<&'a Leg> {
    let used = parlay
        .legs
        .iter()
        .map(|leg| leg.id.as_str())
        .collect::<FxHashSet<_>>();
    filter(pool, constraints)
        .into_iter()
        .filter(|leg| !used.contains(leg.id.as_str()))
        .take(n)
        .collect()
}

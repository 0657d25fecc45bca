//! Eligibility and shape constraints applied when assembling parlays, and the payout tiers that
//! candidates must reach.

use std::ops::RangeInclusive;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::leg::EDGE_RANGE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraints {
    pub min_legs: usize,
    pub max_legs: usize,
    pub min_odds: f64,
    pub max_odds: f64,
    pub min_edge: f64,
    pub max_per_team: usize,
}
impl Constraints {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.min_legs == 0 {
            bail!("minimum number of legs must be at least 1");
        }
        if self.min_legs > self.max_legs {
            bail!(
                "minimum number of legs {} cannot exceed the maximum {}",
                self.min_legs,
                self.max_legs
            );
        }
        if !self.min_odds.is_finite() || !self.max_odds.is_finite() || self.min_odds < 1.0 {
            bail!("odds bounds must be finite decimal prices of at least 1.0");
        }
        if self.min_odds > self.max_odds {
            bail!(
                "minimum odds {} cannot exceed the maximum {}",
                self.min_odds,
                self.max_odds
            );
        }
        if !EDGE_RANGE.contains(&self.min_edge) {
            bail!("minimum edge must be in the range {EDGE_RANGE:?}");
        }
        if self.max_per_team == 0 {
            bail!("maximum legs per team must be at least 1");
        }
        Ok(())
    }

    #[inline]
    pub fn leg_counts(&self) -> RangeInclusive<usize> {
        self.min_legs..=self.max_legs
    }

    #[inline]
    pub fn odds_range(&self) -> RangeInclusive<f64> {
        self.min_odds..=self.max_odds
    }

    /// Presets for quick 3/4/5-pick combinations. Only risk flags and repeated games disqualify a
    /// leg; price and edge are unconstrained and no team can reach the cap.
    pub fn n_pick(legs: usize) -> Self {
        Self {
            min_legs: legs,
            max_legs: legs,
            min_odds: 1.0,
            max_odds: f64::MAX,
            min_edge: 0.0,
            max_per_team: legs.max(1),
        }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_legs: 6,
            max_legs: 12,
            min_odds: 1.3,
            max_odds: 3.5,
            min_edge: 55.0,
            max_per_team: 2,
        }
    }
}

/// A named payout bracket. A candidate is only accepted if its payout reaches the tier's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Tier {
    #[strum(to_string = "50k")]
    #[serde(rename = "50k")]
    FiftyK,
    #[strum(to_string = "100k")]
    #[serde(rename = "100k")]
    HundredK,
    #[strum(to_string = "1M")]
    #[serde(rename = "1M")]
    OneM,
}
impl Tier {
    pub fn target_payout(&self) -> f64 {
        match self {
            Tier::FiftyK => 50_000.0,
            Tier::HundredK => 100_000.0,
            Tier::OneM => 1_000_000.0,
        }
    }
}

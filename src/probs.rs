//! Heuristic hit probabilities derived from edge scores.
//!
//! These numbers are **not** calibrated probabilities. An edge score of 50 maps to a coin flip and each
//! point either side moves the estimate by one percentage point, capped at [MAX_LEG_PROB]. Legs are
//! treated as independent: same-game correlation is avoided structurally by the assembler, but any
//! cross-game correlation (weather affecting several venues, say) is ignored.

use crate::leg::Leg;

/// No single leg is ever considered more likely than this.
pub const MAX_LEG_PROB: f64 = 0.8;

/// Floor applied to very low edge scores, keeping every estimate strictly positive.
pub const MIN_LEG_PROB: f64 = 0.01;

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn product(&self) -> f64;
    fn geometric_mean(&self) -> f64;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    fn product(&self) -> f64 {
        self.iter().product()
    }

    fn geometric_mean(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.product().powf(1.0 / self.len() as f64)
    }
}

#[inline]
pub fn leg_hit_prob(edge_score: f64) -> f64 {
    (0.5 + (edge_score - 50.0) * 0.01).clamp(MIN_LEG_PROB, MAX_LEG_PROB)
}

/// Joint hit probability of a set of legs under the independence assumption.
pub fn estimate<'a>(legs: impl IntoIterator<Item = &'a Leg>) -> f64 {
    legs.into_iter()
        .map(|leg| leg_hit_prob(leg.edge_score))
        .product()
}

/// Per-leg hit probabilities, in the order of the supplied legs.
pub fn leg_hit_probs<'a>(legs: impl IntoIterator<Item = &'a Leg>) -> Vec<f64> {
    legs.into_iter()
        .map(|leg| leg_hit_prob(leg.edge_score))
        .collect()
}

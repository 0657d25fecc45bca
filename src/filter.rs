//! Static eligibility filtering of a leg pool.

use std::cmp::Ordering;

use tracing::{trace, warn};

use crate::constraints::Constraints;
use crate::leg::Leg;

/// Retains the legs whose price lies within the odds bounds, whose edge meets the minimum and which
/// carry no risk flags. Malformed legs are logged and dropped. The result is ordered by descending
/// edge score, then by descending price.
pub fn filter<'a>(pool: &'a [Leg], constraints: &Constraints) -> Vec<&'a Leg> {
    let odds_range = constraints.odds_range();
    let mut eligible = pool
        .iter()
        .filter(|leg| match leg.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!("rejecting leg: {err}");
                false
            }
        })
        .filter(|leg| odds_range.contains(&leg.price_decimal))
        .filter(|leg| leg.edge_score >= constraints.min_edge)
        .filter(|leg| !leg.is_flagged())
        .collect::<Vec<_>>();
    eligible.sort_by(|a, b| by_quality(a, b));
    trace!("{} of {} legs eligible", eligible.len(), pool.len());
    eligible
}

/// Descending order of edge score, tie-broken by descending price.
#[inline]
pub fn by_quality(a: &Leg, b: &Leg) -> Ordering {
    b.edge_score
        .total_cmp(&a.edge_score)
        .then_with(|| b.price_decimal.total_cmp(&a.price_decimal))
}

//! Conversions between American and decimal odds.
//!
//! American odds are quoted relative to a 100-unit stake: `+150` returns 150 in profit on a stake
//! of 100, while `-110` requires a stake of 110 to return 100 in profit. Decimal odds quote the total
//! return per unit staked, so `+150` is `2.5` and `-110` is roughly `1.909`. Even money is `+100`
//! (equivalently `-100`) and maps to `2.0`; the inverse conversion always yields `+100` for it.

use thiserror::Error;

/// The American price assumed for a leg when the feed omits one.
pub const DEFAULT_AMERICAN: f64 = -110.0;

#[derive(Debug, Error, PartialEq)]
#[error("invalid decimal odds {0}: must be a finite value greater than 1")]
pub struct InvalidOdds(pub f64);

pub fn american_to_decimal(american: f64) -> f64 {
    if american > 0.0 {
        american / 100.0 + 1.0
    } else {
        100.0 / american.abs() + 1.0
    }
}

pub fn decimal_to_american(decimal: f64) -> Result<f64, InvalidOdds> {
    validate_decimal(decimal)?;
    if decimal >= 2.0 {
        Ok(((decimal - 1.0) * 100.0).round())
    } else {
        Ok((-100.0 / (decimal - 1.0)).round())
    }
}

/// The bookmaker-implied probability of a decimal price, inclusive of any overround.
pub fn implied_probability(decimal: f64) -> Result<f64, InvalidOdds> {
    validate_decimal(decimal)?;
    Ok(1.0 / decimal)
}

#[inline]
fn validate_decimal(decimal: f64) -> Result<(), InvalidOdds> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return Err(InvalidOdds(decimal));
    }
    Ok(())
}

//! Testing helpers.

use assert_float_eq::*;
use chrono::{TimeZone, Utc};

use crate::leg::Leg;

/// A leg with a fixed start time, so that fixtures compare equal across calls.
pub fn leg(id: impl Into<String>, game_id: impl Into<String>, price_decimal: f64, edge_score: f64) -> Leg {
    Leg::new(id, game_id, price_decimal, edge_score).with_start_time(Utc.with_ymd_and_hms(2024, 6, 1, 23, 5, 0).unwrap())
}

/// `games` games with `per_game` legs each, with prices and edges staggered so that the pool has
/// a spread of qualities. Teams alternate between home and away within a game.
pub fn slate(games: usize, per_game: usize) -> Vec<Leg> {
    let mut legs = Vec::with_capacity(games * per_game);
    for game in 0..games {
        for index in 0..per_game {
            let ordinal = game * per_game + index;
            let side = if index % 2 == 0 { "home" } else { "away" };
            legs.push(
                leg(
                    format!("g{game}-l{index}"),
                    format!("g{game}"),
                    1.4 + (ordinal % 8) as f64 * 0.25,
                    56.0 + (ordinal % 9) as f64 * 4.0,
                )
                .with_team(format!("g{game}-{side}")),
            );
        }
    }
    legs
}

pub fn ids<'a>(legs: &[&'a Leg]) -> Vec<&'a str> {
    legs.iter().map(|leg| leg.id.as_str()).collect()
}

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

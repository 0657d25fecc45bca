//! Builds parlay (accumulator) candidates from a pool of pre-scored betting legs.
//! Candidates are assembled at random under game and team exclusivity, must reach the payout
//! target of a jackpot tier, and are ranked by a heuristic expected value.

#![allow(clippy::too_many_arguments)]

pub mod candidate;
pub mod constraints;
pub mod display;
pub mod file;
pub mod filter;
pub mod leg;
pub mod odds;
pub mod optimise;
pub mod print;
pub mod probs;
pub mod ranking;
pub mod sampler;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}

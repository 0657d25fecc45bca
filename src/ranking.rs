//! Ranking of assembled candidates, and the "jackpot spin" used to present them.

use std::time::Duration;

use tinyrand::Rand;
use tracing::debug;

use crate::candidate::Candidate;

pub const SPIN_DURATION: Duration = Duration::from_millis(1_800);
pub const SPIN_INTERVAL: Duration = Duration::from_millis(80);

/// A spin locks in one of this many top-ranked candidates, rather than whichever was last shown.
pub const LOCK_POOL: usize = 5;

/// Orders candidates by descending expected value, i.e., estimated hit probability times payout.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.expected_value().total_cmp(&a.expected_value()));
}

pub fn top(candidates: &[Candidate], n: usize) -> &[Candidate] {
    &candidates[..usize::min(n, candidates.len())]
}

/// The number of whole ticks of length `interval` needed to cover `duration`.
pub fn ticks_for(duration: Duration, interval: Duration) -> u32 {
    let interval = interval.as_nanos().max(1);
    duration.as_nanos().div_ceil(interval) as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}
impl Countdown {
    pub fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    /// Consumes a tick, returning `true` once the countdown has expired.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinState {
    Idle,
    Spinning { countdown: Countdown, flashes: usize },
    Locked { index: usize },
}

/// Cycles through ranked candidates on every tick, then locks one in. The countdown is owned by
/// the [SpinState::Spinning] state and is discarded on any transition out of it.
#[derive(Debug)]
pub struct Spin<'a> {
    candidates: &'a [Candidate],
    ticks: u32,
    state: SpinState,
}
impl<'a> Spin<'a> {
    pub fn new(candidates: &'a [Candidate]) -> Self {
        Self {
            candidates,
            ticks: ticks_for(SPIN_DURATION, SPIN_INTERVAL),
            state: SpinState::Idle,
        }
    }

    pub fn with_ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks.max(1);
        self
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning { .. })
    }

    /// Begins spinning from either the idle or locked state. Has no effect while already spinning
    /// or when there is nothing to spin through; returns whether a spin was started.
    pub fn start(&mut self) -> bool {
        if self.candidates.is_empty() || self.is_spinning() {
            return false;
        }
        self.state = SpinState::Spinning {
            countdown: Countdown::new(self.ticks),
            flashes: 0,
        };
        true
    }

    /// Advances a spin by one tick, flashing the next candidate. When the countdown expires, the
    /// spin stops and a candidate is locked in.
    pub fn tick(&mut self, rand: &mut impl Rand) -> Option<&'a Candidate> {
        let expired = match &mut self.state {
            SpinState::Spinning { countdown, flashes } => {
                *flashes += 1;
                countdown.tick()
            }
            _ => false,
        };
        if expired {
            self.stop(rand);
        }
        self.current()
    }

    /// Stops a spin early, locking in a candidate at random from the top of the ranking.
    pub fn stop(&mut self, rand: &mut impl Rand) -> Option<&'a Candidate> {
        if !self.is_spinning() {
            return self.current();
        }
        let index = rand.next_lim_usize(usize::min(LOCK_POOL, self.candidates.len()));
        debug!("spin locked on candidate {index}");
        self.state = SpinState::Locked { index };
        self.current()
    }

    /// The candidate presently on display.
    pub fn current(&self) -> Option<&'a Candidate> {
        match &self.state {
            SpinState::Idle => None,
            SpinState::Spinning { flashes: 0, .. } => None,
            SpinState::Spinning { flashes, .. } => {
                Some(&self.candidates[(flashes - 1) % self.candidates.len()])
            }
            SpinState::Locked { index } => Some(&self.candidates[*index]),
        }
    }

    /// The locked-in candidate, available only once a spin has completed.
    pub fn lock_in(&self) -> Option<&'a Candidate> {
        match &self.state {
            SpinState::Locked { index } => Some(&self.candidates[*index]),
            _ => None,
        }
    }
}

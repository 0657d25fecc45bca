//! Randomised, constraint-respecting combinations of legs.
//!
//! All randomness is drawn from a caller-supplied [Rand], so that a seeded generator reproduces the
//! same combinations while production callers seed from entropy (see [entropic]).

use rustc_hash::{FxHashMap, FxHashSet};
use tinyrand::{Rand, Seeded, StdRand};
use tinyrand_std::clock_seed::ClockSeed;

use crate::leg::Leg;

/// A generator seeded from the system clock.
pub fn entropic() -> StdRand {
    StdRand::seed(ClockSeed::default().next_u64())
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T>(slice: &mut [T], rand: &mut impl Rand) {
    for index in (1..slice.len()).rev() {
        let other = rand.next_lim_usize(index + 1);
        slice.swap(index, other);
    }
}

/// Walks a random permutation of `pool`, accepting each item for which `is_valid(accepted, item)`
/// holds, until `size` items are accepted or the pool is exhausted. The result may therefore be
/// shorter than `size`; it is up to the caller to check.
pub fn sample<T: Copy>(
    pool: &[T],
    size: usize,
    rand: &mut impl Rand,
    mut is_valid: impl FnMut(&[T], T) -> bool,
) -> Vec<T> {
    let mut permutation = (0..pool.len()).collect::<Vec<_>>();
    shuffle(&mut permutation, rand);

    let mut accepted = Vec::with_capacity(size);
    for index in permutation {
        if accepted.len() == size {
            break;
        }
        let item = pool[index];
        if is_valid(&accepted, item) {
            accepted.push(item);
        }
    }
    accepted
}

/// Rejects a leg that carries a risk flag or whose game already features among the selected legs.
pub fn default_predicate(selected: &[&Leg], candidate: &Leg) -> bool {
    admissible(selected, candidate, usize::MAX)
}

/// [default_predicate], additionally capping the number of legs that reference the same team.
pub fn capped_predicate(max_per_team: usize) -> impl Fn(&[&Leg], &Leg) -> bool {
    move |selected: &[&Leg], candidate: &Leg| admissible(selected, candidate, max_per_team)
}

fn admissible(selected: &[&Leg], candidate: &Leg, max_per_team: usize) -> bool {
    if candidate.is_flagged() {
        return false;
    }
    let mut exclusivity = Exclusivity::new(max_per_team);
    selected.iter().all(|&leg| exclusivity.admit(leg)) && exclusivity.admits(candidate)
}

/// Tracks the games and teams already represented in a partially assembled parlay. A leg is
/// admitted only if its game is unused and its team (when known) is below the per-team cap.
#[derive(Debug)]
pub struct Exclusivity<'a> {
    games: FxHashSet<&'a str>,
    teams: FxHashMap<&'a str, usize>,
    max_per_team: usize,
}
impl<'a> Exclusivity<'a> {
    pub fn new(max_per_team: usize) -> Self {
        Self {
            games: FxHashSet::default(),
            teams: FxHashMap::default(),
            max_per_team,
        }
    }

    pub fn admits(&self, leg: &Leg) -> bool {
        if self.games.contains(leg.game_id.as_str()) {
            return false;
        }
        match &leg.team {
            None => true,
            Some(team) => self.teams.get(team.as_str()).copied().unwrap_or(0) < self.max_per_team,
        }
    }

    /// Records the leg if it is admissible, returning whether it was.
    pub fn admit(&mut self, leg: &'a Leg) -> bool {
        if !self.admits(leg) {
            return false;
        }
        self.games.insert(&leg.game_id);
        if let Some(team) = &leg.team {
            *self.teams.entry(team).or_default() += 1;
        }
        true
    }

    pub fn clear(&mut self) {
        self.games.clear();
        self.teams.clear();
    }
}

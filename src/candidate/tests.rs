use assert_float_eq::*;
use rustc_hash::FxHashMap;
use tinyrand::{Seeded, StdRand};

use super::*;
use crate::testing::{leg, slate};

fn assembler(constraints: Constraints, options: BuildOptions) -> Assembler {
    Assembler::try_from(Config {
        constraints,
        options,
    })
    .unwrap()
}

fn assert_invariants(candidates: &[Candidate], constraints: &Constraints, target_payout: f64) {
    for candidate in candidates {
        let mut games = candidate.legs.iter().map(|leg| &leg.game_id).collect::<Vec<_>>();
        games.sort();
        games.dedup();
        assert_eq!(candidate.legs.len(), games.len(), "duplicate game in {:?}", candidate.leg_ids);

        assert!(
            constraints.leg_counts().contains(&candidate.legs.len()),
            "{} legs in {:?}",
            candidate.legs.len(),
            candidate.leg_ids
        );
        assert!(candidate.payout >= target_payout - 0.01);
        assert!(candidate.est_hit_prob > 0.0);
        assert!(candidate.est_hit_prob <= probs::MAX_LEG_PROB.powi(candidate.legs.len() as i32) * (1.0 + 1e-9));

        let mut teams = FxHashMap::default();
        for team in candidate.legs.iter().filter_map(|leg| leg.team.as_ref()) {
            *teams.entry(team).or_insert(0) += 1;
        }
        assert!(teams.values().all(|&count| count <= constraints.max_per_team));

        assert_eq!(
            candidate.leg_ids,
            candidate.legs.iter().map(|leg| leg.id.clone()).collect::<Vec<_>>()
        );
    }
}

#[test]
fn empty_pool() {
    let candidates = build_candidates(Tier::FiftyK, 10.0, &[], 20).unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn single_flagged_leg() {
    let pool = vec![leg("l1", "g1", 2.0, 70.0).with_risk_flag("injury")];
    let candidates = Assembler::default()
        .assemble(Tier::FiftyK, 10.0, &pool, &mut StdRand::seed(1))
        .unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn insufficient_legs_is_not_an_error() {
    let pool = slate(5, 1);
    let candidates = Assembler::default()
        .assemble(Tier::FiftyK, 1_000.0, &pool, &mut StdRand::seed(1))
        .unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn payout_below_target_is_rejected() {
    let pool = (0..6)
        .map(|index| leg(format!("l{index}"), format!("g{index}"), 2.0, 60.0))
        .collect::<Vec<_>>();
    let constraints = Constraints {
        min_legs: 6,
        max_legs: 6,
        ..Constraints::default()
    };
    // 2^6 = 64, and 64 * 100 = 6,400 falls well short of 50,000
    let candidates = assembler(constraints, BuildOptions::default())
        .assemble(Tier::FiftyK, 100.0, &pool, &mut StdRand::seed(1))
        .unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn payout_at_target_is_accepted() {
    let pool = (0..6)
        .map(|index| leg(format!("l{index}"), format!("g{index}"), 2.0, 60.0))
        .collect::<Vec<_>>();
    let constraints = Constraints {
        min_legs: 6,
        max_legs: 6,
        ..Constraints::default()
    };
    let stake = 50_000.0 / 64.0;
    let candidates = assembler(constraints, BuildOptions::default())
        .assemble(Tier::FiftyK, stake, &pool, &mut StdRand::seed(1))
        .unwrap();
    assert_eq!(1, candidates.len());
    assert_float_absolute_eq!(64.0, candidates[0].decimal_product, 1e-9);
    assert_float_absolute_eq!(50_000.0, candidates[0].payout, 1e-9);
    assert_float_relative_eq!(0.6f64.powi(6), candidates[0].est_hit_prob, 1e-9);
}

#[test]
fn dedup_single_leg_set() {
    let pool = (0..6)
        .map(|index| leg(format!("l{index}"), format!("g{index}"), 3.5, 60.0 + index as f64))
        .collect::<Vec<_>>();
    let constraints = Constraints {
        min_legs: 6,
        max_legs: 6,
        ..Constraints::default()
    };
    let assembler = assembler(constraints, BuildOptions::default());
    for seed in 0..2 {
        let candidates = assembler
            .assemble(Tier::HundredK, 100.0, &pool, &mut StdRand::seed(seed))
            .unwrap();
        assert_eq!(1, candidates.len());
        let mut leg_ids = candidates[0].leg_ids.clone();
        leg_ids.sort();
        assert_eq!(vec!["l0", "l1", "l2", "l3", "l4", "l5"], leg_ids);
    }
}

#[test]
fn seeded_with_top_edges() {
    let pool = (0..6)
        .map(|index| leg(format!("l{index}"), format!("g{index}"), 3.5, 60.0 + index as f64))
        .collect::<Vec<_>>();
    let constraints = Constraints {
        min_legs: 6,
        max_legs: 6,
        ..Constraints::default()
    };
    let candidates = assembler(constraints, BuildOptions::default())
        .assemble(Tier::HundredK, 100.0, &pool, &mut StdRand::seed(3))
        .unwrap();
    assert_eq!(vec!["l5", "l4", "l3"], candidates[0].leg_ids[..3].to_vec());
}

#[test]
fn invariants_hold_over_a_slate() {
    let pool = slate(20, 3);
    let constraints = Constraints::default();
    let assembler = assembler(constraints.clone(), BuildOptions::default());
    for seed in 0..5 {
        let candidates = assembler
            .assemble(Tier::FiftyK, 10.0, &pool, &mut StdRand::seed(seed))
            .unwrap();
        assert_eq!(20, candidates.len());
        assert_invariants(&candidates, &constraints, Tier::FiftyK.target_payout());

        let mut keys = candidates
            .iter()
            .map(|candidate| {
                let mut leg_ids = candidate.leg_ids.clone();
                leg_ids.sort();
                leg_ids
            })
            .collect::<Vec<_>>();
        keys.sort();
        keys.dedup();
        assert_eq!(20, keys.len(), "candidates must be distinct");
    }
}

#[test]
fn ranked_by_expected_value() {
    let pool = slate(20, 3);
    let candidates = Assembler::default()
        .assemble(Tier::FiftyK, 10.0, &pool, &mut StdRand::seed(42))
        .unwrap();
    assert!(!candidates.is_empty());
    for pair in candidates.windows(2) {
        assert!(pair[0].expected_value() >= pair[1].expected_value());
    }
}

#[test]
fn team_cap_is_enforced() {
    // three teams shared across twelve games, so the per-team cap binds before the per-game rule
    let pool = (0..12)
        .map(|index| {
            leg(format!("l{index}"), format!("g{index}"), 3.0, 70.0).with_team(format!("t{}", index % 3))
        })
        .collect::<Vec<_>>();
    let constraints = Constraints {
        min_legs: 3,
        max_legs: 8,
        max_per_team: 2,
        ..Constraints::default()
    };
    let candidates = assembler(constraints.clone(), BuildOptions::default())
        .assemble(Tier::FiftyK, 100.0, &pool, &mut StdRand::seed(9))
        .unwrap();
    assert!(!candidates.is_empty());
    assert_invariants(&candidates, &constraints, Tier::FiftyK.target_payout());
    assert!(candidates.iter().all(|candidate| candidate.legs.len() <= 6));
}

#[test]
fn reproducible_for_seed() {
    let pool = slate(15, 4);
    let assembler = Assembler::default();
    let first = assembler
        .assemble(Tier::HundredK, 25.0, &pool, &mut StdRand::seed(77))
        .unwrap();
    let second = assembler
        .assemble(Tier::HundredK, 25.0, &pool, &mut StdRand::seed(77))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn max_candidates_respected() {
    let pool = slate(20, 3);
    let options = BuildOptions {
        max_candidates: 3,
        ..BuildOptions::default()
    };
    let candidates = assembler(Constraints::default(), options)
        .assemble(Tier::FiftyK, 10.0, &pool, &mut StdRand::seed(5))
        .unwrap();
    assert_eq!(3, candidates.len());
}

#[test]
fn unreachable_tier() {
    let pool = slate(20, 3);
    let candidates = Assembler::default()
        .assemble(Tier::OneM, 0.01, &pool, &mut StdRand::seed(5))
        .unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn invalid_stake() {
    let pool = slate(20, 3);
    for stake in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let result = Assembler::default().assemble(Tier::FiftyK, stake, &pool, &mut StdRand::seed(5));
        assert!(matches!(result, Err(BuildError::InvalidStake(_))));
    }
    assert_eq!(
        "stake must be a positive, finite amount, got -5",
        validate_stake(-5.0).unwrap_err().to_string()
    );
}

#[test]
fn invalid_config() {
    let config = Config {
        options: BuildOptions {
            attempts: 0,
            ..BuildOptions::default()
        },
        ..Config::default()
    };
    assert_eq!(
        "number of attempts must be at least 1",
        Assembler::try_from(config).unwrap_err().to_string()
    );
}

#[test]
fn candidate_serializes_camel_case() {
    let candidate = Candidate {
        leg_ids: vec!["l1".into()],
        payout: 20.5,
        decimal_product: 2.05,
        est_hit_prob: 0.6,
        legs: vec![],
    };
    let json = serde_json::to_string(&candidate).unwrap();
    assert_eq!(
        r#"{"legIds":["l1"],"payout":20.5,"decimalProduct":2.05,"estHitProb":0.6,"legs":[]}"#,
        json
    );
}

#[test]
fn max_achievable() {
    let legs = [leg("a", "g1", 1.5, 60.0), leg("b", "g2", 3.0, 60.0), leg("c", "g3", 2.0, 60.0)];
    let pool = legs.iter().collect::<Vec<_>>();
    assert_float_absolute_eq!(60.0, max_achievable_payout(&pool, 2, 10.0), 1e-9);
    assert_float_absolute_eq!(90.0, max_achievable_payout(&pool, 5, 10.0), 1e-9);
}

#[test]
fn rounding() {
    assert_eq!(6400.0, round_cents(6400.004));
    assert_eq!(1234.57, round_cents(1234.5678));
}

#[test]
fn payout_exactly_at_target_survives_unreachability_check() {
    // the descending product of these prices falls an ulp short of the target, while the orders
    // in which the assembler multiplies them mostly reach it exactly
    let pool = vec![
        leg("s1", "g1", 1.6, 90.0),
        leg("s2", "g2", 1.86, 85.0),
        leg("s3", "g3", 2.29, 80.0),
        leg("f1", "g4", 2.39, 60.0),
        leg("f2", "g5", 2.98, 60.0),
        leg("f3", "g6", 3.16, 60.0),
    ];
    let constraints = Constraints {
        min_legs: 6,
        max_legs: 6,
        ..Constraints::default()
    };
    let stake = 325.98704972696135;
    let legs = pool.iter().collect::<Vec<_>>();
    assert!(max_achievable_payout(&legs, 6, stake) < Tier::FiftyK.target_payout());

    let candidates = assembler(constraints, BuildOptions::default())
        .assemble(Tier::FiftyK, stake, &pool, &mut StdRand::seed(1))
        .unwrap();
    assert_eq!(1, candidates.len());
    assert_eq!(vec!["s1", "s2", "s3"], candidates[0].leg_ids[..3].to_vec());
    assert_eq!(50_000.0, candidates[0].payout);
}

#[test]
fn unbounded_leg_count_and_candidate_limit() {
    let pool = slate(20, 3);
    let constraints = Constraints {
        max_legs: usize::MAX,
        ..Constraints::default()
    };
    let options = BuildOptions {
        max_candidates: usize::MAX,
        attempts: 50,
        ..BuildOptions::default()
    };
    let candidates = assembler(constraints.clone(), options)
        .assemble(Tier::FiftyK, 10.0, &pool, &mut StdRand::seed(8))
        .unwrap();
    assert!(!candidates.is_empty());
    assert!(candidates.len() <= 50);
    assert!(candidates.iter().all(|candidate| candidate.legs.len() <= 20));
    assert_invariants(&candidates, &constraints, Tier::FiftyK.target_payout());
}

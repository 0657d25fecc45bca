use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::candidate::Candidate;
use crate::display::DisplaySlice;
use crate::leg::Leg;
use crate::optimise::Parlay;
use crate::probs;

pub fn tabulate_candidates(candidates: &[Candidate]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(14)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(30)).with(HAlign::Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Rank".into(),
                "Legs".into(),
                "Product".into(),
                "Payout".into(),
                "Hit prob.".into(),
                "Exp. value".into(),
                "Leg IDs".into(),
            ],
        ));

    for (index, candidate) in candidates.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                format!("{}", candidate.legs.len()).into(),
                format!("{:.3}", candidate.decimal_product).into(),
                format!("{:.2}", candidate.payout).into(),
                format!("{:.8}", candidate.est_hit_prob).into(),
                format!("{:.2}", candidate.expected_value()).into(),
                format!("{}", DisplaySlice::from(&*candidate.leg_ids)).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_legs(legs: &[&Leg]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(24)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "ID".into(),
                "Game".into(),
                "Team".into(),
                "Market".into(),
                "Selection".into(),
                "Price".into(),
                "Edge".into(),
                "Hit prob.".into(),
            ],
        ));

    for leg in legs {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                leg.id.clone().into(),
                leg.game_id.clone().into(),
                leg.team.clone().unwrap_or_default().into(),
                format!("{}", leg.market).into(),
                leg.selection.clone().into(),
                format!("{:.3}", leg.price_decimal).into(),
                format!("{:.1}", leg.edge_score).into(),
                format!("{:.2}", probs::leg_hit_prob(leg.edge_score)).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_parlays(parlays: &[Parlay]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(14)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(14)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Centred)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Tolerance".into(),
                "Legs".into(),
                "Odds".into(),
                "Payout".into(),
                "Confidence".into(),
                "Exp. value".into(),
                "Correlation".into(),
                "Target".into(),
            ],
        ));

    for parlay in parlays {
        let metrics = &parlay.metrics;
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", parlay.tolerance).into(),
                format!("{}", parlay.legs.len()).into(),
                format!("{:+}", metrics.american_odds).into(),
                format!("{:.2}", metrics.payout).into(),
                format!("{}%", metrics.combined_confidence).into(),
                format!("{:.2}", metrics.expected_value).into(),
                format!("{:.2}", metrics.correlation_risk).into(),
                if metrics.reaches_target { "yes" } else { "no" }.into(),
            ],
        ));
    }
    table
}

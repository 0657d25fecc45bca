//! A [Leg] is a single selectable bet outcome, usable as one component of a parlay.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::odds;

pub const EDGE_RANGE: RangeInclusive<f64> = 0.0..=100.0;
pub const MIN_PRICE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Market {
    #[serde(alias = "H2H", alias = "moneyline")]
    #[strum(to_string = "Moneyline", serialize = "H2H")]
    Moneyline,
    #[serde(alias = "total")]
    Total,
    #[serde(alias = "prop")]
    Prop,
    #[serde(alias = "future")]
    Future,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub id: String,
    pub game_id: String,
    #[serde(default, alias = "teamName", skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub market: Market,
    #[serde(default)]
    pub selection: String,
    pub price_decimal: f64,
    pub edge_score: f64,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risk_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}
impl Leg {
    /// A prop leg with no team, no risk flags and a start time of now. Refine with the `with_*` methods.
    pub fn new(id: impl Into<String>, game_id: impl Into<String>, price_decimal: f64, edge_score: f64) -> Self {
        Self {
            id: id.into(),
            game_id: game_id.into(),
            team: None,
            market: Market::Prop,
            selection: String::new(),
            price_decimal,
            edge_score,
            start_time: Utc::now(),
            risk_flags: vec![],
            player_name: None,
            prop_type: None,
            line: None,
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_market(mut self, market: Market) -> Self {
        self.market = market;
        self
    }

    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = selection.into();
        self
    }

    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_risk_flag(mut self, flag: impl Into<String>) -> Self {
        self.risk_flags.push(flag.into());
        self
    }

    /// Reprices the leg from an American quote, falling back to [odds::DEFAULT_AMERICAN] when absent.
    pub fn with_american(mut self, american: Option<f64>) -> Self {
        self.price_decimal = odds::american_to_decimal(american.unwrap_or(odds::DEFAULT_AMERICAN));
        self
    }

    pub fn with_prop(mut self, player_name: impl Into<String>, prop_type: impl Into<String>, line: impl Into<String>) -> Self {
        self.player_name = Some(player_name.into());
        self.prop_type = Some(prop_type.into());
        self.line = Some(line.into());
        self
    }

    #[inline]
    pub fn is_flagged(&self) -> bool {
        !self.risk_flags.is_empty()
    }

    pub fn validate(&self) -> Result<(), MalformedLeg> {
        let defect = if self.id.trim().is_empty() {
            Some(Defect::MissingId)
        } else if self.game_id.trim().is_empty() {
            Some(Defect::MissingGameId)
        } else if !self.price_decimal.is_finite() || self.price_decimal < MIN_PRICE {
            Some(Defect::InvalidPrice(self.price_decimal))
        } else if !self.edge_score.is_finite() || !EDGE_RANGE.contains(&self.edge_score) {
            Some(Defect::InvalidEdge(self.edge_score))
        } else {
            None
        };
        match defect {
            None => Ok(()),
            Some(defect) => Err(MalformedLeg {
                id: self.id.clone(),
                defect,
            }),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("malformed leg '{id}': {defect}")]
pub struct MalformedLeg {
    pub id: String,
    pub defect: Defect,
}

#[derive(Debug, Error, PartialEq)]
pub enum Defect {
    #[error("missing id")]
    MissingId,

    #[error("missing game id")]
    MissingGameId,

    #[error("price {0} is not a decimal price of at least 1")]
    InvalidPrice(f64),

    #[error("edge score {0} lies outside [0, 100]")]
    InvalidEdge(f64),
}

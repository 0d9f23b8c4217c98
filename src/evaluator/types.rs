use serde::{Deserialize, Serialize};

/// One side of a proposed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[serde(alias = "A", alias = "team1")]
    A,
    #[serde(alias = "B", alias = "team2")]
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Which side comes out ahead, independent of whether the trade is fair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinningSide {
    A,
    B,
    #[serde(rename = "none")]
    Even,
}

impl WinningSide {
    pub fn from_advantage(advantage: f64) -> Self {
        if advantage > 0.0 {
            WinningSide::A
        } else if advantage < 0.0 {
            WinningSide::B
        } else {
            WinningSide::Even
        }
    }

    /// Label used by the trade analysis endpoint
    pub fn label(&self) -> &'static str {
        match self {
            WinningSide::A => "team1",
            WinningSide::B => "team2",
            WinningSide::Even => "tie",
        }
    }
}

/// Computed comparison of two sides of a trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeEvaluation {
    pub total_a: f64,
    pub total_b: f64,
    /// Signed, relative to side A: `total_a - total_b`
    pub advantage: f64,
    pub is_fair: bool,
    pub winning_side: WinningSide,
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider-assigned player identifier. Team defenses use negative ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(PlayerId)
    }
}

/// Roster positions a player can be valued at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
    #[serde(rename = "K")]
    Kicker,
    #[serde(rename = "D/ST", alias = "DST")]
    Defense,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::Quarterback,
        Position::RunningBack,
        Position::WideReceiver,
        Position::TightEnd,
        Position::Kicker,
        Position::Defense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "D/ST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InjuryStatus {
    #[default]
    Active,
    Questionable,
    Doubtful,
    Out,
    #[serde(alias = "IR", alias = "INJURY_RESERVE")]
    Injured,
}

impl InjuryStatus {
    /// Maps the provider's free-form status onto the closed set shown in the UI.
    pub fn from_provider(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "QUESTIONABLE" | "PROBABLE" | "DAY_TO_DAY" => InjuryStatus::Questionable,
            "DOUBTFUL" => InjuryStatus::Doubtful,
            "OUT" | "SUSPENSION" => InjuryStatus::Out,
            "INJURED" | "INJURY_RESERVE" | "IR" => InjuryStatus::Injured,
            _ => InjuryStatus::Active,
        }
    }
}

/// Lineup slot a rostered player currently occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineupSlot {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
    #[serde(rename = "FLEX")]
    Flex,
    #[serde(rename = "K")]
    Kicker,
    #[serde(rename = "D/ST")]
    Defense,
    #[serde(rename = "BENCH")]
    Bench,
    #[serde(rename = "IR")]
    InjuredReserve,
}

impl LineupSlot {
    pub fn is_starter(&self) -> bool {
        !matches!(self, LineupSlot::Bench | LineupSlot::InjuredReserve)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineupSlot::Quarterback => "QB",
            LineupSlot::RunningBack => "RB",
            LineupSlot::WideReceiver => "WR",
            LineupSlot::TightEnd => "TE",
            LineupSlot::Flex => "FLEX",
            LineupSlot::Kicker => "K",
            LineupSlot::Defense => "D/ST",
            LineupSlot::Bench => "BENCH",
            LineupSlot::InjuredReserve => "IR",
        }
    }
}

fn free_agent() -> String {
    "FA".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    pub position: Position,
    #[serde(default = "free_agent")]
    pub team: String,
    #[serde(default)]
    pub injury_status: InjuryStatus,
    #[serde(default)]
    pub trade_value: Option<f64>,
    #[serde(default)]
    pub season_points: f64,
    #[serde(default)]
    pub avg_points: f64,
    #[serde(default)]
    pub projected_points: f64,
    #[serde(default)]
    pub lineup_slot: Option<LineupSlot>,
    #[serde(default)]
    pub percent_owned: f64,
    #[serde(default)]
    pub percent_started: f64,
}

impl Player {
    pub fn new(id: i64, name: impl Into<String>, position: Position) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
            position,
            team: free_agent(),
            injury_status: InjuryStatus::Active,
            trade_value: None,
            season_points: 0.0,
            avg_points: 0.0,
            projected_points: 0.0,
            lineup_slot: None,
            percent_owned: 0.0,
            percent_started: 0.0,
        }
    }

    #[must_use]
    pub fn with_trade_value(mut self, value: f64) -> Self {
        self.trade_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_lineup_slot(mut self, slot: LineupSlot) -> Self {
        self.lineup_slot = Some(slot);
        self
    }

    /// Trade value used for comparisons; missing or non-finite values count as zero.
    pub fn value(&self) -> f64 {
        match self.trade_value {
            Some(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }

    pub fn is_starter(&self) -> bool {
        self.lineup_slot.map(|s| s.is_starter()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_nan_value_counts_as_zero() {
        let p = Player::new(1, "A", Position::Kicker);
        assert_eq!(p.value(), 0.0);
        let p = p.with_trade_value(f64::NAN);
        assert_eq!(p.value(), 0.0);
    }

    #[test]
    fn starter_depends_on_slot() {
        let p = Player::new(1, "A", Position::RunningBack);
        assert!(!p.is_starter());
        assert!(p.clone().with_lineup_slot(LineupSlot::Flex).is_starter());
        assert!(!p.clone().with_lineup_slot(LineupSlot::Bench).is_starter());
        assert!(!p.with_lineup_slot(LineupSlot::InjuredReserve).is_starter());
    }

    #[test]
    fn provider_injury_statuses_collapse() {
        assert_eq!(InjuryStatus::from_provider("INJURY_RESERVE"), InjuryStatus::Injured);
        assert_eq!(InjuryStatus::from_provider("day_to_day"), InjuryStatus::Questionable);
        assert_eq!(InjuryStatus::from_provider("SUSPENSION"), InjuryStatus::Out);
        assert_eq!(InjuryStatus::from_provider(""), InjuryStatus::Active);
    }

    #[test]
    fn deserializes_minimal_player_record() {
        let p: Player = serde_json::from_str(r#"{"id": -16001, "position": "D/ST"}"#).unwrap();
        assert_eq!(p.id, PlayerId(-16001));
        assert_eq!(p.position, Position::Defense);
        assert_eq!(p.team, "FA");
        assert_eq!(p.trade_value, None);
    }
}

use csv::Reader;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::evaluator::{side_total, TradeEvaluation};
use crate::league::{Player, PlayerId, Position};

/// Rounds to the given number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Scarcity multiplier applied to a player's points when computing trade value
pub fn position_multiplier(position: Position) -> f64 {
    match position {
        Position::Quarterback => 1.0,
        Position::RunningBack => 1.2,
        Position::WideReceiver => 1.1,
        Position::TightEnd => 1.0,
        Position::Kicker => 0.5,
        Position::Defense => 0.7,
    }
}

/// Heuristic trade value: 70% recent form, 30% projection, scaled by position
/// scarcity and rounded to one decimal.
pub fn player_trade_value(position: Position, avg_points: f64, projected_points: f64) -> f64 {
    let base_value = avg_points * 0.7 + projected_points * 0.3;
    round_to(base_value * position_multiplier(position), 1)
}

/// Season points per completed week; zero when nothing has been scored
pub fn average_points(season_points: f64, weeks_played: u32) -> f64 {
    if season_points > 0.0 {
        season_points / f64::from(weeks_played.max(1))
    } else {
        0.0
    }
}

/// Value summary for one side of a trade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideValue {
    pub total_value: f64,
    pub position_breakdown: BTreeMap<Position, f64>,
    pub average_value: f64,
}

pub fn side_value(players: &[Player]) -> SideValue {
    let mut position_breakdown: BTreeMap<Position, f64> =
        Position::ALL.iter().map(|p| (*p, 0.0)).collect();
    for player in players {
        *position_breakdown.entry(player.position).or_insert(0.0) += player.value();
    }
    for value in position_breakdown.values_mut() {
        *value = round_to(*value, 2);
    }

    let total = side_total(players);
    SideValue {
        total_value: round_to(total, 2),
        position_breakdown,
        average_value: round_to(total / players.len().max(1) as f64, 2),
    }
}

/// Short verdict shown next to the trade bars
pub fn recommendation(evaluation: &TradeEvaluation) -> String {
    if evaluation.is_fair {
        "Accept".to_string()
    } else {
        format!(
            "Decline - {} wins by {:.1} points",
            evaluation.winning_side.label(),
            evaluation.advantage.abs()
        )
    }
}

/// Advice for the user given the points they gain (positive) or lose
pub fn outlook(net_change: f64) -> &'static str {
    if net_change > 10.0 {
        "Excellent trade for you! This significantly improves your team."
    } else if net_change > 5.0 {
        "Good trade for you. Consider accepting this offer."
    } else if net_change > 0.0 {
        "Slight advantage to you. Worth considering based on team needs."
    } else if net_change > -5.0 {
        "Fairly even trade. Consider roster construction and bye weeks."
    } else if net_change > -10.0 {
        "This trade favors your opponent. You might want to ask for more."
    } else {
        "Poor trade for you. Consider declining or asking for significant additions."
    }
}

#[derive(Debug, Error)]
pub enum ValueOverrideError {
    #[error("failed to read value overrides: {0}")]
    Csv(#[from] csv::Error),

    #[error("value overrides are missing a '{0}' column")]
    MissingColumn(&'static str),
}

/// Loads externally computed trade values from a CSV file with `player_id`
/// and `trade_value` columns. Rows that don't parse or carry a negative
/// value are skipped.
pub fn load_value_overrides<P: AsRef<Path>>(
    csv_path: P,
) -> Result<HashMap<PlayerId, f64>, ValueOverrideError> {
    let mut reader = Reader::from_path(csv_path)?;
    let headers = reader.headers()?.clone();

    let id_col = headers
        .iter()
        .position(|h| matches!(h.trim().to_lowercase().as_str(), "player_id" | "playerid" | "id"))
        .ok_or(ValueOverrideError::MissingColumn("player_id"))?;
    let value_col = headers
        .iter()
        .position(|h| matches!(h.trim().to_lowercase().as_str(), "trade_value" | "value"))
        .ok_or(ValueOverrideError::MissingColumn("trade_value"))?;

    let mut overrides = HashMap::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let id = record.get(id_col).and_then(|v| v.parse::<PlayerId>().ok());
        let value = record
            .get(value_col)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite());

        match (id, value) {
            (Some(id), Some(value)) if value >= 0.0 => {
                overrides.insert(id, value);
            }
            (Some(id), Some(value)) => {
                warn!(row = line + 2, player_id = %id, value, "Skipping negative trade value override")
            }
            _ => warn!(row = line + 2, "Skipping malformed value override row"),
        }
    }

    debug!(count = overrides.len(), "Loaded trade value overrides");
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::TradeEvaluator;
    use std::io::Write;

    #[test]
    fn trade_value_blends_form_and_projection() {
        // (10 * 0.7 + 20 * 0.3) * 1.2 = 15.6
        assert_eq!(player_trade_value(Position::RunningBack, 10.0, 20.0), 15.6);
        // (12 * 0.7 + 0) * 0.5 = 4.2
        assert_eq!(player_trade_value(Position::Kicker, 12.0, 0.0), 4.2);
    }

    #[test]
    fn average_points_floor_one_week() {
        assert_eq!(average_points(80.0, 8), 10.0);
        assert_eq!(average_points(12.0, 0), 12.0);
        assert_eq!(average_points(0.0, 5), 0.0);
    }

    #[test]
    fn side_value_breaks_down_by_position() {
        let players = vec![
            Player::new(1, "A", Position::RunningBack).with_trade_value(10.5),
            Player::new(2, "B", Position::RunningBack).with_trade_value(4.5),
            Player::new(3, "C", Position::Quarterback),
        ];
        let value = side_value(&players);
        assert_eq!(value.total_value, 15.0);
        assert_eq!(value.average_value, 5.0);
        assert_eq!(value.position_breakdown[&Position::RunningBack], 15.0);
        assert_eq!(value.position_breakdown[&Position::Quarterback], 0.0);
        assert_eq!(value.position_breakdown.len(), 6);

        let empty = side_value(&[]);
        assert_eq!(empty.total_value, 0.0);
        assert_eq!(empty.average_value, 0.0);
    }

    #[test]
    fn recommendation_names_winner_when_unfair() {
        let a = vec![Player::new(1, "A", Position::WideReceiver).with_trade_value(20.0)];
        let b = vec![Player::new(2, "B", Position::WideReceiver).with_trade_value(12.0)];
        let eval = TradeEvaluator::default().evaluate(&a, &b);
        assert_eq!(recommendation(&eval), "Decline - team1 wins by 8.0 points");

        let eval = TradeEvaluator::default().evaluate(&a, &a);
        assert_eq!(recommendation(&eval), "Accept");
    }

    #[test]
    fn outlook_tiers() {
        assert!(outlook(11.0).starts_with("Excellent"));
        assert!(outlook(5.5).starts_with("Good"));
        assert!(outlook(0.1).starts_with("Slight"));
        assert!(outlook(0.0).starts_with("Fairly even"));
        assert!(outlook(-7.0).starts_with("This trade favors"));
        assert!(outlook(-10.0).starts_with("Poor"));
    }

    #[test]
    fn loads_overrides_and_skips_bad_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "player_id,name,trade_value").unwrap();
        writeln!(file, "4262921,Justin Jefferson,31.5").unwrap();
        writeln!(file, "-16002,Bills D/ST,6").unwrap();
        writeln!(file, "oops,Nobody,3").unwrap();
        writeln!(file, "99,Negative,-10").unwrap();
        writeln!(file, "12,Blank,").unwrap();
        file.flush().unwrap();

        let overrides = load_value_overrides(file.path()).unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides[&PlayerId(4262921)], 31.5);
        assert_eq!(overrides[&PlayerId(-16002)], 6.0);
        assert!(!overrides.contains_key(&PlayerId(99)));
    }

    #[test]
    fn overrides_require_value_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "player_id,name").unwrap();
        writeln!(file, "1,A").unwrap();
        file.flush().unwrap();

        let err = load_value_overrides(file.path()).unwrap_err();
        assert!(matches!(err, ValueOverrideError::MissingColumn("trade_value")));
    }
}

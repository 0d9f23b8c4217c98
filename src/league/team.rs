use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::player::{Player, PlayerId};

/// Normalizes an ESPN SWID for comparison ("{abc-123}" and "ABC-123" are equal)
pub fn normalize_swid(swid: &str) -> String {
    swid.trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .to_ascii_uppercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub abbrev: String,
    pub owner: String,
    /// SWIDs of the team's owners, braces stripped
    #[serde(default)]
    pub owner_ids: Vec<String>,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub points_for: f64,
    #[serde(default)]
    pub points_against: f64,
    pub roster: Vec<Player>,
}

impl Team {
    pub fn record(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }

    pub fn is_owned_by(&self, swid: &str) -> bool {
        let wanted = normalize_swid(swid);
        !wanted.is_empty() && self.owner_ids.iter().any(|o| normalize_swid(o) == wanted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    pub name: String,
    pub season: i32,
    pub size: usize,
    pub scoring_type: String,
    pub current_week: u32,
}

/// Result of connecting to a league: metadata, every team with its roster,
/// and a best guess at which team belongs to the requesting user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub league: League,
    pub teams: Vec<Team>,
    pub user_team_id: Option<u32>,
    /// Set when the user's team could not be matched by SWID and the first
    /// team was picked instead; the UI should ask for confirmation.
    pub uncertain_ownership: bool,
    pub connected_at: DateTime<Utc>,
}

impl LeagueSnapshot {
    pub fn new(league: League, teams: Vec<Team>, swid: Option<&str>) -> Self {
        let owned = swid.and_then(|s| teams.iter().find(|t| t.is_owned_by(s)));
        let (user_team_id, uncertain_ownership) = match owned {
            Some(team) => {
                tracing::info!(team = %team.name, "Matched user team by SWID");
                (Some(team.id), false)
            }
            None => {
                let fallback = teams.first().map(|t| t.id);
                if let Some(team) = teams.first() {
                    tracing::warn!(team = %team.name, "Could not identify user team, defaulting to first team");
                }
                (fallback, true)
            }
        };

        Self {
            league,
            teams,
            user_team_id,
            uncertain_ownership,
            connected_at: Utc::now(),
        }
    }

    pub fn team(&self, id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn user_team(&self) -> Option<&Team> {
        self.user_team_id.and_then(|id| self.team(id))
    }

    /// Finds a rostered player anywhere in the league
    pub fn find_player(&self, id: PlayerId) -> Option<(&Team, &Player)> {
        self.teams
            .iter()
            .find_map(|t| t.player(id).map(|p| (t, p)))
    }

    /// Replaces trade values with externally supplied ones. Returns how many
    /// rostered players were updated.
    pub fn apply_value_overrides(&mut self, overrides: &HashMap<PlayerId, f64>) -> usize {
        let mut updated = 0;
        for player in self.teams.iter_mut().flat_map(|t| t.roster.iter_mut()) {
            if let Some(value) = overrides.get(&player.id) {
                player.trade_value = Some(*value);
                updated += 1;
            }
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Position;

    fn team(id: u32, owner: &str) -> Team {
        Team {
            id,
            name: format!("Team {}", id),
            abbrev: format!("T{}", id),
            owner: "Owner".to_string(),
            owner_ids: vec![owner.to_string()],
            wins: 3,
            losses: 2,
            points_for: 0.0,
            points_against: 0.0,
            roster: vec![Player::new(id as i64 * 10, "P", Position::WideReceiver)],
        }
    }

    fn league() -> League {
        League {
            id: "123".to_string(),
            name: "Test".to_string(),
            season: 2024,
            size: 2,
            scoring_type: "STANDARD".to_string(),
            current_week: 5,
        }
    }

    #[test]
    fn swid_comparison_ignores_braces_and_case() {
        assert_eq!(normalize_swid(" {ab-12} "), "AB-12");
        assert!(team(1, "{AB-12}").is_owned_by("ab-12"));
        assert!(!team(1, "{AB-12}").is_owned_by(""));
    }

    #[test]
    fn user_team_matched_by_swid() {
        let snap = LeagueSnapshot::new(league(), vec![team(1, "{A}"), team(2, "{B}")], Some("{B}"));
        assert_eq!(snap.user_team_id, Some(2));
        assert!(!snap.uncertain_ownership);
    }

    #[test]
    fn unmatched_swid_falls_back_to_first_team() {
        let snap = LeagueSnapshot::new(league(), vec![team(1, "{A}"), team(2, "{B}")], Some("{C}"));
        assert_eq!(snap.user_team_id, Some(1));
        assert!(snap.uncertain_ownership);

        let empty = LeagueSnapshot::new(league(), Vec::new(), None);
        assert_eq!(empty.user_team_id, None);
    }

    #[test]
    fn overrides_replace_trade_values() {
        let mut snap = LeagueSnapshot::new(league(), vec![team(1, "{A}"), team(2, "{B}")], None);
        let overrides = HashMap::from([(PlayerId(20), 42.5), (PlayerId(999), 1.0)]);
        assert_eq!(snap.apply_value_overrides(&overrides), 1);
        let (owner, player) = snap.find_player(PlayerId(20)).unwrap();
        assert_eq!(owner.id, 2);
        assert_eq!(player.trade_value, Some(42.5));
    }
}

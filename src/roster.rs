use serde::Serialize;
use std::collections::BTreeMap;

use crate::league::{Player, Position, Team};
use crate::valuation::round_to;

/// A team's roster split the ways the roster page shows it
#[derive(Debug, Clone, Serialize)]
pub struct RosterView<'a> {
    pub all_players: &'a [Player],
    pub by_position: BTreeMap<Position, Vec<&'a Player>>,
    pub starters: Vec<&'a Player>,
    pub bench: Vec<&'a Player>,
    pub total_players: usize,
}

impl<'a> RosterView<'a> {
    pub fn from_team(team: &'a Team) -> Self {
        let mut by_position: BTreeMap<Position, Vec<&Player>> =
            Position::ALL.iter().map(|p| (*p, Vec::new())).collect();
        let mut starters = Vec::new();
        let mut bench = Vec::new();

        for player in &team.roster {
            by_position.entry(player.position).or_default().push(player);
            if player.is_starter() {
                starters.push(player);
            } else {
                bench.push(player);
            }
        }

        Self {
            all_players: &team.roster,
            by_position,
            starters,
            bench,
            total_players: team.roster.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TeamStats {
    pub total_points: f64,
    pub avg_starter_points: f64,
    pub projected_points: f64,
}

impl TeamStats {
    pub fn from_roster(view: &RosterView<'_>) -> Self {
        let total_points: f64 = view.all_players.iter().map(|p| p.season_points).sum();
        let starter_avg: f64 = view.starters.iter().map(|p| p.avg_points).sum();
        let projected_points: f64 = view.starters.iter().map(|p| p.projected_points).sum();

        Self {
            total_points: round_to(total_points, 1),
            avg_starter_points: round_to(starter_avg / view.starters.len().max(1) as f64, 1),
            projected_points: round_to(projected_points, 1),
        }
    }
}

/// Header block of the roster page
#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary<'a> {
    pub id: u32,
    pub name: &'a str,
    pub owner: &'a str,
    pub record: String,
}

impl<'a> From<&'a Team> for TeamSummary<'a> {
    fn from(team: &'a Team) -> Self {
        Self {
            id: team.id,
            name: &team.name,
            owner: &team.owner,
            record: team.record(),
        }
    }
}

use tracing::{debug, info};

use super::models::{LeagueResponse, MemberResponse, RosterEntry, StatLine, TeamResponse};
use crate::league::{
    normalize_swid, InjuryStatus, League, LeagueSnapshot, LineupSlot, Player, PlayerId, Position,
    Team,
};
use crate::valuation::{average_points, player_trade_value, round_to};

const STAT_SOURCE_ACTUAL: u32 = 0;
const STAT_SOURCE_PROJECTED: u32 = 1;
const STAT_SPLIT_SEASON: u32 = 0;

/// Maps ESPN's `defaultPositionId` onto a roster position
pub fn position_from_id(id: u32) -> Option<Position> {
    match id {
        1 => Some(Position::Quarterback),
        2 => Some(Position::RunningBack),
        3 => Some(Position::WideReceiver),
        4 => Some(Position::TightEnd),
        5 => Some(Position::Kicker),
        16 => Some(Position::Defense),
        _ => None,
    }
}

/// Maps ESPN's `lineupSlotId`; slots without a counterpart count as bench
pub fn lineup_slot_from_id(id: u32) -> LineupSlot {
    match id {
        0 => LineupSlot::Quarterback,
        2 => LineupSlot::RunningBack,
        4 => LineupSlot::WideReceiver,
        6 => LineupSlot::TightEnd,
        16 => LineupSlot::Defense,
        17 => LineupSlot::Kicker,
        21 => LineupSlot::InjuredReserve,
        23 => LineupSlot::Flex,
        _ => LineupSlot::Bench,
    }
}

pub fn pro_team_abbrev(id: u32) -> &'static str {
    match id {
        1 => "ATL",
        2 => "BUF",
        3 => "CHI",
        4 => "CIN",
        5 => "CLE",
        6 => "DAL",
        7 => "DEN",
        8 => "DET",
        9 => "GB",
        10 => "TEN",
        11 => "IND",
        12 => "KC",
        13 => "LV",
        14 => "LAR",
        15 => "MIA",
        16 => "MIN",
        17 => "NE",
        18 => "NO",
        19 => "NYG",
        20 => "NYJ",
        21 => "PHI",
        22 => "ARI",
        23 => "PIT",
        24 => "LAC",
        25 => "SF",
        26 => "SEA",
        27 => "TB",
        28 => "WSH",
        29 => "CAR",
        30 => "JAX",
        33 => "BAL",
        34 => "HOU",
        _ => "FA",
    }
}

fn season_total(stats: &[StatLine], season: i32, source: u32) -> Option<f64> {
    stats
        .iter()
        .find(|s| {
            s.season_id == season
                && s.stat_source_id == source
                && s.stat_split_type_id == STAT_SPLIT_SEASON
        })
        .map(|s| s.applied_total)
}

/// Converts a roster entry into a player. Returns None for entries without
/// player data or at positions the analyzer does not value (IDP, punters).
pub fn parse_player(entry: &RosterEntry, season: i32, weeks_played: u32) -> Option<Player> {
    let pool = entry.player_pool_entry.as_ref()?;
    let raw = &pool.player;

    let Some(position) = position_from_id(raw.default_position_id) else {
        debug!(player = %raw.full_name, position_id = raw.default_position_id, "Skipping player at unsupported position");
        return None;
    };

    let season_points = season_total(&raw.stats, season, STAT_SOURCE_ACTUAL)
        .or(pool.applied_stat_total)
        .unwrap_or(0.0);
    let projected_points = season_total(&raw.stats, season, STAT_SOURCE_PROJECTED).unwrap_or(0.0);
    let avg_points = average_points(season_points, weeks_played);

    let injury_status = match entry.injury_status.as_deref().or(raw.injury_status.as_deref()) {
        Some(status) => InjuryStatus::from_provider(status),
        None if raw.injured == Some(true) => InjuryStatus::Injured,
        None => InjuryStatus::Active,
    };

    let id = if raw.id != 0 { raw.id } else { entry.player_id };
    let name = if raw.full_name.trim().is_empty() {
        "Unknown Player".to_string()
    } else {
        raw.full_name.clone()
    };
    let ownership = raw.ownership.as_ref();

    Some(Player {
        id: PlayerId(id),
        name,
        position,
        team: pro_team_abbrev(raw.pro_team_id).to_string(),
        injury_status,
        trade_value: Some(player_trade_value(position, avg_points, projected_points)),
        season_points: round_to(season_points, 1),
        avg_points: round_to(avg_points, 1),
        projected_points: round_to(projected_points, 1),
        lineup_slot: Some(entry.lineup_slot_id.map(lineup_slot_from_id).unwrap_or(LineupSlot::Bench)),
        percent_owned: ownership.map(|o| o.percent_owned).unwrap_or(0.0),
        percent_started: ownership.map(|o| o.percent_started).unwrap_or(0.0),
    })
}

fn team_name(team: &TeamResponse) -> String {
    if let Some(name) = team.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    let joined = format!(
        "{} {}",
        team.location.as_deref().unwrap_or(""),
        team.nickname.as_deref().unwrap_or("")
    );
    let joined = joined.trim();
    if joined.is_empty() {
        "Unknown Team".to_string()
    } else {
        joined.to_string()
    }
}

fn owner_name(team: &TeamResponse, members: &[MemberResponse]) -> String {
    let owner_id = team.primary_owner.as_deref().or(team.owners.first().map(String::as_str));
    let member = owner_id.and_then(|id| {
        let wanted = normalize_swid(id);
        members.iter().find(|m| normalize_swid(&m.id) == wanted)
    });

    let Some(member) = member else {
        return "Unknown".to_string();
    };
    let full_name = format!(
        "{} {}",
        member.first_name.as_deref().unwrap_or(""),
        member.last_name.as_deref().unwrap_or("")
    );
    let full_name = full_name.trim();
    if !full_name.is_empty() {
        full_name.to_string()
    } else {
        member.display_name.clone().unwrap_or_else(|| "Unknown".to_string())
    }
}

pub fn parse_team(team: &TeamResponse, members: &[MemberResponse], season: i32, weeks_played: u32) -> Team {
    let name = team_name(team);
    let roster: Vec<Player> = team
        .roster
        .entries
        .iter()
        .filter_map(|entry| parse_player(entry, season, weeks_played))
        .collect();

    debug!(team = %name, players = roster.len(), "Parsed team roster");

    Team {
        id: team.id,
        name,
        abbrev: team.abbrev.clone().unwrap_or_default(),
        owner: owner_name(team, members),
        owner_ids: team.owners.iter().map(|o| normalize_swid(o)).collect(),
        wins: team.record.overall.wins,
        losses: team.record.overall.losses,
        points_for: round_to(team.record.overall.points_for, 2),
        points_against: round_to(team.record.overall.points_against, 2),
        roster,
    }
}

/// Builds a snapshot from the league endpoint's response. `swid` identifies
/// the requesting user's team when available.
pub fn parse_league(response: &LeagueResponse, swid: Option<&str>) -> LeagueSnapshot {
    let season = response.season_id;
    let current_week = response
        .status
        .current_matchup_period
        .max(response.scoring_period_id)
        .max(1);
    // averages are taken over completed weeks
    let weeks_played = response
        .status
        .latest_scoring_period
        .max(response.scoring_period_id)
        .saturating_sub(1)
        .max(1);

    let teams: Vec<Team> = response
        .teams
        .iter()
        .map(|t| parse_team(t, &response.members, season, weeks_played))
        .collect();

    let league = League {
        id: response.id.to_string(),
        name: response
            .settings
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("League {}", response.id)),
        season,
        size: teams.len(),
        scoring_type: response
            .settings
            .scoring_settings
            .scoring_type
            .clone()
            .unwrap_or_else(|| "STANDARD".to_string()),
        current_week,
    };

    info!(league = %league.name, season, teams = teams.len(), "Parsed league");
    LeagueSnapshot::new(league, teams, swid)
}

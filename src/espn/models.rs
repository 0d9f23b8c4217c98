//! Wire types for the ESPN fantasy football v3 league endpoint
//! (`mTeam`, `mRoster` and `mSettings` views). Only the fields the
//! analyzer reads are modeled; everything is defaulted because ESPN omits
//! fields freely depending on league privacy and season state.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeagueResponse {
    pub id: i64,
    pub season_id: i32,
    pub scoring_period_id: u32,
    pub settings: SettingsResponse,
    pub status: StatusResponse,
    pub teams: Vec<TeamResponse>,
    pub members: Vec<MemberResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsResponse {
    pub name: Option<String>,
    pub scoring_settings: ScoringSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringSettings {
    pub scoring_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusResponse {
    pub current_matchup_period: u32,
    pub latest_scoring_period: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamResponse {
    pub id: u32,
    pub abbrev: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub nickname: Option<String>,
    pub owners: Vec<String>,
    pub primary_owner: Option<String>,
    pub record: RecordResponse,
    pub roster: RosterResponse,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordResponse {
    pub overall: RecordLine,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordLine {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterResponse {
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterEntry {
    pub player_id: i64,
    pub lineup_slot_id: Option<u32>,
    pub injury_status: Option<String>,
    pub player_pool_entry: Option<PlayerPoolEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerPoolEntry {
    pub applied_stat_total: Option<f64>,
    pub player: PlayerResponse,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerResponse {
    pub id: i64,
    pub full_name: String,
    pub default_position_id: u32,
    pub pro_team_id: u32,
    pub injury_status: Option<String>,
    pub injured: Option<bool>,
    pub ownership: Option<OwnershipResponse>,
    pub stats: Vec<StatLine>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnershipResponse {
    pub percent_owned: f64,
    pub percent_started: f64,
}

/// One stat aggregate. `stat_source_id` 0 is actual, 1 is projected;
/// `stat_split_type_id` 0 is the full season, 1 a single week.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatLine {
    pub season_id: i32,
    pub scoring_period_id: u32,
    pub stat_source_id: u32,
    pub stat_split_type_id: u32,
    pub applied_total: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberResponse {
    pub id: String,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

//! Seeded synthetic league for demos and offline tests.
//!
//! The same seed always produces the same teams, rosters and statistics, so
//! the CLI's `--demo` mode and the API tests can run without ESPN.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::league::{
    ConnectRequest, InjuryStatus, League, LeagueError, LeagueSnapshot, LeagueSource, LineupSlot, Player,
    Position, Team,
};
use crate::valuation::{average_points, player_trade_value, round_to};

pub const SAMPLE_TEAM_COUNT: u32 = 10;
pub const SAMPLE_SEASON: i32 = 2025;
pub const SAMPLE_CURRENT_WEEK: u32 = 9;

/// Players per position on every sample roster (16 in total)
const ROSTER_TEMPLATE: [(Position, usize); 6] = [
    (Position::Quarterback, 2),
    (Position::RunningBack, 5),
    (Position::WideReceiver, 5),
    (Position::TightEnd, 2),
    (Position::Kicker, 1),
    (Position::Defense, 1),
];

const TEAM_NAMES: [&str; 10] = [
    "Gridiron Gurus",
    "End Zone Elite",
    "Blitz Brigade",
    "Fourth and Long",
    "Hail Mary Heroes",
    "Red Zone Rebels",
    "Pigskin Prophets",
    "Touchdown Titans",
    "Sack Masters",
    "Waiver Wire Warriors",
];

const OWNER_NAMES: [&str; 10] = [
    "Alex Morgan",
    "Jordan Lee",
    "Sam Rivera",
    "Casey Kim",
    "Riley Chen",
    "Taylor Brooks",
    "Jamie Patel",
    "Morgan Diaz",
    "Drew Carter",
    "Quinn Foster",
];

const FIRST_NAMES: [&str; 16] = [
    "Marcus", "Tyler", "Jalen", "Derrick", "Cole", "Brandon", "Isaiah", "Trey", "Devon", "Caleb",
    "Malik", "Austin", "Darius", "Kyle", "Xavier", "Nate",
];

const LAST_NAMES: [&str; 16] = [
    "Johnson", "Williams", "Harris", "Brooks", "Walker", "Mitchell", "Coleman", "Bennett", "Hayes",
    "Porter", "Griffin", "Sanders", "Reed", "Foster", "Russell", "Perry",
];

const PRO_TEAMS: [&str; 16] = [
    "KC", "BUF", "PHI", "SF", "DAL", "MIA", "DET", "BAL", "CIN", "LAR", "GB", "MIN", "SEA", "NYJ",
    "LV", "WSH",
];

/// Weekly scoring range per position
fn weekly_range(position: Position) -> (f64, f64) {
    match position {
        Position::Quarterback => (12.0, 26.0),
        Position::RunningBack => (5.0, 20.0),
        Position::WideReceiver => (5.0, 19.0),
        Position::TightEnd => (3.0, 14.0),
        Position::Kicker => (5.0, 11.0),
        Position::Defense => (3.0, 12.0),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SampleLeague {
    seed: u64,
}

impl Default for SampleLeague {
    fn default() -> Self {
        Self::new(42)
    }
}

impl SampleLeague {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// SWID of the owner of a sample team, in ESPN's braced form
    pub fn owner_swid(&self, team_id: u32) -> String {
        format!("{{{:08X}-0000-4000-8000-{:012X}}}", self.seed as u32, team_id)
    }

    pub fn build(&self, league_id: &str, swid: Option<&str>) -> LeagueSnapshot {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let weeks_played = SAMPLE_CURRENT_WEEK - 1;

        let teams: Vec<Team> = (1..=SAMPLE_TEAM_COUNT)
            .map(|team_id| self.build_team(&mut rng, team_id, weeks_played))
            .collect();

        let league = League {
            id: league_id.to_string(),
            name: "Sample League".to_string(),
            season: SAMPLE_SEASON,
            size: teams.len(),
            scoring_type: "PPR".to_string(),
            current_week: SAMPLE_CURRENT_WEEK,
        };
        LeagueSnapshot::new(league, teams, swid)
    }

    fn build_team(&self, rng: &mut StdRng, team_id: u32, weeks_played: u32) -> Team {
        let idx = (team_id - 1) as usize;
        let mut roster = Vec::new();
        for (position, count) in ROSTER_TEMPLATE {
            for n in 0..count {
                let id = if position == Position::Defense {
                    -(16_000 + i64::from(team_id))
                } else {
                    4_000_000 + i64::from(team_id) * 100 + roster.len() as i64
                };
                let mut player = random_player(rng, id, position, weeks_played);
                player.lineup_slot = Some(starting_slot(position, n));
                roster.push(player);
            }
        }

        let wins = rng.gen_range(0..=weeks_played);
        Team {
            id: team_id,
            name: TEAM_NAMES[idx % TEAM_NAMES.len()].to_string(),
            abbrev: format!("T{}", team_id),
            owner: OWNER_NAMES[idx % OWNER_NAMES.len()].to_string(),
            owner_ids: vec![self.owner_swid(team_id)],
            wins,
            losses: weeks_played - wins,
            points_for: round_to(rng.gen_range(90.0..140.0) * f64::from(weeks_played), 1),
            points_against: round_to(rng.gen_range(90.0..140.0) * f64::from(weeks_played), 1),
            roster,
        }
    }
}

/// Slot for the `n`th player of a position: QB, RB x2, WR x2, TE, FLEX
/// (third RB), K and D/ST start; everyone else sits.
fn starting_slot(position: Position, n: usize) -> LineupSlot {
    match (position, n) {
        (Position::Quarterback, 0) => LineupSlot::Quarterback,
        (Position::RunningBack, 0 | 1) => LineupSlot::RunningBack,
        (Position::RunningBack, 2) => LineupSlot::Flex,
        (Position::WideReceiver, 0 | 1) => LineupSlot::WideReceiver,
        (Position::TightEnd, 0) => LineupSlot::TightEnd,
        (Position::Kicker, 0) => LineupSlot::Kicker,
        (Position::Defense, 0) => LineupSlot::Defense,
        _ => LineupSlot::Bench,
    }
}

fn random_player(rng: &mut StdRng, id: i64, position: Position, weeks_played: u32) -> Player {
    let pro_team = PRO_TEAMS[rng.gen_range(0..PRO_TEAMS.len())];
    let name = if position == Position::Defense {
        format!("{} D/ST", pro_team)
    } else {
        format!(
            "{} {}",
            FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
            LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())]
        )
    };

    let (low, high) = weekly_range(position);
    let weekly = rng.gen_range(low..high);
    let season_points = round_to(weekly * f64::from(weeks_played), 1);
    let avg_points = round_to(average_points(season_points, weeks_played), 1);
    let projected_points = round_to(weekly * 17.0 * rng.gen_range(0.85..1.15), 1);

    let injury_status = match rng.gen_range(0..20) {
        0 => InjuryStatus::Out,
        1 | 2 => InjuryStatus::Questionable,
        _ => InjuryStatus::Active,
    };

    let mut player = Player::new(id, name, position)
        .with_trade_value(player_trade_value(position, avg_points, projected_points));
    player.team = pro_team.to_string();
    player.injury_status = injury_status;
    player.season_points = season_points;
    player.avg_points = avg_points;
    player.projected_points = projected_points;
    player.percent_owned = round_to(rng.gen_range(20.0..100.0), 1);
    player.percent_started = round_to(player.percent_owned * rng.gen_range(0.2..1.0), 1);
    player
}

#[async_trait]
impl LeagueSource for SampleLeague {
    fn name(&self) -> &'static str {
        "sample"
    }

    async fn fetch_league(&self, request: &ConnectRequest) -> Result<LeagueSnapshot, LeagueError> {
        let league_id = request.league_id.trim();
        if league_id.is_empty() {
            return Err(LeagueError::InvalidLeagueId(request.league_id.clone()));
        }
        let credentials = request.credentials();
        let snapshot = self.build(league_id, credentials.as_ref().map(|c| c.swid.as_str()));
        tracing::info!(league_id, seed = self.seed, "Built sample league");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_league() {
        let a = SampleLeague::new(7).build("1", None);
        let b = SampleLeague::new(7).build("1", None);
        assert_eq!(a.teams, b.teams);
        assert_eq!(a.league, b.league);

        let c = SampleLeague::new(8).build("1", None);
        assert_ne!(a.teams, c.teams);
    }

    #[test]
    fn every_team_has_a_full_roster() {
        let snapshot = SampleLeague::default().build("1", None);
        assert_eq!(snapshot.teams.len(), SAMPLE_TEAM_COUNT as usize);
        assert_eq!(snapshot.league.size, 10);

        let mut ids = HashSet::new();
        for team in &snapshot.teams {
            assert_eq!(team.roster.len(), 16);
            assert_eq!(team.roster.iter().filter(|p| p.is_starter()).count(), 9);
            assert_eq!(team.wins + team.losses, SAMPLE_CURRENT_WEEK - 1);
            for player in &team.roster {
                assert!(ids.insert(player.id), "duplicate id {}", player.id);
                assert!(player.value() > 0.0);
            }
        }
    }

    #[test]
    fn defenses_use_negative_ids() {
        let snapshot = SampleLeague::default().build("1", None);
        for team in &snapshot.teams {
            let dst: Vec<_> = team.roster.iter().filter(|p| p.position == Position::Defense).collect();
            assert_eq!(dst.len(), 1);
            assert!(dst[0].id.0 < 0);
        }
    }

    #[test]
    fn owner_swid_selects_user_team() {
        let sample = SampleLeague::new(3);
        let snapshot = sample.build("1", Some(&sample.owner_swid(4)));
        assert_eq!(snapshot.user_team_id, Some(4));
        assert!(!snapshot.uncertain_ownership);

        let anonymous = sample.build("1", None);
        assert_eq!(anonymous.user_team_id, Some(1));
        assert!(anonymous.uncertain_ownership);
    }

    #[tokio::test]
    async fn fetch_rejects_blank_league_id() {
        let err = SampleLeague::default()
            .fetch_league(&ConnectRequest::new("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, LeagueError::InvalidLeagueId(_)));
    }
}

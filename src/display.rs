use serde::Serialize;
use std::io::Write;

use crate::evaluator::{Segment, TradeEvaluation, WinningSide};
use crate::league::{InjuryStatus, LeagueSnapshot, Player, Team};
use crate::roster::{RosterView, TeamStats};
use crate::valuation::{outlook, recommendation};

const BAR_FILLS: [char; 2] = ['#', '='];

/// Formats a player as "Name (POS, TEAM)" with an injury tag when not active
pub fn format_player_name(player: &Player) -> String {
    let mut name = format!("{} ({}, {})", player.name, player.position, player.team);
    if player.injury_status != InjuryStatus::Active {
        name.push_str(&format!(" [{:?}]", player.injury_status));
    }
    name
}

/// Draws a side's segments as a text bar, one fill character per player
/// alternating so neighbours stay distinguishable. Segment lengths are in
/// characters; boundaries are rounded so the bar never drifts.
pub fn render_bar(segments: &[Segment<'_>]) -> String {
    let mut bar = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let start = segment.offset.round() as usize;
        let end = (segment.offset + segment.segment_length).round() as usize;
        let fill = BAR_FILLS[i % BAR_FILLS.len()];
        bar.extend(std::iter::repeat(fill).take(end.saturating_sub(start)));
    }
    bar
}

pub fn print_league_summary(snapshot: &LeagueSnapshot) {
    let league = &snapshot.league;
    println!("\n=== {} ({}) ===", league.name, league.season);
    println!(
        "League {} | {} teams | {} scoring | week {}",
        league.id, league.size, league.scoring_type, league.current_week
    );

    for team in &snapshot.teams {
        let marker = if Some(team.id) == snapshot.user_team_id { "*" } else { " " };
        println!(
            " {} {:>2}. {:<24} {:<18} {:>5}  PF {:>7.1}",
            marker,
            team.id,
            team.name,
            team.owner,
            team.record(),
            team.points_for
        );
    }

    if snapshot.uncertain_ownership {
        println!("⚠️  Could not identify your team from SWID; defaulted to the first team");
    }
}

pub fn print_roster(team: &Team) {
    let view = RosterView::from_team(team);
    let stats = TeamStats::from_roster(&view);

    println!("\n=== {} ({}) ===", team.name, team.record());
    println!("Owner: {}", team.owner);
    println!(
        "Season points: {:.1} | Avg starter points: {:.1} | Projected (starters): {:.1}",
        stats.total_points, stats.avg_starter_points, stats.projected_points
    );

    println!("\nStarters ({}):", view.starters.len());
    for player in &view.starters {
        print_player_line(player);
    }
    println!("\nBench ({}):", view.bench.len());
    for player in &view.bench {
        print_player_line(player);
    }
}

fn print_player_line(player: &Player) {
    let slot = player.lineup_slot.map(|s| s.as_str()).unwrap_or("-");
    println!(
        "  {:<6} {:<40} avg {:>5.1}  proj {:>6.1}  value {:>6.1}",
        slot,
        format_player_name(player),
        player.avg_points,
        player.projected_points,
        player.value()
    );
}

/// Prints both sides of a trade with their bars and the verdict. `side_a` is
/// what the user gives, `side_b` what they receive.
pub fn print_trade(
    side_a: &[Player],
    side_b: &[Player],
    evaluation: &TradeEvaluation,
    segments_a: &[Segment<'_>],
    segments_b: &[Segment<'_>],
) {
    println!("\n=== Trade Analysis ===");
    println!("You give ({:.1}):", evaluation.total_a);
    for player in side_a {
        println!("  {:<40} {:>6.1}", format_player_name(player), player.value());
    }
    println!("  [{}]", render_bar(segments_a));

    println!("You receive ({:.1}):", evaluation.total_b);
    for player in side_b {
        println!("  {:<40} {:>6.1}", format_player_name(player), player.value());
    }
    println!("  [{}]", render_bar(segments_b));

    let verdict = if evaluation.is_fair { "FAIR" } else { "UNFAIR" };
    let leader = match evaluation.winning_side {
        WinningSide::A => "you give more value",
        WinningSide::B => "you receive more value",
        WinningSide::Even => "values are even",
    };
    println!("\nDifferential: {:+.1} ({}) -> {}", evaluation.advantage, leader, verdict);
    println!("Recommendation: {}", recommendation(evaluation));
    println!("{}", outlook(-evaluation.advantage));
}

#[derive(Serialize)]
struct RosterRow<'a> {
    player_id: i64,
    name: &'a str,
    position: &'static str,
    pro_team: &'a str,
    lineup_slot: &'static str,
    injury_status: InjuryStatus,
    trade_value: f64,
    season_points: f64,
    avg_points: f64,
    projected_points: f64,
}

/// Writes a team's roster as CSV, one row per player
pub fn write_roster_csv<W: Write>(team: &Team, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for player in &team.roster {
        csv_writer.serialize(RosterRow {
            player_id: player.id.0,
            name: &player.name,
            position: player.position.as_str(),
            pro_team: &player.team,
            lineup_slot: player.lineup_slot.map(|s| s.as_str()).unwrap_or(""),
            injury_status: player.injury_status,
            trade_value: player.value(),
            season_points: player.season_points,
            avg_points: player.avg_points,
            projected_points: player.projected_points,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::segment_breakdown;
    use crate::league::{LineupSlot, Position};

    #[test]
    fn bar_fills_requested_width() {
        let side = vec![
            Player::new(1, "A", Position::RunningBack).with_trade_value(30.0),
            Player::new(2, "B", Position::WideReceiver).with_trade_value(70.0),
        ];
        let bar = render_bar(&segment_breakdown(&side, 20.0));
        assert_eq!(bar, format!("{}{}", "#".repeat(6), "=".repeat(14)));
    }

    #[test]
    fn uneven_thirds_still_fill_width() {
        let side: Vec<Player> = (0..3)
            .map(|i| Player::new(i, "P", Position::TightEnd).with_trade_value(1.0))
            .collect();
        assert_eq!(render_bar(&segment_breakdown(&side, 10.0)).chars().count(), 10);
    }

    #[test]
    fn zero_value_side_draws_nothing() {
        let side = vec![Player::new(1, "A", Position::Kicker)];
        assert!(render_bar(&segment_breakdown(&side, 40.0)).is_empty());
    }

    #[test]
    fn player_name_includes_injury() {
        let mut player = Player::new(1, "Joe Burrow", Position::Quarterback);
        player.team = "CIN".to_string();
        assert_eq!(format_player_name(&player), "Joe Burrow (QB, CIN)");
        player.injury_status = InjuryStatus::Out;
        assert_eq!(format_player_name(&player), "Joe Burrow (QB, CIN) [Out]");
    }

    #[test]
    fn roster_csv_has_header_and_rows() {
        let team = Team {
            id: 1,
            name: "Team".to_string(),
            abbrev: "T".to_string(),
            owner: "Owner".to_string(),
            owner_ids: Vec::new(),
            wins: 0,
            losses: 0,
            points_for: 0.0,
            points_against: 0.0,
            roster: vec![Player::new(-16001, "ATL D/ST", Position::Defense)
                .with_trade_value(12.5)
                .with_lineup_slot(LineupSlot::Defense)],
        };

        let mut out = Vec::new();
        write_roster_csv(&team, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "player_id,name,position,pro_team,lineup_slot,injury_status,trade_value,season_points,avg_points,projected_points"
        );
        assert_eq!(lines.next().unwrap(), "-16001,ATL D/ST,D/ST,FA,D/ST,ACTIVE,12.5,0.0,0.0,0.0");
        assert!(lines.next().is_none());
    }
}

use serde::Serialize;

use crate::league::Player;

/// A player's share of a side's bar, laid out left to right
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment<'a> {
    pub player: &'a Player,
    pub segment_length: f64,
    pub offset: f64,
}

/// Splits `total_bar_length` between the players of one side in proportion to
/// their trade values, in input order. A side whose total is zero gets
/// zero-length segments.
pub fn segment_breakdown(side: &[Player], total_bar_length: f64) -> Vec<Segment<'_>> {
    let side_total: f64 = side.iter().map(Player::value).sum();

    let mut offset = 0.0;
    side.iter()
        .map(|player| {
            let segment_length = if side_total > 0.0 {
                total_bar_length * (player.value() / side_total)
            } else {
                0.0
            };
            let segment = Segment {
                player,
                segment_length,
                offset,
            };
            offset += segment_length;
            segment
        })
        .collect()
}

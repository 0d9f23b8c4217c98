use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::evaluator::{Side, TradeEvaluation, TradeEvaluator};
use crate::league::{Player, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProposalError {
    #[error("player {id} is already on the other side of the trade")]
    PlayerOnBothSides { id: PlayerId },
}

/// Two sets of players being exchanged, built up one selection at a time.
///
/// Each side keeps insertion order (bars are drawn in that order) and holds a
/// player at most once. A player can never sit on both sides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeProposal {
    side_a: Vec<Player>,
    side_b: Vec<Player>,
}

impl TradeProposal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side(&self, side: Side) -> &[Player] {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<Player> {
        match side {
            Side::A => &mut self.side_a,
            Side::B => &mut self.side_b,
        }
    }

    pub fn contains(&self, side: Side, id: PlayerId) -> bool {
        self.side(side).iter().any(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.side_a.is_empty() && self.side_b.is_empty()
    }

    /// Adds a player to a side. Adding a player already on that side is a no-op.
    pub fn add(&mut self, side: Side, player: Player) -> Result<(), ProposalError> {
        if self.contains(side.other(), player.id) {
            return Err(ProposalError::PlayerOnBothSides { id: player.id });
        }
        if !self.contains(side, player.id) {
            self.side_mut(side).push(player);
        }
        Ok(())
    }

    pub fn remove(&mut self, side: Side, id: PlayerId) -> Option<Player> {
        let players = self.side_mut(side);
        let index = players.iter().position(|p| p.id == id)?;
        Some(players.remove(index))
    }

    /// Click-to-toggle selection. Returns `true` when the player was added and
    /// `false` when it was removed.
    pub fn toggle(&mut self, side: Side, player: Player) -> Result<bool, ProposalError> {
        if self.remove(side, player.id).is_some() {
            return Ok(false);
        }
        self.add(side, player)?;
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.side_a.clear();
        self.side_b.clear();
    }

    pub fn evaluate(&self, evaluator: &TradeEvaluator) -> TradeEvaluation {
        evaluator.evaluate(&self.side_a, &self.side_b)
    }
}

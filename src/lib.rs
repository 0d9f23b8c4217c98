//! Fantasy football trade analysis.
//!
//! Connects to ESPN fantasy leagues, exposes rosters and compares two sets of
//! players by trade value. The comparison itself lives in [`evaluator`] and
//! does no I/O; everything else feeds it.

#![recursion_limit = "256"]

pub mod config;
pub mod display;
pub mod error;
pub mod espn;
pub mod evaluator;
pub mod league;
pub mod proposal;
pub mod roster;
pub mod sample;
pub mod session;
pub mod valuation;
pub mod web;

pub use evaluator::{FairnessThreshold, Side, TradeEvaluation, TradeEvaluator, WinningSide};
pub use league::{Player, PlayerId, Position};
pub use proposal::{ProposalError, TradeProposal};

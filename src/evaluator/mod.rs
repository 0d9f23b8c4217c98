//! Trade evaluation core.
//!
//! Stateless and pure: every call sums each side's trade values, takes the
//! signed difference relative to side A and applies the configured fairness
//! threshold. Nothing here performs I/O or holds shared state, so one
//! evaluator can be shared freely between request handlers.

pub mod types;
pub mod fairness;
pub mod segments;

pub use types::{Side, TradeEvaluation, WinningSide};
pub use fairness::{FairnessThreshold, InvalidThreshold, DEFAULT_FAIRNESS_POINTS};
pub use segments::{segment_breakdown, Segment};

use crate::league::Player;

/// Sum of trade values for one side, missing values counted as zero.
/// Duplicates are summed like any other entry.
pub fn side_total<'a, I>(players: I) -> f64
where
    I: IntoIterator<Item = &'a Player>,
{
    players.into_iter().map(Player::value).sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TradeEvaluator {
    threshold: FairnessThreshold,
}

impl TradeEvaluator {
    pub fn new(threshold: FairnessThreshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> FairnessThreshold {
        self.threshold
    }

    pub fn evaluate<'a, A, B>(&self, side_a: A, side_b: B) -> TradeEvaluation
    where
        A: IntoIterator<Item = &'a Player>,
        B: IntoIterator<Item = &'a Player>,
    {
        let total_a = side_total(side_a);
        let total_b = side_total(side_b);
        let advantage = total_a - total_b;

        TradeEvaluation {
            total_a,
            total_b,
            advantage,
            is_fair: self.threshold.is_fair(total_a, total_b),
            winning_side: WinningSide::from_advantage(advantage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Position;

    fn valued(values: &[f64]) -> Vec<Player> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Player::new(i as i64, format!("P{}", i), Position::WideReceiver).with_trade_value(*v))
            .collect()
    }

    #[test]
    fn two_for_one_favors_side_a() {
        let eval = TradeEvaluator::default().evaluate(&valued(&[120.0, 80.0]), &valued(&[150.0]));
        assert_eq!(eval.total_a, 200.0);
        assert_eq!(eval.total_b, 150.0);
        assert_eq!(eval.advantage, 50.0);
        assert_eq!(eval.winning_side, WinningSide::A);
        assert!(!eval.is_fair);
    }

    #[test]
    fn equal_sides_are_fair_with_no_winner() {
        let eval = TradeEvaluator::default().evaluate(&valued(&[100.0]), &valued(&[100.0]));
        assert_eq!(eval.advantage, 0.0);
        assert!(eval.is_fair);
        assert_eq!(eval.winning_side, WinningSide::Even);
    }

    #[test]
    fn empty_trade_is_all_zero() {
        let none: Vec<Player> = Vec::new();
        let eval = TradeEvaluator::default().evaluate(&none, &none);
        assert_eq!(eval.total_a, 0.0);
        assert_eq!(eval.total_b, 0.0);
        assert_eq!(eval.advantage, 0.0);
        assert!(eval.is_fair);
        assert_eq!(eval.winning_side, WinningSide::Even);
    }

    #[test]
    fn missing_value_counts_as_zero() {
        let side_a = vec![Player::new(1, "Unvalued", Position::TightEnd)];
        let eval = TradeEvaluator::default().evaluate(&side_a, &Vec::new());
        assert_eq!(eval.total_a, 0.0);
    }

    #[test]
    fn winner_is_reported_even_when_fair() {
        let eval = TradeEvaluator::default().evaluate(&valued(&[100.0]), &valued(&[103.0]));
        assert!(eval.is_fair);
        assert_eq!(eval.winning_side, WinningSide::B);
        assert_eq!(eval.winning_side.label(), "team2");
    }

    #[test]
    fn duplicates_within_a_side_are_summed() {
        let p = Player::new(7, "Twice", Position::RunningBack).with_trade_value(10.0);
        let eval = TradeEvaluator::default().evaluate(&vec![p.clone(), p], &Vec::new());
        assert_eq!(eval.total_a, 20.0);
    }

    #[test]
    fn configured_threshold_applies() {
        let strict = TradeEvaluator::new(FairnessThreshold::Absolute(0.0));
        assert!(!strict.evaluate(&valued(&[10.0]), &valued(&[9.5])).is_fair);
        let loose = TradeEvaluator::new(FairnessThreshold::Relative(0.1));
        assert!(loose.evaluate(&valued(&[10.0]), &valued(&[9.5])).is_fair);
    }
}

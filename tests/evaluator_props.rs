use proptest::collection::vec;
use proptest::prelude::*;

use trade_analyzer::evaluator::{segment_breakdown, FairnessThreshold, Side, TradeEvaluator, WinningSide};
use trade_analyzer::league::{Player, PlayerId, Position};
use trade_analyzer::proposal::TradeProposal;

fn players(values: &[f64]) -> Vec<Player> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Player::new(i as i64, format!("P{}", i), Position::RunningBack).with_trade_value(*v))
        .collect()
}

fn threshold() -> impl Strategy<Value = FairnessThreshold> {
    prop_oneof![
        (0.0f64..50.0).prop_map(FairnessThreshold::Absolute),
        (0.0f64..0.5).prop_map(FairnessThreshold::Relative),
    ]
}

proptest! {
    #[test]
    fn totals_are_sums_of_trade_values(
        a in vec(0.0f64..500.0, 0..8),
        b in vec(0.0f64..500.0, 0..8),
    ) {
        let eval = TradeEvaluator::default().evaluate(&players(&a), &players(&b));
        prop_assert_eq!(eval.total_a, a.iter().sum::<f64>());
        prop_assert_eq!(eval.total_b, b.iter().sum::<f64>());
        prop_assert_eq!(eval.advantage, eval.total_a - eval.total_b);
    }

    #[test]
    fn swapping_sides_negates_advantage(
        a in vec(0.0f64..500.0, 0..8),
        b in vec(0.0f64..500.0, 0..8),
        t in threshold(),
    ) {
        let evaluator = TradeEvaluator::new(t);
        let (pa, pb) = (players(&a), players(&b));
        let forward = evaluator.evaluate(&pa, &pb);
        let backward = evaluator.evaluate(&pb, &pa);
        prop_assert_eq!(forward.advantage, -backward.advantage);
        prop_assert_eq!(forward.is_fair, backward.is_fair);
    }

    #[test]
    fn winner_follows_totals(
        a in vec(0.0f64..500.0, 0..8),
        b in vec(0.0f64..500.0, 0..8),
    ) {
        let eval = TradeEvaluator::default().evaluate(&players(&a), &players(&b));
        let expected = if eval.total_a > eval.total_b {
            WinningSide::A
        } else if eval.total_a < eval.total_b {
            WinningSide::B
        } else {
            WinningSide::Even
        };
        prop_assert_eq!(eval.winning_side, expected);
    }

    #[test]
    fn evaluation_is_repeatable(
        a in vec(0.0f64..500.0, 0..8),
        b in vec(0.0f64..500.0, 0..8),
        t in threshold(),
    ) {
        let evaluator = TradeEvaluator::new(t);
        let (pa, pb) = (players(&a), players(&b));
        prop_assert_eq!(evaluator.evaluate(&pa, &pb), evaluator.evaluate(&pa, &pb));
    }

    #[test]
    fn segments_cover_the_bar(values in vec(0.0f64..300.0, 1..10), length in 1.0f64..500.0) {
        let side = players(&values);
        let segments = segment_breakdown(&side, length);
        prop_assert_eq!(segments.len(), side.len());

        let total: f64 = values.iter().sum();
        let covered: f64 = segments.iter().map(|s| s.segment_length).sum();
        if total > 0.0 {
            prop_assert!((covered - length).abs() <= length * 1e-9);
        } else {
            prop_assert_eq!(covered, 0.0);
        }

        let mut expected_offset = 0.0;
        for segment in &segments {
            prop_assert_eq!(segment.offset, expected_offset);
            expected_offset += segment.segment_length;
        }
    }

    #[test]
    fn toggling_never_puts_a_player_on_both_sides(ops in vec((any::<bool>(), 0i64..6), 0..40)) {
        let mut proposal = TradeProposal::new();
        for (to_a, id) in ops {
            let side = if to_a { Side::A } else { Side::B };
            let player = Player::new(id, "P", Position::WideReceiver).with_trade_value(1.0);
            let _ = proposal.toggle(side, player);
        }
        for id in 0..6 {
            let id = PlayerId(id);
            prop_assert!(!(proposal.contains(Side::A, id) && proposal.contains(Side::B, id)));
        }
    }
}

#[test]
fn empty_trade_is_fair_with_no_winner() {
    let none: Vec<Player> = Vec::new();
    for threshold in [FairnessThreshold::Absolute(0.0), FairnessThreshold::Relative(0.0)] {
        let eval = TradeEvaluator::new(threshold).evaluate(&none, &none);
        assert_eq!(eval.total_a, 0.0);
        assert_eq!(eval.total_b, 0.0);
        assert!(eval.is_fair);
        assert_eq!(eval.winning_side, WinningSide::Even);
    }
}

// src/poker/evaluator.rs
// Local heuristic hand evaluator backing the advisor's fallback path.
//
// This deliberately inspects raw occurrence counts across the whole card pool
// (hole + community at once) instead of picking the best 5-card combination,
// so 6-7 card pools can misclassify around the full-house/flush/straight
// boundary. Inherited behavior; kept as-is.

use crate::cards::{Card, Value, ALL_SUITS, ALL_VALUES};

/// Internal 1-8 ordinal for hand category strength (not a card's face value).
/// 0 is the "insufficient cards" sentinel.
pub type HandRank = u8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandEvaluation {
    /// Coarse category label, e.g. "Pair", "Full house".
    pub hand_strength: &'static str,
    pub hand_rank: HandRank,
    /// Crude win-probability percentage, 0-95.
    pub win_probability: u8,
}

const INSUFFICIENT: HandEvaluation = HandEvaluation {
    hand_strength: "Insufficient cards",
    hand_rank: 0,
    win_probability: 0,
};

/// Evaluate a hole-card pair plus 0-5 community cards. Never fails: fewer than
/// 2 total cards yields the sentinel result, anything else a best-effort
/// classification. Assumes the input surface already enforced card uniqueness.
pub fn evaluate_hand_strength(hole_cards: &[Card], community_cards: &[Card]) -> HandEvaluation {
    let mut all_cards = Vec::with_capacity(hole_cards.len() + community_cards.len());
    all_cards.extend_from_slice(hole_cards);
    all_cards.extend_from_slice(community_cards);

    if all_cards.len() < 2 {
        return INSUFFICIENT;
    }

    let (hand_strength, hand_rank) = classify(&all_cards);
    HandEvaluation {
        hand_strength,
        hand_rank,
        win_probability: win_probability(hand_rank, all_cards.len()),
    }
}

fn classify(cards: &[Card]) -> (&'static str, HandRank) {
    let mut value_counts = [0usize; ALL_VALUES.len()];
    let mut suit_counts = [0usize; ALL_SUITS.len()];
    for card in cards {
        value_counts[card.value.index()] += 1;
        suit_counts[card.suit as usize] += 1;
    }

    let is_flush = suit_counts.iter().any(|&n| n >= 5);
    let is_straight = check_straight(cards);
    let pairs = value_counts.iter().filter(|&&n| n == 2).count();
    let three_of_a_kind = value_counts.contains(&3);
    let four_of_a_kind = value_counts.contains(&4);

    // Highest precedence first. Flush before straight matters: a 5-card
    // straight flush classifies as "Flush" here.
    if four_of_a_kind {
        ("Four of a kind", 8)
    } else if three_of_a_kind && pairs > 0 {
        ("Full house", 7)
    } else if is_flush {
        ("Flush", 6)
    } else if is_straight {
        ("Straight", 5)
    } else if three_of_a_kind {
        ("Three of a kind", 4)
    } else if pairs == 2 {
        ("Two pair", 3)
    } else if pairs == 1 {
        ("Pair", 2)
    } else {
        ("High card", 1)
    }
}

/// Straight detection in ace-low order (A,2,...,K): five strictly consecutive
/// sorted positions, plus the explicit A-2-3-4-5 wheel. There is no ace-high
/// straight beyond that.
fn check_straight(cards: &[Card]) -> bool {
    let mut indexes: Vec<usize> = cards.iter().map(|c| c.value.index()).collect();
    indexes.sort_unstable();

    if indexes.len() >= 5 {
        for window in indexes.windows(5) {
            if window.windows(2).all(|pair| pair[1] == pair[0] + 1) {
                return true;
            }
        }
    }

    let wheel = [Value::Ace, Value::Two, Value::Three, Value::Four, Value::Five];
    wheel.iter().all(|v| cards.iter().any(|c| c.value == *v))
}

fn win_probability(hand_rank: HandRank, total_cards: usize) -> u8 {
    let base: u8 = match hand_rank {
        1 => 5,  // High card
        2 => 15, // Pair
        3 => 25, // Two pair
        4 => 35, // Three of a kind
        5 => 45, // Straight
        6 => 55, // Flush
        7 => 70, // Full house
        8 => 85, // Four of a kind
        _ => 5,
    };

    // More cards means more of the hand is locked in.
    let bonus = if total_cards >= 7 {
        10
    } else if total_cards >= 5 {
        5
    } else {
        0
    };

    (base + bonus).min(95)
}

// src/advisor.rs
// The analysis facade: validate the card counts, try the best remote provider
// once, and fall back to the local heuristic on any kind of failure. Provider
// trouble is never surfaced to the user - they always get a verdict.

use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::cards::Card;
use crate::poker::{evaluate_hand_strength, HandEvaluation, HandRank};
use crate::providers::{self, RawAdvice, StrategyProvider};
use crate::verdict::{HandVerdict, Recommendation};

/// A provider that has not answered by now is treated as failed.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(20);

/// Input-validation failures. Messages are user-facing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("At least 2 hole cards are required for analysis")]
    NotEnoughHoleCards,
    #[error("Maximum 2 hole cards allowed")]
    TooManyHoleCards,
    #[error("Maximum 5 community cards allowed")]
    TooManyCommunityCards,
}

/// Analyze a hand with whichever provider the environment enables.
pub async fn analyze_hand(
    hole_cards: &[Card],
    community_cards: &[Card],
) -> Result<HandVerdict, AdvisorError> {
    let provider = providers::best_provider();
    analyze_hand_with(provider.as_ref(), hole_cards, community_cards).await
}

/// Analyze a hand with a specific provider. Split out from [`analyze_hand`] so
/// the fallback path is exercisable without real credentials.
pub async fn analyze_hand_with(
    provider: &dyn StrategyProvider,
    hole_cards: &[Card],
    community_cards: &[Card],
) -> Result<HandVerdict, AdvisorError> {
    if hole_cards.len() < 2 {
        return Err(AdvisorError::NotEnoughHoleCards);
    }
    if hole_cards.len() > 2 {
        return Err(AdvisorError::TooManyHoleCards);
    }
    if community_cards.len() > 5 {
        return Err(AdvisorError::TooManyCommunityCards);
    }

    let hole_codes: Vec<String> = hole_cards.iter().map(Card::code).collect();
    let community_codes: Vec<String> = community_cards.iter().map(Card::code).collect();

    // The heuristic always runs: it backs the fallback verdict and fills
    // missing winProbability values from remote replies.
    let evaluation = evaluate_hand_strength(hole_cards, community_cards);

    info!(provider = provider.name(), hole = ?hole_codes, community = ?community_codes, "requesting analysis");

    let verdict = match timeout(
        PROVIDER_TIMEOUT,
        provider.advise(&hole_codes, &community_codes),
    )
    .await
    {
        Ok(Ok(advice)) if advice.is_complete() => normalize(advice, &evaluation),
        Ok(Ok(_)) => {
            warn!(provider = provider.name(), "incomplete advice, using local evaluation");
            fallback_verdict(&evaluation)
        }
        Ok(Err(error)) => {
            warn!(provider = provider.name(), %error, "provider failed, using local evaluation");
            fallback_verdict(&evaluation)
        }
        Err(_) => {
            warn!(provider = provider.name(), "provider timed out, using local evaluation");
            fallback_verdict(&evaluation)
        }
    };

    Ok(verdict)
}

/// Rank-threshold mapping used when no remote recommendation is available.
pub fn recommendation_from_rank(rank: HandRank) -> Recommendation {
    if rank >= 7 {
        Recommendation::AllIn // Four of a kind, full house
    } else if rank >= 5 {
        Recommendation::Raise // Straight, flush
    } else if rank >= 2 {
        Recommendation::Call // Pair up to three of a kind
    } else {
        Recommendation::Fold // High card (or the insufficient sentinel)
    }
}

/// Verdict synthesized purely from the heuristic evaluator.
pub fn fallback_verdict(evaluation: &HandEvaluation) -> HandVerdict {
    HandVerdict {
        hand_strength: evaluation.hand_strength.to_string(),
        recommendation: recommendation_from_rank(evaluation.hand_rank),
        confidence: (evaluation.hand_rank as u32 * 10 + 20).min(85) as u8,
        win_probability: evaluation.win_probability,
        reasoning: format!(
            "Based on hand strength analysis: {}. This is a basic evaluation without AI enhancement.",
            evaluation.hand_strength
        ),
    }
}

/// Normalize remote advice into a verdict: clamp the percentages, map the
/// free-text recommendation onto the fixed enum, and fill gaps with the
/// documented defaults.
fn normalize(advice: RawAdvice, evaluation: &HandEvaluation) -> HandVerdict {
    let hand_strength = advice
        .hand_strength
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    let recommendation = advice
        .recommendation
        .as_deref()
        .and_then(Recommendation::from_text)
        .unwrap_or(Recommendation::Call);

    let reasoning = advice
        .reasoning
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Analysis completed with basic evaluation.".to_string());

    HandVerdict {
        hand_strength,
        recommendation,
        confidence: clamp_percentage(advice.confidence.unwrap_or(50.0)),
        win_probability: clamp_percentage(
            advice
                .win_probability
                .unwrap_or(evaluation.win_probability as f64),
        ),
        reasoning,
    }
}

fn clamp_percentage(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

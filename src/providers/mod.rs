// src/providers/mod.rs
// Interchangeable remote strategy providers. Each one takes the hand as
// two-character card codes, asks an LLM for a structured verdict, and returns
// the parsed-but-unvalidated advice. The advisor decides what to trust.

pub mod claude;
pub mod deepseek;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub use claude::Claude;
pub use deepseek::DeepSeek;
pub use ollama::Ollama;
pub use openai::OpenAi;

/// Shared HTTP client. Providers are called one at a time, but reusing the
/// client keeps connection pools warm across streets.
static HTTP: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub(crate) fn http() -> &'static reqwest::Client {
    &HTTP
}

/// What a provider managed to extract from the model's reply. All fields are
/// optional: the advisor validates and fills the gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAdvice {
    pub hand_strength: Option<String>,
    pub recommendation: Option<String>,
    pub confidence: Option<f64>,
    pub win_probability: Option<f64>,
    pub reasoning: Option<String>,
}

impl RawAdvice {
    /// A reply without both a hand strength and a recommendation is treated as
    /// a provider failure.
    pub fn is_complete(&self) -> bool {
        let filled = |f: &Option<String>| f.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.hand_strength) && filled(&self.recommendation)
    }
}

/// A remote strategy advisor. One call per analysis; no retries - any failure
/// means the caller falls back to the local evaluator.
#[async_trait]
pub trait StrategyProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn advise(&self, hole: &[String], community: &[String]) -> Result<RawAdvice, String>;
}

/// Strip a leading/trailing markdown code fence if the model wrapped its JSON.
pub(crate) fn strip_markdown_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Parse a model reply into advice. Fails on anything that is not a JSON
/// object, fence-wrapped or not.
pub(crate) fn parse_advice(text: &str) -> Result<RawAdvice, String> {
    let clean = strip_markdown_fences(text);
    serde_json::from_str(clean)
        .map_err(|e| format!("Failed to parse advice JSON: {}. Response: {}", e, clean))
}

fn street_focus(community_count: usize) -> &'static str {
    match community_count {
        0 => "This is PRE-FLOP analysis - no community cards are visible yet. Weigh starting-hand strength and position.",
        3 => "This is FLOP analysis - 3 community cards are visible. Weigh made hands, draws, and board texture.",
        4 => "This is TURN analysis - 4 community cards are visible. Weigh completed draws and pot odds.",
        5 => "This is RIVER analysis - all 5 community cards are visible. Weigh final hand strength and value betting.",
        _ => "Analyze the hand as it stands.",
    }
}

/// Build the shared analysis prompt. Every provider sends the same text so
/// their answers stay comparable.
pub(crate) fn analysis_prompt(hole: &[String], community: &[String]) -> String {
    let community_line = if community.is_empty() {
        "none".to_string()
    } else {
        community.join(", ")
    };

    format!(
        r#"You are an expert poker analyst. Analyze this Texas Hold'em hand and provide a detailed assessment.

Hole Cards: {}
Community Cards: {}

{}

Please provide:
1. Hand strength (e.g. "Pair of Kings", "Ace-high flush", "Straight")
2. Recommendation (fold/call/raise/all-in)
3. Confidence level (0-100%)
4. Win probability (0-100%)
5. Detailed reasoning for your recommendation

Format your response as JSON:
{{
  "handStrength": "string",
  "recommendation": "fold" | "call" | "raise" | "all-in",
  "confidence": number,
  "winProbability": number,
  "reasoning": "string"
}}

Return ONLY valid JSON, nothing else."#,
        hole.join(", "),
        community_line,
        street_focus(community.len()),
    )
}

pub(crate) const SYSTEM_PROMPT: &str =
    "You are an expert poker analyst. Always respond with valid JSON format.";

fn credential(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn providers_from_credentials(
    deepseek: bool,
    claude: bool,
    openai: bool,
) -> Vec<Box<dyn StrategyProvider>> {
    let mut providers: Vec<Box<dyn StrategyProvider>> = Vec::new();
    if deepseek {
        providers.push(Box::new(DeepSeek));
    }
    if claude {
        providers.push(Box::new(Claude));
    }
    if openai {
        providers.push(Box::new(OpenAi));
    }
    // Ollama runs locally and needs no credentials.
    providers.push(Box::new(Ollama));
    providers
}

/// Providers enabled by the current environment, best first.
/// Priority: DeepSeek > Claude > OpenAI > Ollama.
pub fn available_providers() -> Vec<Box<dyn StrategyProvider>> {
    providers_from_credentials(
        credential("DEEPSEEK_API_KEY").is_some(),
        credential("ANTHROPIC_API_KEY").is_some(),
        credential("OPENAI_API_KEY").is_some(),
    )
}

/// The single provider the advisor will try. There is always at least the
/// local Ollama stand-in.
pub fn best_provider() -> Box<dyn StrategyProvider> {
    available_providers().remove(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markdown_fences() {
        assert_eq!(strip_markdown_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_markdown_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_markdown_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_markdown_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_advice_plain_and_fenced() {
        let body = r#"{"handStrength": "Pair of Kings", "recommendation": "raise", "confidence": 78, "winProbability": 64, "reasoning": "strong pair"}"#;
        for text in [body.to_string(), format!("```json\n{}\n```", body)] {
            let advice = parse_advice(&text).unwrap();
            assert_eq!(advice.hand_strength.as_deref(), Some("Pair of Kings"));
            assert_eq!(advice.recommendation.as_deref(), Some("raise"));
            assert_eq!(advice.confidence, Some(78.0));
            assert_eq!(advice.win_probability, Some(64.0));
            assert!(advice.is_complete());
        }
    }

    #[test]
    fn test_parse_advice_rejects_non_object() {
        assert!(parse_advice("42").is_err());
        assert!(parse_advice("\"just a string\"").is_err());
        assert!(parse_advice("not json at all").is_err());
    }

    #[test]
    fn test_unknown_fields_tolerated_missing_fields_incomplete() {
        let advice = parse_advice(r#"{"handStrength": "Flush", "extra": true}"#).unwrap();
        assert!(!advice.is_complete());

        let advice = parse_advice(r#"{"recommendation": "  "}"#).unwrap();
        assert!(!advice.is_complete());

        let advice = parse_advice("{}").unwrap();
        assert!(!advice.is_complete());
    }

    #[test]
    fn test_provider_priority_order() {
        let names = |v: Vec<Box<dyn StrategyProvider>>| {
            v.iter().map(|p| p.name()).collect::<Vec<_>>()
        };

        assert_eq!(
            names(providers_from_credentials(true, true, true)),
            vec!["DeepSeek", "Claude", "OpenAI", "Ollama"]
        );
        assert_eq!(
            names(providers_from_credentials(false, true, false)),
            vec!["Claude", "Ollama"]
        );
        // No credentials at all still leaves the local stand-in.
        assert_eq!(names(providers_from_credentials(false, false, false)), vec!["Ollama"]);
    }

    #[test]
    fn test_prompt_mentions_cards_and_street() {
        let hole = vec!["Ah".to_string(), "Kh".to_string()];
        let community = vec!["Qh".to_string(), "Jh".to_string(), "Th".to_string()];

        let prompt = analysis_prompt(&hole, &community);
        assert!(prompt.contains("Ah, Kh"));
        assert!(prompt.contains("Qh, Jh, Th"));
        assert!(prompt.contains("FLOP"));

        let preflop = analysis_prompt(&hole, &[]);
        assert!(preflop.contains("PRE-FLOP"));
        assert!(preflop.contains("Community Cards: none"));
    }
}

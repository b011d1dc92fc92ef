// src/verdict.rs
// The structured output of an analysis, whatever its source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed action enum the UI understands. LLM replies use looser language
/// ("check-raise", "3-bet", "value bet"); [`Recommendation::from_text`]
/// collapses those onto the nearest action here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl Recommendation {
    pub fn from_text(text: &str) -> Option<Recommendation> {
        let normalized = text.trim().to_uppercase();
        if normalized.is_empty() {
            return None;
        }
        if normalized.contains("ALL-IN") || normalized.contains("ALL IN") {
            return Some(Recommendation::AllIn);
        }
        if normalized.starts_with("FOLD") {
            return Some(Recommendation::Fold);
        }
        if normalized.starts_with("CHECK-RAISE") || normalized.starts_with("CHECK RAISE") {
            return Some(Recommendation::Raise);
        }
        if normalized.starts_with("CHECK-CALL") || normalized.starts_with("CHECK CALL") {
            return Some(Recommendation::Call);
        }
        if normalized.starts_with("CHECK") {
            return Some(Recommendation::Check);
        }
        if normalized.starts_with("CALL") {
            return Some(Recommendation::Call);
        }
        if normalized.starts_with("RAISE")
            || normalized.starts_with("RE-RAISE")
            || normalized.starts_with("3-BET")
            || normalized.starts_with("4-BET")
            || normalized.starts_with("BET")
            || normalized.starts_with("VALUE")
            || normalized.starts_with("BLUFF")
        {
            return Some(Recommendation::Raise);
        }
        None
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Fold => "fold",
            Recommendation::Check => "check",
            Recommendation::Call => "call",
            Recommendation::Raise => "raise",
            Recommendation::AllIn => "all-in",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One complete hand assessment. Produced fresh per evaluation and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandVerdict {
    pub hand_strength: String,
    pub recommendation: Recommendation,
    /// 0-100.
    pub confidence: u8,
    /// 0-100.
    pub win_probability: u8,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_actions() {
        assert_eq!(Recommendation::from_text("fold"), Some(Recommendation::Fold));
        assert_eq!(Recommendation::from_text("Check"), Some(Recommendation::Check));
        assert_eq!(Recommendation::from_text("CALL"), Some(Recommendation::Call));
        assert_eq!(Recommendation::from_text("raise"), Some(Recommendation::Raise));
        assert_eq!(Recommendation::from_text("all-in"), Some(Recommendation::AllIn));
        assert_eq!(Recommendation::from_text("ALL IN"), Some(Recommendation::AllIn));
    }

    #[test]
    fn test_compound_llm_phrasings() {
        assert_eq!(
            Recommendation::from_text("check-raise"),
            Some(Recommendation::Raise)
        );
        assert_eq!(
            Recommendation::from_text("check-call"),
            Some(Recommendation::Call)
        );
        assert_eq!(Recommendation::from_text("3-bet"), Some(Recommendation::Raise));
        assert_eq!(Recommendation::from_text("4-bet"), Some(Recommendation::Raise));
        assert_eq!(
            Recommendation::from_text("value bet"),
            Some(Recommendation::Raise)
        );
        assert_eq!(Recommendation::from_text("bluff"), Some(Recommendation::Raise));
        assert_eq!(
            Recommendation::from_text("raise to $0.75"),
            Some(Recommendation::Raise)
        );
        assert_eq!(
            Recommendation::from_text("shove all-in"),
            Some(Recommendation::AllIn)
        );
    }

    #[test]
    fn test_unknown_text_is_none() {
        assert_eq!(Recommendation::from_text(""), None);
        assert_eq!(Recommendation::from_text("   "), None);
        assert_eq!(Recommendation::from_text("limp"), None);
    }

    #[test]
    fn test_serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Recommendation::AllIn).unwrap(),
            "\"all-in\""
        );
        let parsed: Recommendation = serde_json::from_str("\"all-in\"").unwrap();
        assert_eq!(parsed, Recommendation::AllIn);
    }

    #[test]
    fn test_verdict_serializes_camel_case() {
        let verdict = HandVerdict {
            hand_strength: "Flush".to_string(),
            recommendation: Recommendation::Raise,
            confidence: 80,
            win_probability: 65,
            reasoning: "five hearts".to_string(),
        };
        let json = serde_json::to_string(&verdict).unwrap();
        assert!(json.contains("\"handStrength\""));
        assert!(json.contains("\"winProbability\""));
    }
}

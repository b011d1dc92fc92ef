// src/lib.rs

pub mod advisor;
pub mod cards;
pub mod poker;
pub mod providers;
pub mod verdict;

pub use advisor::{analyze_hand, AdvisorError};
pub use cards::{Card, CardSet, Color, Suit, Value};
pub use poker::{evaluate_hand_strength, GamePhase, GameState, HandEvaluation};
pub use verdict::{HandVerdict, Recommendation};

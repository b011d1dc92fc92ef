// src/poker/mod.rs
// Hand evaluation and the card-entry state machine.

pub mod evaluator;
pub mod state_machine;

pub use evaluator::{evaluate_hand_strength, HandEvaluation, HandRank};

pub use state_machine::{CollectTarget, GamePhase, GameState, TransitionError};

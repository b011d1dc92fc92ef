// src/poker/state_machine.rs
// Guided card-entry flow: color -> suit -> value per card, looping through the
// hole cards and then each street, with an analysis stop after every street.
//
// The machine is an immutable snapshot; every transition borrows the current
// state and returns a fresh `GameState` (or an error that leaves the caller's
// snapshot untouched). No ambient game state anywhere.

use crate::cards::{Card, CardSet, CardSetError, Color, Suit, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    ColorSelection,
    SuitSelection,
    ValueSelection,
    HoleCardsComplete,
    FlopAnalysis,
    TurnAnalysis,
    RiverAnalysis,
    Analysis,
}

/// Which pile the color/suit/value loop is currently filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectTarget {
    Hole,
    Flop,
    Turn,
    River,
}

impl CollectTarget {
    /// Total community cards on board once this street is complete.
    fn community_goal(&self) -> usize {
        match self {
            CollectTarget::Hole => 0,
            CollectTarget::Flop => 3,
            CollectTarget::Turn => 4,
            CollectTarget::River => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CollectTarget::Hole => "hole cards",
            CollectTarget::Flop => "flop",
            CollectTarget::Turn => "turn",
            CollectTarget::River => "river",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error(transparent)]
    Card(#[from] CardSetError),
    #[error("{action} is not available in the {phase:?} phase")]
    InvalidAction {
        action: &'static str,
        phase: GamePhase,
    },
    #[error("{suit:?} is not a {color:?} suit")]
    SuitColorMismatch { suit: Suit, color: Color },
}

/// One snapshot of the entry flow. Created via [`GameState::new`], advanced via
/// the transition methods, and thrown away wholesale on reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    phase: GamePhase,
    target: CollectTarget,
    selected_color: Option<Color>,
    selected_suit: Option<Suit>,
    cards: CardSet,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::ColorSelection,
            target: CollectTarget::Hole,
            selected_color: None,
            selected_suit: None,
            cards: CardSet::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn target(&self) -> CollectTarget {
        self.target
    }

    pub fn selected_color(&self) -> Option<Color> {
        self.selected_color
    }

    pub fn selected_suit(&self) -> Option<Suit> {
        self.selected_suit
    }

    pub fn cards(&self) -> &CardSet {
        &self.cards
    }

    /// Phases where the UI runs a hand analysis before moving on.
    pub fn wants_analysis(&self) -> bool {
        matches!(
            self.phase,
            GamePhase::HoleCardsComplete
                | GamePhase::FlopAnalysis
                | GamePhase::TurnAnalysis
                | GamePhase::RiverAnalysis
                | GamePhase::Analysis
        )
    }

    /// 1-based index of the card currently being picked within its target,
    /// e.g. "flop card 2 of 3".
    pub fn picking_position(&self) -> (usize, usize) {
        match self.target {
            CollectTarget::Hole => (self.cards.hole().len() + 1, 2),
            street => {
                let done = self.cards.community().len();
                let previous = match street {
                    CollectTarget::Turn => 3,
                    CollectTarget::River => 4,
                    _ => 0,
                };
                (done - previous + 1, street.community_goal() - previous)
            }
        }
    }

    pub fn select_color(&self, color: Color) -> Result<GameState, TransitionError> {
        if self.phase != GamePhase::ColorSelection {
            return Err(TransitionError::InvalidAction {
                action: "color selection",
                phase: self.phase,
            });
        }
        let mut next = self.clone();
        next.selected_color = Some(color);
        next.phase = GamePhase::SuitSelection;
        Ok(next)
    }

    pub fn select_suit(&self, suit: Suit) -> Result<GameState, TransitionError> {
        if self.phase != GamePhase::SuitSelection {
            return Err(TransitionError::InvalidAction {
                action: "suit selection",
                phase: self.phase,
            });
        }
        if let Some(color) = self.selected_color {
            if suit.color() != color {
                return Err(TransitionError::SuitColorMismatch { suit, color });
            }
        }
        let mut next = self.clone();
        next.selected_suit = Some(suit);
        next.phase = GamePhase::ValueSelection;
        Ok(next)
    }

    pub fn select_value(&self, value: Value) -> Result<GameState, TransitionError> {
        if self.phase != GamePhase::ValueSelection {
            return Err(TransitionError::InvalidAction {
                action: "value selection",
                phase: self.phase,
            });
        }
        let Some(suit) = self.selected_suit else {
            return Err(TransitionError::InvalidAction {
                action: "value selection",
                phase: self.phase,
            });
        };

        let card = Card::new(suit, value);
        let mut next = self.clone();
        match next.target {
            CollectTarget::Hole => next.cards.push_hole(card)?,
            _ => next.cards.push_community(card)?,
        }
        next.selected_color = None;
        next.selected_suit = None;
        next.phase = next.phase_after_card();
        Ok(next)
    }

    fn phase_after_card(&self) -> GamePhase {
        match self.target {
            CollectTarget::Hole if self.cards.hole().len() == 2 => GamePhase::HoleCardsComplete,
            CollectTarget::Flop if self.cards.community().len() == 3 => GamePhase::FlopAnalysis,
            CollectTarget::Turn if self.cards.community().len() == 4 => GamePhase::TurnAnalysis,
            CollectTarget::River if self.cards.community().len() == 5 => GamePhase::RiverAnalysis,
            _ => GamePhase::ColorSelection,
        }
    }

    /// Step back one selection screen (value -> suit -> color).
    pub fn back(&self) -> Result<GameState, TransitionError> {
        let mut next = self.clone();
        match self.phase {
            GamePhase::SuitSelection => {
                next.selected_color = None;
                next.phase = GamePhase::ColorSelection;
                Ok(next)
            }
            GamePhase::ValueSelection => {
                next.selected_suit = None;
                next.phase = GamePhase::SuitSelection;
                Ok(next)
            }
            phase => Err(TransitionError::InvalidAction {
                action: "back",
                phase,
            }),
        }
    }

    /// Leave an analysis stop and start collecting the next street.
    pub fn advance(&self) -> Result<GameState, TransitionError> {
        let mut next = self.clone();
        match self.phase {
            GamePhase::HoleCardsComplete => {
                next.target = CollectTarget::Flop;
                next.phase = GamePhase::ColorSelection;
            }
            GamePhase::FlopAnalysis => {
                next.target = CollectTarget::Turn;
                next.phase = GamePhase::ColorSelection;
            }
            GamePhase::TurnAnalysis => {
                next.target = CollectTarget::River;
                next.phase = GamePhase::ColorSelection;
            }
            GamePhase::RiverAnalysis => {
                next.phase = GamePhase::Analysis;
            }
            phase => {
                return Err(TransitionError::InvalidAction {
                    action: "continue",
                    phase,
                })
            }
        }
        Ok(next)
    }

    /// Unconditional return to the initial state; every collected card is
    /// discarded.
    pub fn reset(&self) -> GameState {
        GameState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(state: &GameState, code: &str) -> Result<GameState, TransitionError> {
        let card: Card = code.parse().unwrap();
        let state = state.select_color(card.color())?;
        let state = state.select_suit(card.suit)?;
        state.select_value(card.value)
    }

    fn state_with_hole(codes: [&str; 2]) -> GameState {
        let state = GameState::new();
        let state = pick(&state, codes[0]).unwrap();
        pick(&state, codes[1]).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.phase(), GamePhase::ColorSelection);
        assert_eq!(state.target(), CollectTarget::Hole);
        assert_eq!(state.cards().total(), 0);
    }

    #[test]
    fn test_hole_card_loop() {
        let state = GameState::new();
        let state = pick(&state, "Ah").unwrap();
        // First card done: back to the top of the loop.
        assert_eq!(state.phase(), GamePhase::ColorSelection);
        assert_eq!(state.cards().hole().len(), 1);

        let state = pick(&state, "Kd").unwrap();
        assert_eq!(state.phase(), GamePhase::HoleCardsComplete);
        assert!(state.wants_analysis());
    }

    #[test]
    fn test_suit_must_match_color() {
        let state = GameState::new().select_color(Color::Red).unwrap();
        let err = state.select_suit(Suit::Spades).unwrap_err();
        assert_eq!(
            err,
            TransitionError::SuitColorMismatch {
                suit: Suit::Spades,
                color: Color::Red,
            }
        );
    }

    #[test]
    fn test_duplicate_selection_leaves_state_intact() {
        let state = state_with_hole(["Ah", "Kd"]).advance().unwrap();
        let before = state.clone();
        let err = pick(&state, "Ah").unwrap_err();
        assert!(matches!(
            err,
            TransitionError::Card(CardSetError::DuplicateCard(_))
        ));
        // The snapshot we still hold is unchanged and usable.
        assert_eq!(state, before);
        assert_eq!(state.cards().community().len(), 0);
    }

    #[test]
    fn test_street_progression() {
        let state = state_with_hole(["Ah", "Kd"]);

        let state = state.advance().unwrap();
        assert_eq!(state.target(), CollectTarget::Flop);
        let state = pick(&state, "2c").unwrap();
        let state = pick(&state, "7s").unwrap();
        assert_eq!(state.phase(), GamePhase::ColorSelection);
        let state = pick(&state, "9h").unwrap();
        assert_eq!(state.phase(), GamePhase::FlopAnalysis);

        let state = state.advance().unwrap();
        assert_eq!(state.target(), CollectTarget::Turn);
        let state = pick(&state, "Jd").unwrap();
        assert_eq!(state.phase(), GamePhase::TurnAnalysis);

        let state = state.advance().unwrap();
        let state = pick(&state, "3c").unwrap();
        assert_eq!(state.phase(), GamePhase::RiverAnalysis);
        assert_eq!(state.cards().community().len(), 5);

        let state = state.advance().unwrap();
        assert_eq!(state.phase(), GamePhase::Analysis);
        assert!(state.advance().is_err());
    }

    #[test]
    fn test_back_navigation() {
        let state = GameState::new().select_color(Color::Black).unwrap();
        let state = state.select_suit(Suit::Clubs).unwrap();
        assert_eq!(state.phase(), GamePhase::ValueSelection);

        let state = state.back().unwrap();
        assert_eq!(state.phase(), GamePhase::SuitSelection);
        assert_eq!(state.selected_suit(), None);

        let state = state.back().unwrap();
        assert_eq!(state.phase(), GamePhase::ColorSelection);
        assert_eq!(state.selected_color(), None);

        assert!(state.back().is_err());
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mid_pick = GameState::new().select_color(Color::Red).unwrap();
        assert_eq!(mid_pick.reset(), GameState::new());

        let deep = state_with_hole(["Ah", "Kd"]).advance().unwrap();
        let deep = pick(&deep, "2c").unwrap();
        assert_eq!(deep.reset(), GameState::new());
        assert_eq!(deep.reset().cards().total(), 0);
    }

    #[test]
    fn test_picking_position_labels() {
        let state = GameState::new();
        assert_eq!(state.picking_position(), (1, 2));

        let state = pick(&state, "Ah").unwrap();
        assert_eq!(state.picking_position(), (2, 2));

        let state = pick(&state, "Kd").unwrap().advance().unwrap();
        assert_eq!(state.picking_position(), (1, 3));
        let state = pick(&state, "2c").unwrap();
        assert_eq!(state.picking_position(), (2, 3));

        let state = pick(&state, "7s").unwrap();
        let state = pick(&state, "9h").unwrap().advance().unwrap();
        assert_eq!(state.picking_position(), (1, 1));
    }

    #[test]
    fn test_out_of_phase_actions_rejected() {
        let state = GameState::new();
        assert!(state.select_suit(Suit::Hearts).is_err());
        assert!(state.select_value(Value::Ace).is_err());
        assert!(state.advance().is_err());
    }
}

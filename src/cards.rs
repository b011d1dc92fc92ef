// src/cards.rs
// Card model: suits, values, colors, and the growing hole/community card set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

impl Suit {
    pub fn color(&self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
    }

    /// Lowercase initial used in the two-character card code ("h", "d", "c", "s").
    pub fn code(&self) -> char {
        match self {
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
            Suit::Spades => 's',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }
}

/// The two suits of a given color, in selection-screen order.
pub fn suits_of_color(color: Color) -> [Suit; 2] {
    match color {
        Color::Red => [Suit::Hearts, Suit::Diamonds],
        Color::Black => [Suit::Clubs, Suit::Spades],
    }
}

/// Card face value. Ordering is ace-low (A, 2, ..., K), which is the order the
/// straight check walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

pub const ALL_VALUES: [Value; 13] = [
    Value::Ace,
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
];

impl Value {
    /// Position in ace-low order: A=0, 2=1, ..., K=12.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Single character used in the card code. Ten maps to 'T'.
    pub fn code(&self) -> char {
        match self {
            Value::Ace => 'A',
            Value::Two => '2',
            Value::Three => '3',
            Value::Four => '4',
            Value::Five => '5',
            Value::Six => '6',
            Value::Seven => '7',
            Value::Eight => '8',
            Value::Nine => '9',
            Value::Ten => 'T',
            Value::Jack => 'J',
            Value::Queen => 'Q',
            Value::King => 'K',
        }
    }

    /// On-screen label. Ten is shown as "10", not "T".
    pub fn display(&self) -> &'static str {
        match self {
            Value::Ace => "A",
            Value::Two => "2",
            Value::Three => "3",
            Value::Four => "4",
            Value::Five => "5",
            Value::Six => "6",
            Value::Seven => "7",
            Value::Eight => "8",
            Value::Nine => "9",
            Value::Ten => "10",
            Value::Jack => "J",
            Value::Queen => "Q",
            Value::King => "K",
        }
    }
}

/// An immutable playing card. Equality is (suit, value); color is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub value: Value,
}

impl Card {
    pub const fn new(suit: Suit, value: Value) -> Self {
        Self { suit, value }
    }

    pub fn color(&self) -> Color {
        self.suit.color()
    }

    /// Canonical two-character code consumed by the strategy providers,
    /// e.g. "Th", "Ad".
    pub fn code(&self) -> String {
        format!("{}{}", self.value.code(), self.suit.code())
    }

    /// Human-facing label like "10♥" or "A♠".
    pub fn label(&self) -> String {
        format!("{}{}", self.value.display(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.code(), self.suit.code())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("card code must be two characters, got {0:?}")]
    BadLength(String),
    #[error("unknown value character {0:?}")]
    BadValue(char),
    #[error("unknown suit character {0:?}")]
    BadSuit(char),
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses codes like "Ah", "Td", "7c". "10h" is accepted as an alias for "Th".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().replace("10", "T");
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(ParseCardError::BadLength(s));
        }

        let value = match chars[0].to_ascii_uppercase() {
            'A' => Value::Ace,
            '2' => Value::Two,
            '3' => Value::Three,
            '4' => Value::Four,
            '5' => Value::Five,
            '6' => Value::Six,
            '7' => Value::Seven,
            '8' => Value::Eight,
            '9' => Value::Nine,
            'T' => Value::Ten,
            'J' => Value::Jack,
            'Q' => Value::Queen,
            'K' => Value::King,
            other => return Err(ParseCardError::BadValue(other)),
        };

        let suit = match chars[1].to_ascii_lowercase() {
            'h' => Suit::Hearts,
            'd' => Suit::Diamonds,
            'c' => Suit::Clubs,
            's' => Suit::Spades,
            other => return Err(ParseCardError::BadSuit(other)),
        };

        Ok(Card::new(suit, value))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardSetError {
    #[error("card {} has already been selected", .0.label())]
    DuplicateCard(Card),
    #[error("hole cards are full (max 2)")]
    HoleCardsFull,
    #[error("community cards are full (max 5)")]
    CommunityCardsFull,
}

/// The cards collected so far for one hand: up to 2 hole cards and up to 5
/// community cards. Grows monotonically; the only way to remove cards is to
/// discard the whole set.
///
/// Invariant: no two cards across hole + community share (suit, value). Inserts
/// that would violate it are rejected and leave the set untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSet {
    hole: Vec<Card>,
    community: Vec<Card>,
}

impl CardSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hole(&self) -> &[Card] {
        &self.hole
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }

    pub fn contains(&self, card: Card) -> bool {
        self.hole.contains(&card) || self.community.contains(&card)
    }

    pub fn total(&self) -> usize {
        self.hole.len() + self.community.len()
    }

    pub fn push_hole(&mut self, card: Card) -> Result<(), CardSetError> {
        if self.contains(card) {
            return Err(CardSetError::DuplicateCard(card));
        }
        if self.hole.len() >= 2 {
            return Err(CardSetError::HoleCardsFull);
        }
        self.hole.push(card);
        Ok(())
    }

    pub fn push_community(&mut self, card: Card) -> Result<(), CardSetError> {
        if self.contains(card) {
            return Err(CardSetError::DuplicateCard(card));
        }
        if self.community.len() >= 5 {
            return Err(CardSetError::CommunityCardsFull);
        }
        self.community.push(card);
        Ok(())
    }

    /// Every card of the 52 not yet present in the set.
    pub fn remaining(&self) -> Vec<Card> {
        let mut out = Vec::with_capacity(52 - self.total());
        for suit in ALL_SUITS {
            for value in ALL_VALUES {
                let card = Card::new(suit, value);
                if !self.contains(card) {
                    out.push(card);
                }
            }
        }
        out
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    pub fn color(self) -> ColorFilter {
        if self.is_red() {
            ColorFilter::Red
        } else {
            ColorFilter::Black
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ColorFilter {
    Red,
    Black,
}

impl ColorFilter {
    pub fn matches(self, suit: Suit) -> bool {
        suit.is_red() == (self == ColorFilter::Red)
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorFilter::Red => "RED",
            ColorFilter::Black => "BLACK",
        }
    }
}

pub const MIN_CARD_VALUE: u8 = 2;
pub const MAX_CARD_VALUE: u8 = 14;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub value: u8,
    pub suit: Suit,
    #[serde(default)]
    pub cursed: bool,
}

impl Card {
    pub fn new(value: u8, suit: Suit) -> Self {
        Self {
            value,
            suit,
            cursed: false,
        }
    }
}

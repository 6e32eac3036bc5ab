use crate::{Card, RngState, Suit, MAX_CARD_VALUE, MIN_CARD_VALUE};

pub const MIN_HAND_SIZE: usize = 3;
pub const MAX_HAND_SIZE: usize = 10;

pub fn random_value(rng: &mut RngState) -> u8 {
    let span = (MAX_CARD_VALUE - MIN_CARD_VALUE + 1) as usize;
    MIN_CARD_VALUE + rng.below(span) as u8
}

pub fn random_suit(rng: &mut RngState) -> Suit {
    Suit::ALL[rng.below(Suit::ALL.len())]
}

/// Uniform random hand. Consumes the stream value-then-suit per card.
pub fn random_hand(count: usize, rng: &mut RngState) -> Vec<Card> {
    let mut cards = Vec::with_capacity(count);
    for _ in 0..count {
        let value = random_value(rng);
        let suit = random_suit(rng);
        cards.push(Card::new(value, suit));
    }
    cards
}

//! Double-or-bust risk challenges: curse-free generator/evaluator pairs
//! offered between rounds.

use crate::{hand, Card, RngState};
use std::collections::HashSet;

pub trait RiskChallenge: std::fmt::Debug {
    fn title(&self) -> &str;
    fn card_count(&self) -> usize;
    /// Decision window in seconds for this challenge.
    fn time_budget(&self) -> f64;
    /// Fresh hand satisfying the challenge's constraints.
    fn generate_hand(&self, rng: &mut RngState) -> Vec<Card>;
    /// Correct indices for the given hand.
    fn evaluate(&self, hand: &[Card]) -> HashSet<usize>;
}

pub fn builtin() -> Vec<Box<dyn RiskChallenge>> {
    vec![Box::new(SevenAteNine::default())]
}

/// Exactly one card holds a 7; find it. A 9 is planted elsewhere.
#[derive(Debug, Clone)]
pub struct SevenAteNine {
    pub card_count: usize,
    pub time_seconds: f64,
}

impl Default for SevenAteNine {
    fn default() -> Self {
        Self {
            card_count: 5,
            time_seconds: 6.0,
        }
    }
}

impl RiskChallenge for SevenAteNine {
    fn title(&self) -> &str {
        "Which One Ate 9?"
    }

    fn card_count(&self) -> usize {
        self.card_count
    }

    fn time_budget(&self) -> f64 {
        self.time_seconds
    }

    fn generate_hand(&self, rng: &mut RngState) -> Vec<Card> {
        let n = self.card_count.max(3);
        let seven_index = rng.below(n);
        let nine_index = (seven_index + 1 + rng.below(n - 1)) % n;

        let mut cards = Vec::with_capacity(n);
        for i in 0..n {
            let value = if i == seven_index {
                7
            } else if i == nine_index {
                9
            } else {
                loop {
                    let value = hand::random_value(rng);
                    if value != 7 {
                        break value;
                    }
                }
            };
            cards.push(Card::new(value, hand::random_suit(rng)));
        }
        cards
    }

    fn evaluate(&self, hand: &[Card]) -> HashSet<usize> {
        hand.iter()
            .enumerate()
            .filter(|(_, card)| card.value == 7)
            .map(|(i, _)| i)
            .collect()
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RunStarted {
        time_bank: f64,
    },
    RoundStarted {
        round: u32,
        stake: i64,
        rule_text: String,
    },
    HandDealt {
        count: usize,
    },
    RoundWon {
        surplus: i64,
        paid: i64,
        score: i64,
        debt: i64,
    },
    RoundLost {
        stake: i64,
        debt: i64,
        timed_out: bool,
    },
    IntermissionStarted {
        round: u32,
    },
    ContinueBlocked {
        needed: i64,
    },
    Borrowed {
        seconds: i64,
        debt: i64,
        credit_left: i64,
    },
    RiskStarted {
        title: String,
        time_budget: f64,
    },
    RiskWon {
        score: i64,
    },
    RiskDegenerate {
        title: String,
    },
    RunEnded {
        busted: bool,
        score: i64,
        debt: i64,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}

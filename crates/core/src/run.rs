use crate::{Card, GameConfig, GameState, Phase, RiskChallenge, RngState, Rule, RulePicker};
use std::collections::HashSet;
use thiserror::Error;

mod economy;
mod risk;
mod round;
mod state;
mod tick;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("the run has ended")]
    RunEnded,
    #[error("you can only do that between rounds")]
    NotIntermission,
    #[error("you can only borrow during play or intermission")]
    BorrowUnavailable,
    #[error("you've already borrowed this round")]
    AlreadyBorrowed,
    #[error("no credit left; pay debt to free up your limit")]
    CreditExhausted,
    #[error("not enough time to continue (need {needed}s); borrow or cash out")]
    NotEnoughTime { needed: i64 },
    #[error("no round is waiting for a choice")]
    NoActiveRound,
    #[error("risk already attempted this intermission")]
    RiskAlreadyUsed,
    #[error("unknown risk challenge {0}")]
    UnknownRiskChallenge(usize),
    #[error("invalid card index {0}")]
    InvalidCardIndex(usize),
}

#[derive(Debug)]
pub struct RunState {
    pub config: GameConfig,
    pub rng: RngState,
    pub state: GameState,
    picker: Box<dyn RulePicker>,
    risks: Vec<Box<dyn RiskChallenge>>,
    hand: Vec<Card>,
    correct: HashSet<usize>,
    rule: Option<Rule>,
    planned_cards: usize,
    active_risk: Option<usize>,
    choice_taken: bool,
}

impl RunState {
    pub(crate) fn reject_if_ended(&self) -> Result<(), RunError> {
        if self.state.phase == Phase::Ended {
            Err(RunError::RunEnded)
        } else {
            Ok(())
        }
    }
}

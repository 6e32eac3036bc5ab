use crate::GameConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Setup,
    RulePreview,
    RoundActive,
    Resolve,
    InterRound,
    RiskPreview,
    RiskActive,
    Ended,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunOutcome {
    Clean,
    Busted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub round: u32,
    pub phase: Phase,
    /// Remaining overall seconds. Moves only on stake spend at Setup and on
    /// borrow credit; the run ends the moment it reaches zero.
    pub time_bank: f64,
    pub debt: i64,
    pub score: i64,
    pub stake: i64,
    /// Elapsed time in waiting phases, remaining time in active phases.
    pub phase_timer: f64,
    pub countdown_frozen: bool,
    pub borrow_used_this_round: bool,
    pub temp_extra_cards: u32,
    pub risk_used_this_intermission: bool,
    pub continue_blocked_notified: bool,
    pub outcome: Option<RunOutcome>,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            round: 0,
            phase: Phase::Setup,
            time_bank: config.start_timer_seconds,
            debt: 0,
            score: 0,
            stake: 0,
            phase_timer: 0.0,
            countdown_frozen: false,
            borrow_used_this_round: false,
            temp_extra_cards: 0,
            risk_used_this_intermission: false,
            continue_blocked_notified: false,
            outcome: None,
        }
    }
}

/// Display-ready snapshot for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HudSnapshot {
    pub phase: Phase,
    pub round: u32,
    pub time_seconds: i64,
    pub countdown_seconds: f64,
    pub debt_seconds: i64,
    pub tomorrow_pct: i64,
    pub score_seconds: i64,
    pub stake_seconds: i64,
    pub rule_text: Option<String>,
}

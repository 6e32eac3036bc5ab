use super::*;
use crate::{risk, EventBus, HudSnapshot, WeightedRulePicker};

impl RunState {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let picker = Box::new(WeightedRulePicker::from_config(&config));
        Self::with_picker(config, seed, picker)
    }

    pub fn with_picker(config: GameConfig, seed: u64, picker: Box<dyn RulePicker>) -> Self {
        let rng = RngState::from_seed(seed);
        let state = GameState::new(&config);
        Self {
            config,
            rng,
            state,
            picker,
            risks: risk::builtin(),
            hand: Vec::new(),
            correct: HashSet::new(),
            rule: None,
            planned_cards: 0,
            active_risk: None,
            choice_taken: false,
        }
    }

    /// Kick off the first round. Separate from construction so the driver can
    /// subscribe to the opening events.
    pub fn start(&mut self, events: &mut EventBus) {
        events.push(crate::Event::RunStarted {
            time_bank: self.state.time_bank,
        });
        self.enter_setup(events);
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn correct_set(&self) -> &HashSet<usize> {
        &self.correct
    }

    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    pub fn risk_titles(&self) -> Vec<&str> {
        self.risks.iter().map(|risk| risk.title()).collect()
    }

    pub fn hud(&self) -> HudSnapshot {
        let countdown = match self.state.phase {
            Phase::RoundActive | Phase::RiskActive => self.state.phase_timer.max(0.0),
            _ => 0.0,
        };
        let per_tomorrow = self.config.seconds_per_tomorrow.max(1);
        HudSnapshot {
            phase: self.state.phase,
            round: self.state.round,
            time_seconds: self.state.time_bank.ceil() as i64,
            countdown_seconds: countdown,
            debt_seconds: self.state.debt,
            tomorrow_pct: (self.state.debt * 100 / per_tomorrow).clamp(0, 100),
            score_seconds: self.state.score,
            stake_seconds: self.state.stake,
            rule_text: self
                .rule
                .as_ref()
                .map(|rule| rule.display_text.clone()),
        }
    }

    /// Presentation layer confirms the dealt hand is face-up; the decision
    /// countdown starts only now.
    pub fn deal_shown(&mut self) -> Result<(), RunError> {
        self.reject_if_ended()?;
        match self.state.phase {
            Phase::RoundActive | Phase::RiskActive => {
                self.state.countdown_frozen = false;
                Ok(())
            }
            _ => Err(RunError::NoActiveRound),
        }
    }
}

use super::*;
use crate::{Event, EventBus, RunOutcome};

impl RunState {
    /// Enter the double-or-bust sub-mode. Valid only during an intermission,
    /// once per intermission.
    pub fn start_risk(&mut self, challenge: usize, events: &mut EventBus) -> Result<(), RunError> {
        self.reject_if_ended()?;
        if self.state.phase != Phase::InterRound {
            return Err(RunError::NotIntermission);
        }
        if self.state.risk_used_this_intermission {
            return Err(RunError::RiskAlreadyUsed);
        }
        let risk = self
            .risks
            .get(challenge)
            .ok_or(RunError::UnknownRiskChallenge(challenge))?;

        self.state.risk_used_this_intermission = true;
        self.active_risk = Some(challenge);
        self.rule = None;
        self.state.phase = Phase::RiskPreview;
        self.state.phase_timer = 0.0;
        events.push(Event::RiskStarted {
            title: risk.title().to_string(),
            time_budget: risk.time_budget(),
        });
        Ok(())
    }

    pub(super) fn deal_risk(&mut self, events: &mut EventBus) {
        let risk = match self.active_risk.and_then(|i| self.risks.get(i)) {
            Some(risk) => risk,
            None => return,
        };
        let cards = risk.generate_hand(&mut self.rng);
        let correct = risk.evaluate(&cards);
        let budget = risk.time_budget();
        if correct.is_empty() {
            // Misconfigured challenge; surfaced as a warning and played out
            // as an impossible round.
            events.push(Event::RiskDegenerate {
                title: risk.title().to_string(),
            });
        }
        self.hand = cards;
        self.correct = correct;
        self.choice_taken = false;

        self.state.phase = Phase::RiskActive;
        self.state.phase_timer = budget;
        self.state.countdown_frozen = true;
        events.push(Event::HandDealt {
            count: self.hand.len(),
        });
    }

    pub(super) fn resolve_risk(&mut self, correct: bool, events: &mut EventBus) {
        self.active_risk = None;
        self.hand.clear();
        self.correct.clear();
        if correct {
            self.state.score = self.state.score.saturating_mul(2);
            events.push(Event::RiskWon {
                score: self.state.score,
            });
            // Back to the same intermission; the risk attempt stays spent.
            self.state.phase = Phase::InterRound;
            self.state.phase_timer = 0.0;
            self.state.continue_blocked_notified = false;
        } else {
            self.end_run(RunOutcome::Busted, events);
        }
    }
}

use super::*;
use crate::{Event, EventBus};

impl RunState {
    /// Advance all countdowns by `dt` seconds. The single external clock;
    /// the core never measures time itself.
    pub fn tick(&mut self, dt: f64, events: &mut EventBus) {
        if dt <= 0.0 || self.state.phase == Phase::Ended {
            return;
        }

        match self.state.phase {
            Phase::RulePreview => {
                self.state.phase_timer += dt;
                if self.state.phase_timer >= self.config.rule_preview_seconds {
                    self.deal_round(events);
                }
            }
            Phase::RiskPreview => {
                self.state.phase_timer += dt;
                if self.state.phase_timer >= self.config.rule_preview_seconds {
                    self.deal_risk(events);
                }
            }
            Phase::RoundActive => {
                if !self.state.countdown_frozen {
                    self.state.phase_timer -= dt;
                    if self.state.phase_timer <= 0.0 {
                        self.state.phase_timer = 0.0;
                        self.choice_taken = true;
                        self.resolve_round(false, true, events);
                    }
                }
            }
            Phase::RiskActive => {
                if !self.state.countdown_frozen {
                    self.state.phase_timer -= dt;
                    if self.state.phase_timer <= 0.0 {
                        self.state.phase_timer = 0.0;
                        self.choice_taken = true;
                        // Risk timeout is fatal, debt or not.
                        self.resolve_risk(false, events);
                    }
                }
            }
            Phase::InterRound => {
                self.state.phase_timer += dt;
                if self.state.phase_timer >= self.config.intermission_window_seconds {
                    let needed = self.config.stake_for_round(self.state.round + 1);
                    if self.state.time_bank >= needed as f64 {
                        self.enter_setup(events);
                    } else if !self.state.continue_blocked_notified {
                        self.state.continue_blocked_notified = true;
                        events.push(Event::ContinueBlocked { needed });
                    }
                }
            }
            Phase::Setup | Phase::Resolve | Phase::Ended => {}
        }
    }
}

use super::*;
use crate::{hand, resolve, Event, EventBus, RunOutcome};

impl RunState {
    pub(super) fn enter_setup(&mut self, events: &mut EventBus) {
        self.state.round += 1;
        self.state.borrow_used_this_round = false;
        self.state.stake = self.config.stake_for_round(self.state.round);

        // The bank moves only here (stake spend) and on borrow.
        self.state.time_bank = (self.state.time_bank - self.state.stake as f64).max(0.0);
        if self.state.time_bank <= 0.0 {
            self.end_run_for_empty_bank(events);
            return;
        }

        let rule = self
            .picker
            .pick_rule(self.state.round, self.state.stake, &mut self.rng);
        let rule_text = rule.display_text.clone();
        self.rule = Some(rule);
        self.planned_cards = self
            .config
            .planned_card_count(self.state.round, self.state.temp_extra_cards);
        self.state.temp_extra_cards = 0;

        self.state.phase = Phase::Setup;
        events.push(Event::RoundStarted {
            round: self.state.round,
            stake: self.state.stake,
            rule_text,
        });
        self.state.phase = Phase::RulePreview;
        self.state.phase_timer = 0.0;
    }

    /// Preview elapsed: generate the hand, repair it if the rule would be
    /// unsolvable, resolve correctness once, then wait for the presentation
    /// layer to reveal it.
    pub(super) fn deal_round(&mut self, events: &mut EventBus) {
        let rule = match self.rule.clone() {
            Some(rule) => rule,
            None => return,
        };
        let mut cards = hand::random_hand(self.planned_cards, &mut self.rng);
        resolve::ensure_solvable(&mut cards, rule.kind, &mut self.rng);
        self.correct = resolve::resolve(&mut cards, &rule, &mut self.rng);
        self.hand = cards;
        self.choice_taken = false;

        self.state.phase = Phase::RoundActive;
        self.state.phase_timer = self.state.stake as f64;
        self.state.countdown_frozen = true;
        events.push(Event::HandDealt {
            count: self.hand.len(),
        });
    }

    /// Outcome report from the presentation layer; at most one per hand.
    pub fn choose(&mut self, index: usize, events: &mut EventBus) -> Result<(), RunError> {
        self.reject_if_ended()?;
        if !matches!(self.state.phase, Phase::RoundActive | Phase::RiskActive) || self.choice_taken
        {
            return Err(RunError::NoActiveRound);
        }
        if index >= self.hand.len() {
            return Err(RunError::InvalidCardIndex(index));
        }

        // Clock stops the instant the input lands; the feedback animation is
        // the presentation layer's time, not the player's.
        self.state.countdown_frozen = true;
        self.choice_taken = true;
        let correct = self.correct.contains(&index);
        if self.state.phase == Phase::RoundActive {
            self.resolve_round(correct, false, events);
        } else {
            self.resolve_risk(correct, events);
        }
        Ok(())
    }

    pub(super) fn resolve_round(&mut self, correct: bool, timed_out: bool, events: &mut EventBus) {
        self.state.phase = Phase::Resolve;
        if correct {
            let winnings = self.state.stake;
            let paid = winnings.min(self.state.debt);
            self.state.debt -= paid;
            let surplus = winnings - paid;
            self.state.score += surplus;
            events.push(Event::RoundWon {
                surplus,
                paid,
                score: self.state.score,
                debt: self.state.debt,
            });
        } else {
            self.state.debt += self.state.stake;
            events.push(Event::RoundLost {
                stake: self.state.stake,
                debt: self.state.debt,
                timed_out,
            });
        }

        self.hand.clear();
        self.correct.clear();
        if self.config.is_intermission_round(self.state.round) {
            self.enter_intermission(events);
        } else {
            self.enter_setup(events);
        }
    }

    pub(super) fn enter_intermission(&mut self, events: &mut EventBus) {
        self.state.phase = Phase::InterRound;
        self.state.phase_timer = 0.0;
        self.state.borrow_used_this_round = false;
        self.state.risk_used_this_intermission = false;
        self.state.continue_blocked_notified = false;
        events.push(Event::IntermissionStarted {
            round: self.state.round,
        });
    }

    pub(super) fn end_run_for_empty_bank(&mut self, events: &mut EventBus) {
        let outcome = if self.state.debt > 0 {
            RunOutcome::Busted
        } else {
            RunOutcome::Clean
        };
        self.end_run(outcome, events);
    }
}

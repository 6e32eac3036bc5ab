use super::*;
use crate::{Event, EventBus, RunOutcome};

impl RunState {
    /// Borrow one packet of seconds against the flat credit cap. Allowed
    /// mid-round or between rounds, at most once per round when configured.
    pub fn borrow(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.reject_if_ended()?;
        if !matches!(self.state.phase, Phase::RoundActive | Phase::InterRound) {
            return Err(RunError::BorrowUnavailable);
        }
        if self.config.borrow_once_per_round && self.state.borrow_used_this_round {
            return Err(RunError::AlreadyBorrowed);
        }

        let packet = self.config.borrow_packet_seconds;
        let cap = self.config.base_credit_seconds;
        if self.state.debt + packet > cap {
            return Err(RunError::CreditExhausted);
        }

        self.state.time_bank += packet as f64;
        self.state.debt += packet;
        self.state.borrow_used_this_round = self.config.borrow_once_per_round;
        if self.config.borrow_spike_extra_cards > 0 {
            self.state.temp_extra_cards =
                (self.state.temp_extra_cards + self.config.borrow_spike_extra_cards).min(3);
        }

        events.push(Event::Borrowed {
            seconds: packet,
            debt: self.state.debt,
            credit_left: cap - self.state.debt,
        });
        Ok(())
    }

    pub fn continue_run(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.reject_if_ended()?;
        if self.state.phase != Phase::InterRound {
            return Err(RunError::NotIntermission);
        }
        let needed = self.config.stake_for_round(self.state.round + 1);
        if self.state.time_bank < needed as f64 {
            return Err(RunError::NotEnoughTime { needed });
        }
        self.enter_setup(events);
        Ok(())
    }

    /// Walk away with the current score. Outstanding debt does not bust a
    /// voluntary cash-out.
    pub fn cash_out(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.reject_if_ended()?;
        if self.state.phase != Phase::InterRound {
            return Err(RunError::NotIntermission);
        }
        self.end_run(RunOutcome::Clean, events);
        Ok(())
    }

    pub(super) fn end_run(&mut self, outcome: RunOutcome, events: &mut EventBus) {
        self.state.phase = Phase::Ended;
        self.state.outcome = Some(outcome);
        self.state.countdown_frozen = false;
        self.hand.clear();
        self.correct.clear();
        events.push(Event::RunEnded {
            busted: outcome == RunOutcome::Busted,
            score: self.state.score,
            debt: self.state.debt,
        });
    }
}

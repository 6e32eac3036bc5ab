use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StakeBand {
    pub round_min: u32,
    pub round_max: u32,
    pub stake_seconds: i64,
}

impl StakeBand {
    pub fn new(round_min: u32, round_max: u32, stake_seconds: i64) -> Self {
        Self {
            round_min,
            round_max,
            stake_seconds,
        }
    }

    pub fn matches(&self, round_index: u32) -> bool {
        round_index >= self.round_min && round_index <= self.round_max
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub start_timer_seconds: f64,
    pub rule_preview_seconds: f64,
    pub intermission_every_n_rounds: u32,
    pub intermission_window_seconds: f64,
    pub borrow_packet_seconds: i64,
    /// Flat credit cap in seconds; debt may never exceed it.
    pub base_credit_seconds: i64,
    pub borrow_once_per_round: bool,
    /// Display scaling only: this many debt seconds reads as 100% of
    /// tomorrow spent.
    pub seconds_per_tomorrow: i64,
    pub stake_bands: Vec<StakeBand>,
    pub start_card_count: usize,
    pub max_card_count: usize,
    pub borrow_spike_extra_cards: u32,
    pub min_round_for_curses: u32,
    pub cursed_rule_weight: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_timer_seconds: 30.0,
            rule_preview_seconds: 3.0,
            intermission_every_n_rounds: 5,
            intermission_window_seconds: 2.0,
            borrow_packet_seconds: 10,
            base_credit_seconds: 10,
            borrow_once_per_round: true,
            seconds_per_tomorrow: 60,
            stake_bands: vec![
                StakeBand::new(1, 3, 4),
                StakeBand::new(4, 6, 5),
                StakeBand::new(7, 9, 6),
                StakeBand::new(10, 99, 7),
            ],
            start_card_count: 3,
            max_card_count: 6,
            borrow_spike_extra_cards: 1,
            min_round_for_curses: 5,
            cursed_rule_weight: 0.5,
        }
    }
}

impl GameConfig {
    /// First matching band wins; a round past every band falls back to the
    /// last-defined band.
    pub fn stake_for_round(&self, round_index: u32) -> i64 {
        self.stake_bands
            .iter()
            .find(|band| band.matches(round_index))
            .or_else(|| self.stake_bands.last())
            .map(|band| band.stake_seconds)
            .unwrap_or(0)
    }

    pub fn intermission_period(&self) -> u32 {
        self.intermission_every_n_rounds.max(2)
    }

    pub fn is_intermission_round(&self, round_index: u32) -> bool {
        round_index % self.intermission_period() == 0
    }

    pub fn planned_card_count(&self, round_index: u32, extra_cards: u32) -> usize {
        let grown = self.start_card_count + (round_index / 3) as usize;
        let base = grown.min(self.max_card_count).max(self.start_card_count);
        (base + extra_cards as usize)
            .min(self.max_card_count)
            .max(self.start_card_count)
    }
}

use crate::{CurseMode, GameConfig, RngState, Rule, Suit};

/// Supplies the rule for a round. The engine only requires a valid `Rule`
/// back; the distribution is the picker's business.
pub trait RulePicker: std::fmt::Debug {
    fn pick_rule(&mut self, round_index: u32, stake_seconds: i64, rng: &mut RngState) -> Rule;
}

const CLEAN: &[fn() -> Rule] = &[
    || Rule::highest(CurseMode::None),
    || Rule::lowest(CurseMode::None),
    || Rule::second_highest(CurseMode::None),
    || Rule::second_lowest(CurseMode::None),
    || Rule::pick_red(CurseMode::None),
    || Rule::pick_black(CurseMode::None),
    || Rule::avoid(Suit::Spades, CurseMode::None),
    || Rule::avoid(Suit::Hearts, CurseMode::None),
];

const CURSED: &[fn() -> Rule] = &[
    || Rule::highest(CurseMode::OneOfValids),
    || Rule::highest(CurseMode::HalfOfValids),
    || Rule::lowest(CurseMode::OneOfValids),
    || Rule::second_highest(CurseMode::OneOfValids),
    || Rule::second_lowest(CurseMode::HalfOfValids),
    || Rule::pick_red(CurseMode::OneOfValids),
    || Rule::pick_black(CurseMode::OneOfValids),
    || Rule::avoid(Suit::Spades, CurseMode::AllValids),
    || Rule::avoid(Suit::Hearts, CurseMode::OneOfValids),
];

/// Default picker: clean rules only below the curse threshold round, then a
/// weighted coin between the clean and cursed pools.
#[derive(Debug, Clone)]
pub struct WeightedRulePicker {
    pub min_round_for_curses: u32,
    pub cursed_rule_weight: f64,
}

impl WeightedRulePicker {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            min_round_for_curses: config.min_round_for_curses,
            cursed_rule_weight: config.cursed_rule_weight,
        }
    }

    fn pick_from(pool: &[fn() -> Rule], rng: &mut RngState) -> Rule {
        if pool.is_empty() {
            return Rule::highest(CurseMode::None);
        }
        pool[rng.below(pool.len())]()
    }
}

impl RulePicker for WeightedRulePicker {
    fn pick_rule(&mut self, round_index: u32, _stake_seconds: i64, rng: &mut RngState) -> Rule {
        if round_index < self.min_round_for_curses {
            return Self::pick_from(CLEAN, rng);
        }
        let weight = self.cursed_rule_weight.clamp(0.0, 1.0);
        if rng.next_f64() < weight {
            Self::pick_from(CURSED, rng)
        } else {
            Self::pick_from(CLEAN, rng)
        }
    }
}

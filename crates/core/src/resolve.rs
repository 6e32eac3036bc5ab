//! Rule evaluation, curse application and the final correctness resolver.

use crate::{
    Card, ColorFilter, CurseMode, RngState, Rule, RuleKind, Suit, MAX_CARD_VALUE, MIN_CARD_VALUE,
};
use std::collections::HashSet;

/// Indices that satisfy the rule before any curse is applied. Ties are never
/// broken; every tied index is a member.
pub fn initial_valids(cards: &[Card], kind: RuleKind) -> HashSet<usize> {
    let mut result = HashSet::new();
    match kind {
        RuleKind::Highest => {
            if let Some(max) = cards.iter().map(|card| card.value).max() {
                result.extend(indices_at_value(cards, max));
            }
        }
        RuleKind::Lowest => {
            if let Some(min) = cards.iter().map(|card| card.value).min() {
                result.extend(indices_at_value(cards, min));
            }
        }
        RuleKind::SecondHighest => {
            let mut values = distinct_values(cards);
            if values.len() < 2 {
                return initial_valids(cards, RuleKind::Highest);
            }
            values.sort_by(|a, b| b.cmp(a));
            result.extend(indices_at_value(cards, values[1]));
        }
        RuleKind::SecondLowest => {
            let mut values = distinct_values(cards);
            if values.len() < 2 {
                return initial_valids(cards, RuleKind::Lowest);
            }
            values.sort();
            result.extend(indices_at_value(cards, values[1]));
        }
        RuleKind::PickColor(_) | RuleKind::AvoidSuit(_) => {
            let filtered = domain_indices(cards, kind);
            // Empty domain is the documented impossible-round case.
            if let Some(max) = filtered.iter().map(|&i| cards[i].value).max() {
                result.extend(filtered.into_iter().filter(|&i| cards[i].value == max));
            }
        }
    }
    result
}

/// Mark cursed cards according to the rule's curse mode and return the cursed
/// indices. Candidates are always drawn from the initial valid set.
pub fn apply_curses(
    cards: &mut [Card],
    initial: &HashSet<usize>,
    rule: &Rule,
    rng: &mut RngState,
) -> HashSet<usize> {
    let mut cursed = HashSet::new();
    if rule.curse_mode == CurseMode::None {
        return cursed;
    }

    // Probability 0 or 1 is deliberately not gated; upstream rule selection
    // already decided a cursed round was wanted.
    if rule.curse_probability > 0.0 && rule.curse_probability < 1.0 {
        let roll = rng.next_f64();
        if roll > rule.curse_probability {
            return cursed;
        }
    }

    let mut candidates: Vec<usize> = initial.iter().copied().collect();
    candidates.sort_unstable();
    if candidates.is_empty() {
        return cursed;
    }

    let guard = matches!(
        rule.curse_mode,
        CurseMode::OneOfValids | CurseMode::HalfOfValids
    );
    if guard && candidates.len() == 1 {
        // Never curse the sole correct answer.
        return cursed;
    }

    match rule.curse_mode {
        CurseMode::None => {}
        CurseMode::OneOfValids => {
            let idx = candidates[rng.below(candidates.len())];
            cards[idx].cursed = true;
            cursed.insert(idx);
        }
        CurseMode::HalfOfValids => {
            rng.shuffle(&mut candidates);
            let take = (candidates.len() / 2).clamp(1, candidates.len() - 1);
            for &idx in &candidates[..take] {
                cards[idx].cursed = true;
                cursed.insert(idx);
            }
        }
        CurseMode::AllValids => {
            let domain_count = domain_indices(cards, rule.kind).len();
            if rule.kind.is_domain_filtered() && candidates.len() == domain_count && domain_count > 0
            {
                // Cursing the rule's entire eligible domain would trap the
                // player; keep one random candidate clean.
                rng.shuffle(&mut candidates);
                for &idx in &candidates[1..] {
                    cards[idx].cursed = true;
                    cursed.insert(idx);
                }
            } else {
                for &idx in &candidates {
                    cards[idx].cursed = true;
                    cursed.insert(idx);
                }
            }
        }
    }

    cursed
}

/// Full pipeline: initial valids, curse marking, then the same-family
/// fallback over whatever non-cursed cards remain in the rule's domain. An
/// empty result is a legitimate impossible round, not an error.
pub fn resolve(cards: &mut [Card], rule: &Rule, rng: &mut RngState) -> HashSet<usize> {
    let initial = initial_valids(cards, rule.kind);
    let cursed = apply_curses(cards, &initial, rule, rng);

    let mut fin: HashSet<usize> = initial.difference(&cursed).copied().collect();
    if fin.is_empty() {
        let ranking = ranking(cards, rule.kind);
        if let Some(&(_, best)) = ranking.first() {
            fin.extend(
                ranking
                    .iter()
                    .take_while(|&&(_, value)| value == best)
                    .map(|&(index, _)| index),
            );
        }
    }
    fin
}

/// Non-cursed in-domain indices ordered best-first for the rule's family.
fn ranking(cards: &[Card], kind: RuleKind) -> Vec<(usize, u8)> {
    let mut list: Vec<(usize, u8)> = domain_indices(cards, kind)
        .into_iter()
        .filter(|&i| !cards[i].cursed)
        .map(|i| (i, cards[i].value))
        .collect();
    list.sort_by_key(|&(_, value)| value);
    if kind.is_highest_family() {
        list.reverse();
    }
    list
}

fn domain_indices(cards: &[Card], kind: RuleKind) -> Vec<usize> {
    (0..cards.len())
        .filter(|&i| kind.in_domain(cards[i]))
        .collect()
}

fn indices_at_value(cards: &[Card], value: u8) -> impl Iterator<Item = usize> + '_ {
    cards
        .iter()
        .enumerate()
        .filter(move |(_, card)| card.value == value)
        .map(|(i, _)| i)
}

fn distinct_values(cards: &[Card]) -> Vec<u8> {
    let seen: HashSet<u8> = cards.iter().map(|card| card.value).collect();
    seen.into_iter().collect()
}

/// Mutate a freshly generated hand just enough that the rule has at least one
/// initial valid index. Applied to non-forced hands only, strictly before
/// curse application.
pub fn ensure_solvable(cards: &mut [Card], kind: RuleKind, rng: &mut RngState) {
    if cards.is_empty() || !initial_valids(cards, kind).is_empty() {
        return;
    }

    match kind {
        RuleKind::AvoidSuit(avoided) => {
            let i = rng.below(cards.len());
            if cards[i].suit == avoided {
                let options: Vec<Suit> = Suit::ALL
                    .into_iter()
                    .filter(|&suit| suit != avoided)
                    .collect();
                cards[i].suit = options[rng.below(options.len())];
            }
        }
        RuleKind::PickColor(color) => {
            let i = rng.below(cards.len());
            cards[i].suit = match (color, rng.below(2)) {
                (ColorFilter::Red, 0) => Suit::Hearts,
                (ColorFilter::Red, _) => Suit::Diamonds,
                (ColorFilter::Black, 0) => Suit::Clubs,
                (ColorFilter::Black, _) => Suit::Spades,
            };
        }
        RuleKind::SecondHighest | RuleKind::SecondLowest => {
            if distinct_values(cards).len() < 2 {
                let idx = rng.below(cards.len());
                let old = cards[idx].value;
                let span = (MAX_CARD_VALUE - MIN_CARD_VALUE + 1) as usize;
                for _ in 0..32 {
                    let value = MIN_CARD_VALUE + rng.below(span) as u8;
                    if value != old {
                        cards[idx].value = value;
                        break;
                    }
                }
            }
        }
        // Highest/Lowest always have a valid set on a non-empty hand.
        RuleKind::Highest | RuleKind::Lowest => {}
    }
}

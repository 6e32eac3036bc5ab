use std::collections::HashSet;
use tickdown_core::{
    apply_curses, ensure_solvable, initial_valids, resolve, Card, ColorFilter, CurseMode, RngState,
    Rule, RuleKind, Suit,
};

fn card(value: u8, suit: Suit) -> Card {
    Card::new(value, suit)
}

fn set(indices: &[usize]) -> HashSet<usize> {
    indices.iter().copied().collect()
}

fn random_hand(rng: &mut RngState, len: usize) -> Vec<Card> {
    (0..len)
        .map(|_| {
            let value = 2 + rng.below(13) as u8;
            let suit = Suit::ALL[rng.below(4)];
            Card::new(value, suit)
        })
        .collect()
}

// Reference semantics, written independently of the resolver.
fn oracle_initial_valids(cards: &[Card], kind: RuleKind) -> HashSet<usize> {
    match kind {
        RuleKind::Highest => {
            let max = cards.iter().map(|c| c.value).max().unwrap();
            (0..cards.len()).filter(|&i| cards[i].value == max).collect()
        }
        RuleKind::Lowest => {
            let min = cards.iter().map(|c| c.value).min().unwrap();
            (0..cards.len()).filter(|&i| cards[i].value == min).collect()
        }
        RuleKind::SecondHighest => {
            let mut distinct: Vec<u8> = cards
                .iter()
                .map(|c| c.value)
                .collect::<HashSet<_>>()
                .into_iter()
                .collect();
            distinct.sort_by(|a, b| b.cmp(a));
            if distinct.len() < 2 {
                return oracle_initial_valids(cards, RuleKind::Highest);
            }
            let target = distinct[1];
            (0..cards.len())
                .filter(|&i| cards[i].value == target)
                .collect()
        }
        RuleKind::SecondLowest => {
            let mut distinct: Vec<u8> = cards
                .iter()
                .map(|c| c.value)
                .collect::<HashSet<_>>()
                .into_iter()
                .collect();
            distinct.sort();
            if distinct.len() < 2 {
                return oracle_initial_valids(cards, RuleKind::Lowest);
            }
            let target = distinct[1];
            (0..cards.len())
                .filter(|&i| cards[i].value == target)
                .collect()
        }
        RuleKind::PickColor(color) => {
            let filtered: Vec<usize> = (0..cards.len())
                .filter(|&i| color.matches(cards[i].suit))
                .collect();
            match filtered.iter().map(|&i| cards[i].value).max() {
                Some(max) => filtered
                    .into_iter()
                    .filter(|&i| cards[i].value == max)
                    .collect(),
                None => HashSet::new(),
            }
        }
        RuleKind::AvoidSuit(avoided) => {
            let filtered: Vec<usize> = (0..cards.len())
                .filter(|&i| cards[i].suit != avoided)
                .collect();
            match filtered.iter().map(|&i| cards[i].value).max() {
                Some(max) => filtered
                    .into_iter()
                    .filter(|&i| cards[i].value == max)
                    .collect(),
                None => HashSet::new(),
            }
        }
    }
}

fn clean_rules() -> Vec<Rule> {
    vec![
        Rule::highest(CurseMode::None),
        Rule::lowest(CurseMode::None),
        Rule::second_highest(CurseMode::None),
        Rule::second_lowest(CurseMode::None),
        Rule::pick_red(CurseMode::None),
        Rule::pick_black(CurseMode::None),
        Rule::avoid(Suit::Spades, CurseMode::None),
        Rule::avoid(Suit::Hearts, CurseMode::None),
    ]
}

#[test]
fn highest_basic_and_ties() {
    let mut cards = vec![
        card(13, Suit::Spades),
        card(13, Suit::Diamonds),
        card(7, Suit::Clubs),
    ];
    let mut rng = RngState::from_seed(1);
    let got = resolve(&mut cards, &Rule::highest(CurseMode::None), &mut rng);
    assert_eq!(got, set(&[0, 1]));
}

#[test]
fn lowest_basic_and_ties() {
    let mut cards = vec![
        card(2, Suit::Hearts),
        card(13, Suit::Spades),
        card(13, Suit::Diamonds),
        card(2, Suit::Clubs),
    ];
    let mut rng = RngState::from_seed(1);
    let got = resolve(&mut cards, &Rule::lowest(CurseMode::None), &mut rng);
    assert_eq!(got, set(&[0, 3]));
}

#[test]
fn second_highest_with_duplicates() {
    let mut cards = vec![
        card(2, Suit::Hearts),
        card(10, Suit::Spades),
        card(10, Suit::Diamonds),
        card(8, Suit::Clubs),
    ];
    let mut rng = RngState::from_seed(1);
    let got = resolve(&mut cards, &Rule::second_highest(CurseMode::None), &mut rng);
    assert_eq!(got, set(&[3]));
}

#[test]
fn second_lowest_all_equal_falls_back_to_lowest() {
    let mut cards = vec![
        card(7, Suit::Clubs),
        card(7, Suit::Spades),
        card(7, Suit::Diamonds),
    ];
    let mut rng = RngState::from_seed(1);
    let got = resolve(&mut cards, &Rule::second_lowest(CurseMode::None), &mut rng);
    assert_eq!(got, set(&[0, 1, 2]));
}

#[test]
fn pick_red_when_present() {
    let mut cards = vec![
        card(9, Suit::Clubs),
        card(12, Suit::Diamonds),
        card(11, Suit::Hearts),
        card(12, Suit::Clubs),
    ];
    let mut rng = RngState::from_seed(1);
    let got = resolve(&mut cards, &Rule::pick_red(CurseMode::None), &mut rng);
    assert_eq!(got, set(&[1]));
}

#[test]
fn pick_red_when_absent_is_impossible_round() {
    let mut cards = vec![
        card(9, Suit::Clubs),
        card(12, Suit::Spades),
        card(11, Suit::Clubs),
    ];
    let mut rng = RngState::from_seed(1);
    let got = resolve(&mut cards, &Rule::pick_red(CurseMode::None), &mut rng);
    assert!(got.is_empty());
}

#[test]
fn avoid_suit_all_avoided_is_impossible_round() {
    let mut cards = vec![
        card(5, Suit::Spades),
        card(9, Suit::Spades),
        card(12, Suit::Spades),
    ];
    let mut rng = RngState::from_seed(1);
    let got = resolve(&mut cards, &Rule::avoid(Suit::Spades, CurseMode::None), &mut rng);
    assert!(got.is_empty());
}

#[test]
fn no_curses_matches_oracle_fuzz() {
    let mut rng = RngState::from_seed(12345);
    for _ in 0..1000 {
        let n = 3 + rng.below(4);
        let cards = random_hand(&mut rng, n);
        for rule in clean_rules() {
            let expect = oracle_initial_valids(&cards, rule.kind);
            let mut hand = cards.clone();
            let got = resolve(&mut hand, &rule, &mut rng);
            assert_eq!(
                got, expect,
                "mismatch for {:?} on {:?}",
                rule.kind, cards
            );
        }
    }
}

#[test]
fn curse_invariants_fuzz() {
    let cursed_rules: Vec<fn() -> Rule> = vec![
        || Rule::highest(CurseMode::OneOfValids),
        || Rule::highest(CurseMode::HalfOfValids),
        || Rule::highest(CurseMode::AllValids),
        || Rule::lowest(CurseMode::OneOfValids),
        || Rule::second_highest(CurseMode::OneOfValids),
        || Rule::second_lowest(CurseMode::HalfOfValids),
        || Rule::pick_red(CurseMode::OneOfValids),
        || Rule::pick_black(CurseMode::OneOfValids),
        || Rule::avoid(Suit::Spades, CurseMode::AllValids),
        || Rule::avoid(Suit::Hearts, CurseMode::OneOfValids),
    ];

    let mut rng = RngState::from_seed(67890);
    for _ in 0..1000 {
        let n = 3 + rng.below(4);
        let base = random_hand(&mut rng, n);

        for mk in &cursed_rules {
            let rule = mk();
            let mut hand = base.clone();
            let initial = oracle_initial_valids(&hand, rule.kind);
            let result = resolve(&mut hand, &rule, &mut rng);

            // Every cursed card was an initial valid.
            for (i, c) in hand.iter().enumerate() {
                if c.cursed {
                    assert!(
                        initial.contains(&i),
                        "cursed index {i} not initially valid for {:?}/{:?}",
                        rule.kind,
                        rule.curse_mode
                    );
                }
            }

            let any_non_cursed = hand.iter().any(|c| !c.cursed);
            let everyone_cursed = hand.iter().all(|c| c.cursed);
            if !initial.is_empty() && any_non_cursed && !everyone_cursed {
                assert!(
                    !result.is_empty(),
                    "empty final set though non-cursed options exist for {:?}/{:?} on {:?}",
                    rule.kind,
                    rule.curse_mode,
                    base
                );
            }
        }
    }
}

#[test]
fn singleton_valid_set_is_never_cursed() {
    for mode in [CurseMode::OneOfValids, CurseMode::HalfOfValids] {
        let mut cards = vec![
            card(14, Suit::Spades),
            card(5, Suit::Hearts),
            card(9, Suit::Clubs),
        ];
        let mut rng = RngState::from_seed(7);
        let rule = Rule::highest(mode);
        let got = resolve(&mut cards, &rule, &mut rng);
        assert_eq!(got, set(&[0]));
        assert!(cards.iter().all(|c| !c.cursed));
    }
}

#[test]
fn half_of_valids_leaves_at_least_one() {
    // Four-way tie on Highest: half are cursed, half survive.
    let mut cards = vec![
        card(10, Suit::Spades),
        card(10, Suit::Hearts),
        card(10, Suit::Diamonds),
        card(10, Suit::Clubs),
    ];
    let mut rng = RngState::from_seed(11);
    let got = resolve(&mut cards, &Rule::highest(CurseMode::HalfOfValids), &mut rng);
    assert_eq!(cards.iter().filter(|c| c.cursed).count(), 2);
    assert_eq!(got.len(), 2);
    assert!(got.iter().all(|&i| !cards[i].cursed));
}

#[test]
fn all_valids_on_all_equal_highest_yields_no_answer() {
    // Known edge case, kept on purpose: an unfiltered rule may curse its
    // entire valid set when every value ties.
    let mut cards = vec![
        card(10, Suit::Spades),
        card(10, Suit::Hearts),
        card(10, Suit::Diamonds),
    ];
    let mut rng = RngState::from_seed(3);
    let got = resolve(&mut cards, &Rule::highest(CurseMode::AllValids), &mut rng);
    assert!(got.is_empty());
    assert!(cards.iter().all(|c| c.cursed));
}

#[test]
fn all_valids_never_curses_entire_filtered_domain() {
    // Both non-spades share the max value, so the candidates equal the
    // rule's whole domain; one must stay clean.
    let mut cards = vec![
        card(5, Suit::Hearts),
        card(5, Suit::Diamonds),
        card(9, Suit::Spades),
    ];
    let mut rng = RngState::from_seed(21);
    let got = resolve(
        &mut cards,
        &Rule::avoid(Suit::Spades, CurseMode::AllValids),
        &mut rng,
    );
    assert_eq!(cards.iter().filter(|c| c.cursed).count(), 1);
    assert_eq!(got.len(), 1);
    let survivor = *got.iter().next().unwrap();
    assert!(survivor < 2 && !cards[survivor].cursed);
}

#[test]
fn all_valids_on_partial_domain_falls_back_to_next_best() {
    // Only index 1 holds the max among non-spades; cursing it falls back to
    // the next best non-cursed card in the domain.
    let mut cards = vec![
        card(5, Suit::Hearts),
        card(12, Suit::Diamonds),
        card(9, Suit::Spades),
    ];
    let mut rng = RngState::from_seed(5);
    let got = resolve(
        &mut cards,
        &Rule::avoid(Suit::Spades, CurseMode::AllValids),
        &mut rng,
    );
    assert!(cards[1].cursed);
    assert_eq!(got, set(&[0]));
}

#[test]
fn curse_probability_gate_aborts_on_high_roll() {
    // With p strictly inside (0,1) the gate consumes one roll; a losing roll
    // leaves the hand untouched.
    let mut rule = Rule::highest(CurseMode::AllValids);
    rule.curse_probability = 0.5;
    let mut saw_clean = false;
    let mut saw_cursed = false;
    for seed in 0..64 {
        let mut cards = vec![card(10, Suit::Spades), card(10, Suit::Hearts)];
        let mut rng = RngState::from_seed(seed);
        let got = resolve(&mut cards, &rule, &mut rng);
        let cursed = cards.iter().filter(|c| c.cursed).count();
        if cursed == 0 {
            saw_clean = true;
            assert_eq!(got, set(&[0, 1]));
        } else {
            saw_cursed = true;
            assert_eq!(cursed, 2);
            assert!(got.is_empty());
        }
    }
    assert!(saw_clean && saw_cursed);
}

#[test]
fn ensure_solvable_repairs_avoided_suit() {
    let mut rng = RngState::from_seed(9);
    let mut cards = vec![
        card(5, Suit::Spades),
        card(9, Suit::Spades),
        card(12, Suit::Spades),
    ];
    ensure_solvable(&mut cards, RuleKind::AvoidSuit(Suit::Spades), &mut rng);
    assert!(!initial_valids(&cards, RuleKind::AvoidSuit(Suit::Spades)).is_empty());
}

#[test]
fn ensure_solvable_repairs_missing_color() {
    let mut rng = RngState::from_seed(9);
    let mut cards = vec![
        card(5, Suit::Spades),
        card(9, Suit::Clubs),
        card(12, Suit::Spades),
    ];
    ensure_solvable(
        &mut cards,
        RuleKind::PickColor(ColorFilter::Red),
        &mut rng,
    );
    assert!(!initial_valids(&cards, RuleKind::PickColor(ColorFilter::Red)).is_empty());
    assert!(cards.iter().any(|c| c.suit.is_red()));
}

#[test]
fn ensure_solvable_accepts_second_rule_fallback_on_tied_hands() {
    // An all-equal hand is already solvable for the second rules through
    // their fallback to Highest/Lowest, so the guard leaves it untouched.
    let mut rng = RngState::from_seed(9);
    let original = vec![
        card(7, Suit::Spades),
        card(7, Suit::Clubs),
        card(7, Suit::Hearts),
    ];
    for kind in [RuleKind::SecondHighest, RuleKind::SecondLowest] {
        let mut cards = original.clone();
        ensure_solvable(&mut cards, kind, &mut rng);
        assert_eq!(cards, original);
        assert!(!initial_valids(&cards, kind).is_empty());
    }
}

#[test]
fn ensure_solvable_leaves_solvable_hands_alone() {
    let mut rng = RngState::from_seed(9);
    let original = vec![
        card(5, Suit::Hearts),
        card(9, Suit::Clubs),
        card(12, Suit::Spades),
    ];
    for kind in [
        RuleKind::Highest,
        RuleKind::Lowest,
        RuleKind::SecondHighest,
        RuleKind::SecondLowest,
        RuleKind::PickColor(ColorFilter::Red),
        RuleKind::AvoidSuit(Suit::Spades),
    ] {
        let mut cards = original.clone();
        ensure_solvable(&mut cards, kind, &mut rng);
        assert_eq!(cards, original, "hand mutated for solvable {kind:?}");
    }
}

#[test]
fn apply_curses_none_mode_is_a_no_op() {
    let mut cards = vec![card(10, Suit::Spades), card(10, Suit::Hearts)];
    let initial = set(&[0, 1]);
    let mut rng = RngState::from_seed(2);
    let cursed = apply_curses(
        &mut cards,
        &initial,
        &Rule::highest(CurseMode::None),
        &mut rng,
    );
    assert!(cursed.is_empty());
    assert!(cards.iter().all(|c| !c.cursed));
}

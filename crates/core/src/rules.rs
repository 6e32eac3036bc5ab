use crate::{Card, ColorFilter, Suit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Highest,
    Lowest,
    SecondHighest,
    SecondLowest,
    PickColor(ColorFilter),
    AvoidSuit(Suit),
}

impl RuleKind {
    pub fn is_highest_family(self) -> bool {
        matches!(
            self,
            RuleKind::Highest
                | RuleKind::SecondHighest
                | RuleKind::PickColor(_)
                | RuleKind::AvoidSuit(_)
        )
    }

    pub fn is_lowest_family(self) -> bool {
        matches!(self, RuleKind::Lowest | RuleKind::SecondLowest)
    }

    pub fn is_domain_filtered(self) -> bool {
        matches!(self, RuleKind::PickColor(_) | RuleKind::AvoidSuit(_))
    }

    /// Whether a card is eligible at all under this rule's domain filter.
    pub fn in_domain(self, card: Card) -> bool {
        match self {
            RuleKind::PickColor(color) => color.matches(card.suit),
            RuleKind::AvoidSuit(suit) => card.suit != suit,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CurseMode {
    None,
    OneOfValids,
    HalfOfValids,
    AllValids,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    pub kind: RuleKind,
    pub curse_mode: CurseMode,
    pub curse_probability: f64,
    pub display_text: String,
}

impl Rule {
    fn with_text(kind: RuleKind, curse: CurseMode, text: String) -> Self {
        Self {
            kind,
            curse_mode: curse,
            curse_probability: 0.0,
            display_text: text,
        }
    }

    pub fn highest(curse: CurseMode) -> Self {
        Self::with_text(RuleKind::Highest, curse, "Pick the Highest".into())
    }

    pub fn lowest(curse: CurseMode) -> Self {
        Self::with_text(RuleKind::Lowest, curse, "Pick the Lowest".into())
    }

    pub fn second_highest(curse: CurseMode) -> Self {
        Self::with_text(
            RuleKind::SecondHighest,
            curse,
            "Pick the Second Highest".into(),
        )
    }

    pub fn second_lowest(curse: CurseMode) -> Self {
        Self::with_text(
            RuleKind::SecondLowest,
            curse,
            "Pick the Second Lowest".into(),
        )
    }

    pub fn pick_color(color: ColorFilter, curse: CurseMode) -> Self {
        Self::with_text(
            RuleKind::PickColor(color),
            curse,
            format!("Pick a {} (highest wins)", color.name()),
        )
    }

    pub fn pick_red(curse: CurseMode) -> Self {
        Self::pick_color(ColorFilter::Red, curse)
    }

    pub fn pick_black(curse: CurseMode) -> Self {
        Self::pick_color(ColorFilter::Black, curse)
    }

    pub fn avoid(suit: Suit, curse: CurseMode) -> Self {
        Self::with_text(
            RuleKind::AvoidSuit(suit),
            curse,
            format!("Avoid {} (pick highest among others)", suit.name()),
        )
    }
}

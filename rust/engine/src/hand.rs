use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        };
        f.write_str(name)
    }
}

/// Totally ordered strength of a five-card hand.
///
/// Ordering is lexicographic over `(category, kickers)`. Kickers hold rank
/// values grouped by how much they contribute to the hand (trips before the
/// pair of a full house, high pair before low pair before kicker), zero
/// padded. Straights store only their top card, 5 for the wheel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

/// Evaluates the best five-card hand among 5, 6 or 7 cards.
///
/// # Panics
///
/// Panics when given fewer than 5 or more than 7 cards.
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    best_hand(cards).0
}

/// Like [`evaluate_hand`], also returning the five cards that make the hand.
///
/// # Panics
///
/// Panics when given fewer than 5 or more than 7 cards.
pub fn best_hand(cards: &[Card]) -> (HandStrength, [Card; 5]) {
    assert!(
        (5..=7).contains(&cards.len()),
        "hand evaluation needs 5 to 7 cards, got {}",
        cards.len()
    );
    debug_assert!(
        cards.iter().enumerate().all(|(i, c)| !cards[..i].contains(c)),
        "duplicate card in evaluated hand"
    );
    let n = cards.len();
    let mut best: Option<(HandStrength, [Card; 5])> = None;
    // Choose which (n - 5) cards to leave out.
    for skip_a in 0..n {
        for skip_b in skip_a..n {
            let skipped = match n {
                5 => skip_a == 0 && skip_b == 0,
                6 => skip_a == skip_b,
                _ => skip_a != skip_b,
            };
            if !skipped {
                continue;
            }
            let mut five = [cards[0]; 5];
            let mut k = 0;
            for (i, &c) in cards.iter().enumerate() {
                if n > 5 && (i == skip_a || i == skip_b) {
                    continue;
                }
                five[k] = c;
                k += 1;
            }
            let strength = evaluate_five(&five);
            if best.as_ref().is_none_or(|(b, _)| strength > *b) {
                best = Some((strength, five));
            }
        }
    }
    best.unwrap_or_else(|| unreachable!("at least one five-card subset exists"))
}

/// The five cards that make the best hand among 5 to 7.
pub fn best_five(cards: &[Card]) -> [Card; 5] {
    best_hand(cards).1
}

/// Evaluates exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandStrength {
    let mut ranks: [u8; 5] = cards.map(|c| c.rank.value());
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high(&ranks);

    match (straight, flush) {
        (Some(high), true) => {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            }
        }
        (Some(high), false) => {
            return HandStrength {
                category: Category::Straight,
                kickers: [high, 0, 0, 0, 0],
            }
        }
        (None, true) => {
            return HandStrength {
                category: Category::Flush,
                kickers: ranks,
            }
        }
        (None, false) => {}
    }

    // (count, rank) groups, largest group first, then higher rank.
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
    for &r in &ranks {
        match groups.iter_mut().find(|(_, gr)| *gr == r) {
            Some(g) => g.0 += 1,
            None => groups.push((1, r)),
        }
    }
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let category = match (groups[0].0, groups.get(1).map_or(0, |g| g.0)) {
        (4, _) => Category::FourOfAKind,
        (3, 2) => Category::FullHouse,
        (3, _) => Category::ThreeOfAKind,
        (2, 2) => Category::TwoPair,
        (2, _) => Category::OnePair,
        _ => Category::HighCard,
    };
    let mut kickers = [0u8; 5];
    for (slot, (_, r)) in kickers.iter_mut().zip(groups.iter()) {
        *slot = *r;
    }
    HandStrength { category, kickers }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

/// Top card of a five-card straight, given ranks sorted high to low.
fn straight_high(sorted_desc: &[u8; 5]) -> Option<u8> {
    let distinct = sorted_desc.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        return None;
    }
    if sorted_desc[0] - sorted_desc[4] == 4 {
        return Some(sorted_desc[0]);
    }
    // Ace plays low in the wheel.
    if *sorted_desc == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

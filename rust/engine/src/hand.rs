use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::HandError;

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
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        };
        f.write_str(name)
    }
}

/// Strength of a five-card hand.
///
/// Ordering is lexicographic: category first, then the tiebreak ranks from
/// most to least significant (unused slots are zero). Two scores are equal
/// exactly when the hands split a pot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandScore {
    pub category: Category,
    pub tiebreak: [u8; 5],
}

pub const MIN_CARDS: usize = 5;
pub const MAX_CARDS: usize = 7;

/// Ranks the best five-card hand that can be made from 5 to 7 cards.
///
/// Every `C(n, 5)` combination is scored and the maximum is returned.
pub fn evaluate(cards: &[Card]) -> Result<HandScore, HandError> {
    best_five(cards).map(|(_, score)| score)
}

/// Like [`evaluate`], but also returns the five cards that make the hand.
pub fn best_five(cards: &[Card]) -> Result<([Card; 5], HandScore), HandError> {
    check_cards(cards)?;
    let best = cards
        .iter()
        .copied()
        .combinations(MIN_CARDS)
        .map(|combo| {
            let five = [combo[0], combo[1], combo[2], combo[3], combo[4]];
            (five, score_five(&five))
        })
        .max_by(|a, b| a.1.cmp(&b.1));
    best.ok_or(HandError::TooFewCards { count: cards.len() })
}

fn check_cards(cards: &[Card]) -> Result<(), HandError> {
    if cards.len() < MIN_CARDS {
        return Err(HandError::TooFewCards { count: cards.len() });
    }
    if cards.len() > MAX_CARDS {
        return Err(HandError::TooManyCards { count: cards.len() });
    }
    let mut seen = BTreeSet::new();
    for &c in cards {
        if !seen.insert(c) {
            return Err(HandError::DuplicateCard(c));
        }
    }
    Ok(())
}

/// Scores exactly five cards.
pub fn score_five(cards: &[Card; 5]) -> HandScore {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
    }
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high_from_mask(rank_mask);

    if let (true, Some(high)) = (flush, straight) {
        return HandScore {
            category: Category::StraightFlush,
            tiebreak: [high, 0, 0, 0, 0],
        };
    }

    // (count, rank) groups, biggest group first, then highest rank
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let mut tiebreak = [0u8; 5];
    for (slot, &(_, r)) in tiebreak.iter_mut().zip(groups.iter()) {
        *slot = r;
    }

    let top = groups[0].0;
    let second = groups.get(1).map_or(0, |g| g.0);
    let category = if top == 4 {
        Category::FourOfAKind
    } else if top == 3 && second == 2 {
        Category::FullHouse
    } else if flush {
        Category::Flush
    } else if let Some(high) = straight {
        return HandScore {
            category: Category::Straight,
            tiebreak: [high, 0, 0, 0, 0],
        };
    } else if top == 3 {
        Category::ThreeOfAKind
    } else if top == 2 && second == 2 {
        Category::TwoPair
    } else if top == 2 {
        Category::OnePair
    } else {
        Category::HighCard
    };
    HandScore { category, tiebreak }
}

/// Highest card of a five-rank run in `mask`, where bit `r` marks rank `r`.
/// The wheel (A-2-3-4-5) is the only place an Ace plays low, and counts as
/// five-high.
fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    (5..=14u8).rev().find(|&high| {
        let window = 0b11111u16 << (high - 4);
        (m & window) == window
    })
}

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CardError, GameError};

/// Represents one of the four suits in a standard 52-card deck.
/// The order is fixed (clubs lowest) and is only used for canonical display;
/// suits never decide hand strength.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

impl TryFrom<u8> for Suit {
    type Error = CardError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Suit::Clubs),
            1 => Ok(Suit::Diamonds),
            2 => Ok(Suit::Hearts),
            3 => Ok(Suit::Spades),
            _ => Err(CardError::InvalidSuit(v)),
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Discriminants are the numeric rank values (Jack = 11 .. Ace = 14).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> char {
        match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            r => char::from(b'0' + r.value()),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = CardError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            2 => Ok(Rank::Two),
            3 => Ok(Rank::Three),
            4 => Ok(Rank::Four),
            5 => Ok(Rank::Five),
            6 => Ok(Rank::Six),
            7 => Ok(Rank::Seven),
            8 => Ok(Rank::Eight),
            9 => Ok(Rank::Nine),
            10 => Ok(Rank::Ten),
            11 => Ok(Rank::Jack),
            12 => Ok(Rank::Queen),
            13 => Ok(Rank::King),
            14 => Ok(Rank::Ace),
            _ => Err(CardError::InvalidRank(v)),
        }
    }
}

/// Represents a single playing card.
///
/// Field order matters: the derived ordering compares rank first and only
/// falls back to suit between cards of equal rank.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Builds a card from raw numeric values (rank 2..=14, suit 0..=3).
    pub fn from_values(rank: u8, suit: u8) -> Result<Self, CardError> {
        Ok(Self {
            rank: Rank::try_from(rank)?,
            suit: Suit::try_from(suit)?,
        })
    }

    pub fn is_pair(&self, other: &Card) -> bool {
        self.rank == other.rank
    }

    pub fn is_suited(&self, other: &Card) -> bool {
        self.suit == other.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

/// All 52 cards, suit-major, in a fixed order.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        v.extend(one_suit(s));
    }
    v
}

/// The 13 cards of a single suit, Two through Ace.
pub fn one_suit(suit: Suit) -> Vec<Card> {
    all_ranks().iter().map(|&r| Card::new(r, suit)).collect()
}

/// A player's two hole cards, kept as `(high, low)` so that the same two
/// cards compare equal regardless of the order they were dealt in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HoleCards {
    high: Card,
    low: Card,
}

impl HoleCards {
    pub fn new(a: Card, b: Card) -> Result<Self, CardError> {
        if a == b {
            return Err(CardError::DuplicateCard(a));
        }
        let (high, low) = if a > b { (a, b) } else { (b, a) };
        Ok(Self { high, low })
    }

    pub fn high(&self) -> Card {
        self.high
    }

    pub fn low(&self) -> Card {
        self.low
    }

    pub fn cards(&self) -> [Card; 2] {
        [self.high, self.low]
    }

    pub fn is_pair(&self) -> bool {
        self.high.is_pair(&self.low)
    }

    pub fn is_suited(&self) -> bool {
        self.high.is_suited(&self.low)
    }

    /// Number of ranks strictly between the two cards; -1 for a pair.
    pub fn card_gap(&self) -> i8 {
        self.high.rank.value() as i8 - self.low.rank.value() as i8 - 1
    }

    pub fn is_connected(&self) -> bool {
        self.card_gap() == 0
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

/// Community cards. Only grows, one street at a time: three on the flop,
/// then one each on the turn and the river.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(5),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == 5
    }

    /// Deals the flop. `dead` holds every card already out in this hand
    /// (hole cards included).
    pub fn deal_flop(&mut self, flop: [Card; 3], dead: &BTreeSet<Card>) -> Result<(), GameError> {
        self.extend(0, &flop, dead)
    }

    pub fn deal_turn(&mut self, turn: Card, dead: &BTreeSet<Card>) -> Result<(), GameError> {
        self.extend(3, &[turn], dead)
    }

    pub fn deal_river(&mut self, river: Card, dead: &BTreeSet<Card>) -> Result<(), GameError> {
        self.extend(4, &[river], dead)
    }

    fn extend(
        &mut self,
        expected_len: usize,
        new: &[Card],
        dead: &BTreeSet<Card>,
    ) -> Result<(), GameError> {
        if self.cards.len() != expected_len {
            return Err(GameError::BoardOutOfOrder {
                dealt: self.cards.len(),
                requested: new.len(),
            });
        }
        let mut seen: BTreeSet<Card> = self.cards.iter().copied().collect();
        for &c in new {
            if dead.contains(&c) || !seen.insert(c) {
                return Err(CardError::DuplicateCard(c).into());
            }
        }
        self.cards.extend_from_slice(new);
        Ok(())
    }
}

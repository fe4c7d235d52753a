use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// Source of cards for a hand. The engine only consumes cards; where they
/// come from (and how they were shuffled) is up to the implementation.
pub trait Dealer {
    /// Next card, or `None` when nothing is left.
    fn deal_card(&mut self) -> Option<Card>;

    /// Discards one card before a street, as a live dealer would.
    fn burn_card(&mut self) {
        let _ = self.deal_card();
    }
}

/// Seeded, reproducible 52-card deck.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Dealer for Deck {
    fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }
}

/// Deals a fixed sequence of cards, in order, with no burns. Useful for
/// replaying a known deal.
#[derive(Debug, Clone)]
pub struct PresetDealer {
    cards: std::vec::IntoIter<Card>,
}

impl PresetDealer {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into_iter(),
        }
    }
}

impl Dealer for PresetDealer {
    fn deal_card(&mut self) -> Option<Card> {
        self.cards.next()
    }

    fn burn_card(&mut self) {}
}

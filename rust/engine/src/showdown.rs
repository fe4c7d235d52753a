use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Card, HoleCards};
use crate::errors::{GameError, HandError, PotError};
use crate::hand::{evaluate, HandScore};
use crate::player::BotId;
use crate::pot::Pot;

/// Ranks every bot's best hand on a shared board.
///
/// Bots are kept in the order they were supplied; that order is also the
/// order winners are listed in.
#[derive(Debug, Clone)]
pub struct Showdown {
    scores: Vec<(BotId, HandScore)>,
}

impl Showdown {
    pub fn new(hands: &[(BotId, HoleCards)], board: &[Card]) -> Result<Self, HandError> {
        let scores = hands
            .iter()
            .map(|(bot, hole)| {
                let mut cards = hole.cards().to_vec();
                cards.extend_from_slice(board);
                evaluate(&cards).map(|score| (bot.clone(), score))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { scores })
    }

    pub fn score(&self, bot: &str) -> Option<HandScore> {
        self.scores
            .iter()
            .find(|(id, _)| id == bot)
            .map(|(_, score)| *score)
    }

    /// Every bot holding the best hand; more than one means a split.
    pub fn winners(&self) -> Vec<BotId> {
        self.winners_among(|_| true)
    }

    fn winners_among(&self, include: impl Fn(&str) -> bool) -> Vec<BotId> {
        let best = self
            .scores
            .iter()
            .filter(|(id, _)| include(id))
            .map(|(_, s)| *s)
            .max();
        self.scores
            .iter()
            .filter(|(id, s)| include(id) && Some(*s) == best)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// Who won one pot and what each winner takes from it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotAward {
    pub amount: u32,
    pub winners: Vec<BotId>,
    pub shares: Vec<(BotId, u32)>,
}

/// Splits `amount` evenly; the remainder goes out one chip at a time in
/// `winners` order.
pub fn split_pot(amount: u32, winners: &[BotId]) -> Vec<(BotId, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u32;
    let (each, remainder) = (amount / n, amount % n);
    winners
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let odd_chip = u32::from((i as u32) < remainder);
            (w.clone(), each + odd_chip)
        })
        .collect()
}

/// Awards each pot to the best eligible hand(s).
///
/// `hands` holds the bots still in the hand, in the canonical order used for
/// odd chips (first seat left of the button first). Bots missing from
/// `hands` are treated as folded.
pub fn resolve(
    hands: &[(BotId, HoleCards)],
    board: &[Card],
    pots: &[Pot],
) -> Result<Vec<PotAward>, GameError> {
    if let [(only, _)] = hands {
        return Ok(award_uncontested(only, pots));
    }
    let showdown = Showdown::new(hands, board)?;
    pots.iter()
        .map(|pot| {
            let winners = showdown.winners_among(|id| pot.eligible.contains(id));
            if winners.is_empty() {
                return Err(PotError::NoEligiblePlayers { amount: pot.amount }.into());
            }
            debug!(amount = pot.amount, winners = ?winners, "pot awarded");
            Ok(PotAward {
                amount: pot.amount,
                shares: split_pot(pot.amount, &winners),
                winners,
            })
        })
        .collect()
}

/// The last player left wins every pot without showing.
pub fn award_uncontested(winner: &str, pots: &[Pot]) -> Vec<PotAward> {
    pots.iter()
        .map(|pot| PotAward {
            amount: pot.amount,
            winners: vec![winner.to_string()],
            shares: vec![(winner.to_string(), pot.amount)],
        })
        .collect()
}

/// Sums each bot's shares across all awards.
pub fn winnings(awards: &[PotAward]) -> BTreeMap<BotId, u32> {
    let mut totals = BTreeMap::new();
    for (bot, share) in awards.iter().flat_map(|a| a.shares.iter()) {
        *totals.entry(bot.clone()).or_insert(0) += *share;
    }
    totals
}

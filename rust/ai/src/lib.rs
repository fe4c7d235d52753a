//! # pokeher-ai: Bots for the hand engine
//!
//! Decision sources that plug into the engine's
//! [`ActionSource`](pokeher_engine::source::ActionSource) seam. Each bot
//! sees only the [`ActionRequest`] the engine builds for it.
//!
//! ## Core Components
//!
//! - [`Bot`] - A named action source
//! - [`BotTable`] - Routes each request to the bot sitting in that seat
//! - [`baseline`] - Rule-based bot using hand strength and pot odds
//! - [`simple`] - Calling station and seeded random bot
//! - [`create_bot`] - Factory by type string
//!
//! ## Quick Start
//!
//! ```rust
//! use pokeher_ai::{create_bot, BotTable};
//! use pokeher_engine::deck::Deck;
//! use pokeher_engine::engine::{HandConfig, PokerHand};
//! use pokeher_engine::player::Seat;
//! use pokeher_engine::policy::Blinds;
//! use std::collections::BTreeMap;
//!
//! let mut table = BotTable::new();
//! table.seat("bot_0", create_bot("baseline", 1).unwrap());
//! table.seat("bot_1", create_bot("station", 2).unwrap());
//!
//! let seats = vec![Seat::new("bot_0", 1000), Seat::new("bot_1", 1000)];
//! let mut hand = PokerHand::new(seats, HandConfig::new(Blinds::new(10, 20))).unwrap();
//! let mut deck = Deck::new_with_seed(42);
//! deck.shuffle();
//!
//! let outcome = hand.play(&mut deck, &mut table, &mut BTreeMap::<String, i64>::new()).unwrap();
//! assert_eq!(outcome.deltas.values().sum::<i64>(), 0);
//! ```

use std::collections::BTreeMap;

use pokeher_engine::player::{Action, BotId};
use pokeher_engine::source::{ActionRequest, ActionSource};
use thiserror::Error;
use tracing::warn;

pub mod baseline;
pub mod simple;

/// A decision source with a display name.
pub trait Bot: ActionSource + Send {
    fn name(&self) -> &str;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BotError {
    #[error("Unknown bot type: {0} (expected baseline, station, or random)")]
    UnknownType(String),
}

/// Bot type names accepted by [`create_bot`].
pub const BOT_TYPES: [&str; 3] = ["baseline", "station", "random"];

/// Builds a bot by type string. `seed` only matters for bots that use
/// randomness.
///
/// # Example
///
/// ```rust
/// use pokeher_ai::create_bot;
///
/// let bot = create_bot("baseline", 0).unwrap();
/// assert_eq!(bot.name(), "BaselineAI");
/// assert!(create_bot("shark", 0).is_err());
/// ```
pub fn create_bot(kind: &str, seed: u64) -> Result<Box<dyn Bot>, BotError> {
    match kind {
        "baseline" => Ok(Box::new(baseline::BaselineAI::new())),
        "station" => Ok(Box::new(simple::CallingStation)),
        "random" => Ok(Box::new(simple::RandomBot::new(seed))),
        other => Err(BotError::UnknownType(other.to_string())),
    }
}

/// One bot per seat. Requests for an empty seat are answered with a fold.
#[derive(Default)]
pub struct BotTable {
    bots: BTreeMap<BotId, Box<dyn Bot>>,
}

impl BotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seat(&mut self, id: impl Into<BotId>, bot: Box<dyn Bot>) {
        self.bots.insert(id.into(), bot);
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.bots.get(id).map(|b| b.name())
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

impl ActionSource for BotTable {
    fn get_action(&mut self, request: &ActionRequest) -> Action {
        match self.bots.get_mut(&request.player_id) {
            Some(bot) => bot.get_action(request),
            None => {
                warn!(player = %request.player_id, "no bot in seat, folding");
                Action::Fold
            }
        }
    }
}

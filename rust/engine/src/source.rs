//! Boundaries between the hand engine and the outside world: where bot
//! decisions come from and where chip results go.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cards::{Card, HoleCards};
use crate::logger::Street;
use crate::player::{Action, BotId};

/// Everything a bot is told when it is asked to act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub player_id: BotId,
    pub street: Street,
    pub hole: Option<HoleCards>,
    pub board: Vec<Card>,
    /// All chips committed this hand
    pub pot: u32,
    pub stack: u32,
    pub current_bet: u32,
    pub to_call: u32,
    pub min_raise_to: u32,
    pub max_raise_to: u32,
    /// False when only call or fold is open (after a short all-in)
    pub may_raise: bool,
}

impl ActionRequest {
    /// Round total the player reaches by pushing every chip in.
    pub fn all_in_to(&self) -> u32 {
        self.current_bet
            .saturating_sub(self.to_call)
            .saturating_add(self.stack)
    }
}

/// Supplies bot decisions. Implementations own any timing policy: a source
/// that runs out of time returns its own default (typically a fold).
pub trait ActionSource {
    fn get_action(&mut self, request: &ActionRequest) -> Action;
}

/// Receives each player's net chip result when a hand is settled.
pub trait Ledger {
    fn record(&mut self, player: &str, delta: i64);
}

impl Ledger for BTreeMap<BotId, i64> {
    fn record(&mut self, player: &str, delta: i64) {
        *self.entry(player.to_string()).or_insert(0) += delta;
    }
}

/// Plays back a fixed list of actions. Each bot consumes its own actions in
/// order; a bot with nothing left folds.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    scripts: BTreeMap<BotId, VecDeque<Action>>,
}

impl ScriptedSource {
    pub fn new<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = (S, Action)>,
        S: Into<BotId>,
    {
        let mut scripts: BTreeMap<BotId, VecDeque<Action>> = BTreeMap::new();
        for (bot, action) in actions {
            scripts.entry(bot.into()).or_default().push_back(action);
        }
        Self { scripts }
    }

    /// Actions not yet played.
    pub fn remaining(&self) -> usize {
        self.scripts.values().map(VecDeque::len).sum()
    }
}

impl ActionSource for ScriptedSource {
    fn get_action(&mut self, request: &ActionRequest) -> Action {
        match self
            .scripts
            .get_mut(&request.player_id)
            .and_then(VecDeque::pop_front)
        {
            Some(action) => action,
            None => {
                warn!(player = %request.player_id, "script exhausted, folding");
                Action::Fold
            }
        }
    }
}

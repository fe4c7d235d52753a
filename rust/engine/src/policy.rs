//! Table rules the orchestrator is composed from: betting limit, blind
//! schedule, and what to do with an illegal action. Each is picked by
//! configuration and can be tested on its own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::player::BetState;
use crate::rules::BetContext;

/// Caps how far a player may raise.
pub trait BetLimit: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Largest total contribution for this round the player may raise to.
    fn max_raise_to(&self, ctx: &BetContext, player: &BetState) -> u32;
}

/// No-limit: anything up to the whole stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoLimit;

impl BetLimit for NoLimit {
    fn name(&self) -> &'static str {
        "no-limit"
    }

    fn max_raise_to(&self, _ctx: &BetContext, player: &BetState) -> u32 {
        player.contributed_this_round.saturating_add(player.stack)
    }
}

/// Pot-limit: the raise may be at most the pot after calling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PotLimit;

impl BetLimit for PotLimit {
    fn name(&self) -> &'static str {
        "pot-limit"
    }

    fn max_raise_to(&self, ctx: &BetContext, player: &BetState) -> u32 {
        let to_call = ctx.to_call(player);
        let cap = ctx
            .current_bet
            .saturating_add(ctx.pot)
            .saturating_add(to_call);
        cap.min(player.contributed_this_round.saturating_add(player.stack))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LimitKind {
    NoLimit,
    PotLimit,
}

impl LimitKind {
    pub fn policy(self) -> Box<dyn BetLimit> {
        match self {
            LimitKind::NoLimit => Box::new(NoLimit),
            LimitKind::PotLimit => Box::new(PotLimit),
        }
    }
}

impl FromStr for LimitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "no-limit" | "nolimit" | "nl" => Ok(LimitKind::NoLimit),
            "pot-limit" | "potlimit" | "pl" => Ok(LimitKind::PotLimit),
            other => Err(format!("unknown betting limit: {}", other)),
        }
    }
}

/// Forced bets for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blinds {
    pub small: u32,
    pub big: u32,
}

impl Blinds {
    pub const fn new(small: u32, big: u32) -> Self {
        Self { small, big }
    }
}

/// Chooses the blinds for the n-th hand of a match (0-based).
pub trait BlindSchedule: fmt::Debug + Send + Sync {
    fn blinds_for_hand(&self, hand_number: u64) -> Blinds;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBlinds(pub Blinds);

impl BlindSchedule for FixedBlinds {
    fn blinds_for_hand(&self, _hand_number: u64) -> Blinds {
        self.0
    }
}

const LEVELS: [Blinds; 10] = [
    Blinds::new(10, 20),
    Blinds::new(15, 30),
    Blinds::new(25, 50),
    Blinds::new(50, 100),
    Blinds::new(75, 150),
    Blinds::new(100, 200),
    Blinds::new(150, 300),
    Blinds::new(200, 400),
    Blinds::new(300, 600),
    Blinds::new(400, 800),
];

/// Blinds for a 1-based tournament level; levels past the table stay at
/// the last entry.
pub fn blinds_for_level(level: u8) -> Blinds {
    let idx = (level.max(1) as usize - 1).min(LEVELS.len() - 1);
    LEVELS[idx]
}

/// Blinds that step up through the level table every `hands_per_level` hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSchedule {
    pub hands_per_level: u64,
}

impl BlindSchedule for LevelSchedule {
    fn blinds_for_hand(&self, hand_number: u64) -> Blinds {
        let level = hand_number / self.hands_per_level.max(1) + 1;
        blinds_for_level(level.min(u8::MAX as u64) as u8)
    }
}

/// What the orchestrator does when a bot submits an illegal action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IllegalActionPolicy {
    /// Abort the hand and hand the error to the caller.
    #[default]
    Reject,
    /// Treat the action as a fold and keep playing.
    Fold,
}

impl FromStr for IllegalActionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(IllegalActionPolicy::Reject),
            "fold" => Ok(IllegalActionPolicy::Fold),
            other => Err(format!("unknown illegal-action policy: {}", other)),
        }
    }
}

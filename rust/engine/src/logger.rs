use std::collections::BTreeMap;
use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::Category;
use crate::player::{Action, BotId};
use crate::policy::Blinds;
use crate::pot::Pot;

/// Represents a betting street in Texas Hold'em poker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    /// Board size once this street's cards are out.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(name)
    }
}

/// Records a single player action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: BotId,
    pub street: Street,
    pub action: Action,
    /// Chips the action actually put in
    pub moved: u32,
}

/// One revealed hand at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShownHand {
    pub player_id: BotId,
    pub cards: Vec<Card>,
    pub category: Category,
}

/// Information about the showdown phase when hands are revealed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Winners of the main pot
    pub winners: Vec<BotId>,
    pub hands: Vec<ShownHand>,
    /// Optional notes about the showdown (e.g., "split pot")
    #[serde(default)]
    pub notes: Option<String>,
}

/// Complete record of a poker hand including all actions, board cards, and outcome.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// RNG seed used for deck shuffling, when the deal came from a seeded deck
    #[serde(default)]
    pub seed: Option<u64>,
    pub button: BotId,
    pub blinds: Blinds,
    /// Chronological list of all player actions (blinds excluded)
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    pub pots: Vec<Pot>,
    /// Net chips won or lost per player; sums to zero
    pub deltas: BTreeMap<BotId, i64>,
    /// Showdown information if hand went to showdown
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl HandRecord {
    /// Serializes as one JSON line, stamping the time if it is missing.
    pub fn to_jsonl(&self) -> serde_json::Result<String> {
        let mut rec = self.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        serde_json::to_string(&rec)
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Hands out sequential hand ids for one day.
#[derive(Debug, Clone)]
pub struct HandIds {
    date: String,
    seq: u32,
}

impl HandIds {
    pub fn today() -> Self {
        Self::for_date(&Utc::now().format("%Y%m%d").to_string())
    }

    pub fn for_date(date: &str) -> Self {
        Self {
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }
}

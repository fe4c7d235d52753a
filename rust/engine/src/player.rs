use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier a bot is known by at the table (e.g. `bot_0`).
pub type BotId = String;

/// An action submitted by a bot on its turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum Action {
    /// Fold and forfeit the hand
    Fold,
    /// Pass without betting (only valid with nothing to call)
    Check,
    /// Match the current bet. The amount is what the bot believes it owes;
    /// the chips moved are always the real shortfall, capped by the stack.
    Call(u32),
    /// Raise the round's bet to this total
    Raise(u32),
    /// Commit every remaining chip
    AllIn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call(n) => write!(f, "call {}", n),
            Action::Raise(n) => write!(f, "raise {}", n),
            Action::AllIn => write!(f, "all-in"),
        }
    }
}

/// A bot sitting down for one hand with the chips it brings.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: BotId,
    pub stack: u32,
}

impl Seat {
    pub fn new(id: impl Into<BotId>, stack: u32) -> Self {
        Self {
            id: id.into(),
            stack,
        }
    }
}

/// Per-hand betting state of one player.
///
/// `stack + contributed_total` stays equal to the starting stack until
/// winnings are paid out.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BetState {
    pub player_id: BotId,
    pub stack: u32,
    pub contributed_this_round: u32,
    pub contributed_total: u32,
    pub is_folded: bool,
    pub is_all_in: bool,
}

impl BetState {
    pub fn new(player_id: impl Into<BotId>, stack: u32) -> Self {
        Self {
            player_id: player_id.into(),
            stack,
            contributed_this_round: 0,
            contributed_total: 0,
            is_folded: false,
            is_all_in: false,
        }
    }

    /// Moves up to `amount` chips from the stack into the pot and returns
    /// how many actually moved. Emptying the stack marks the player all-in.
    pub fn contribute(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.stack);
        self.stack -= moved;
        self.contributed_this_round += moved;
        self.contributed_total += moved;
        if self.stack == 0 && moved > 0 {
            self.is_all_in = true;
        }
        moved
    }

    /// Still contesting the pot.
    pub fn is_live(&self) -> bool {
        !self.is_folded
    }

    /// Still able to make betting decisions.
    pub fn can_act(&self) -> bool {
        !self.is_folded && !self.is_all_in
    }

    pub fn start_round(&mut self) {
        self.contributed_this_round = 0;
    }
}

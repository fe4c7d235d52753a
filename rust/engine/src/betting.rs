use tracing::debug;

use crate::errors::IllegalAction;
use crate::player::{Action, BetState};
use crate::policy::BetLimit;
use crate::rules::{validate_action, BetContext, ValidatedAction};

/// Where a betting round stands. Seats index the slice of [`BetState`]s the
/// round was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    AwaitingAction(usize),
    RoundComplete,
    /// Everyone but `winner` folded; the hand ends without further streets.
    HandTerminated { winner: usize },
}

/// Result of applying one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub action: ValidatedAction,
    /// Chips that went from the stack into the pot
    pub moved: u32,
    pub state: RoundState,
}

/// One street of betting.
///
/// The round borrows nothing: the caller owns the player states and passes
/// them to every call, so the same slice must be used for the whole round.
/// Blinds are contributions already made before the round is created.
#[derive(Debug, Clone)]
pub struct BettingRound {
    current_bet: u32,
    min_raise: u32,
    /// Seats that still owe a decision this round
    pending: Vec<bool>,
    /// Cleared for seats that already acted and then faced only a short all-in
    may_raise: Vec<bool>,
    state: RoundState,
}

impl BettingRound {
    pub fn new(players: &[BetState], first_to_act: usize, big_blind: u32) -> Self {
        let current_bet = players
            .iter()
            .map(|p| p.contributed_this_round)
            .max()
            .unwrap_or(0);
        let mut round = Self {
            current_bet,
            min_raise: big_blind.max(1),
            pending: players.iter().map(BetState::can_act).collect(),
            may_raise: vec![true; players.len()],
            state: RoundState::RoundComplete,
        };
        round.advance(players, first_to_act);
        round
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }

    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }

    pub fn context(&self, players: &[BetState]) -> BetContext {
        BetContext {
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            pot: players
                .iter()
                .map(|p| p.contributed_total)
                .fold(0, u32::saturating_add),
        }
    }

    pub fn may_raise(&self, seat: usize) -> bool {
        self.may_raise.get(seat).copied().unwrap_or(false)
    }

    /// Validates and applies `action` for the player at `seat`.
    ///
    /// Nothing changes when the action is illegal.
    pub fn apply(
        &mut self,
        players: &mut [BetState],
        seat: usize,
        action: Action,
        limit: &dyn BetLimit,
    ) -> Result<Applied, IllegalAction> {
        let Some(player) = players.get(seat) else {
            return Err(IllegalAction::UnknownPlayer(format!("seat {}", seat)));
        };
        match self.state {
            RoundState::AwaitingAction(expected) if expected == seat => {}
            RoundState::AwaitingAction(expected) => {
                return Err(IllegalAction::NotPlayersTurn {
                    expected: players[expected].player_id.clone(),
                    actual: player.player_id.clone(),
                });
            }
            _ => return Err(IllegalAction::RoundOver),
        }

        let ctx = self.context(players);
        let validated = validate_action(&ctx, limit, player, self.may_raise[seat], action)?;
        let player = &mut players[seat];
        let moved = match validated {
            ValidatedAction::Fold => {
                player.is_folded = true;
                0
            }
            ValidatedAction::Check => 0,
            ValidatedAction::Call(amount) | ValidatedAction::AllIn(amount) => {
                player.contribute(amount)
            }
            ValidatedAction::Raise { to } => player.contribute(to - player.contributed_this_round),
        };
        let new_level = player.contributed_this_round;
        debug!(
            player = %player.player_id,
            action = %action,
            moved,
            stack = player.stack,
            "action applied"
        );

        self.pending[seat] = false;
        if new_level > self.current_bet {
            let increment = new_level - self.current_bet;
            let full_raise = increment >= self.min_raise;
            if full_raise {
                self.min_raise = increment;
            }
            self.current_bet = new_level;
            self.reopen(players, seat, full_raise);
        }
        self.advance(players, seat + 1);

        Ok(Applied {
            action: validated,
            moved,
            state: self.state,
        })
    }

    /// Everyone else who can still act owes a response to the new bet. Only
    /// a full raise lets players who already acted raise again.
    fn reopen(&mut self, players: &[BetState], raiser: usize, full_raise: bool) {
        for (i, p) in players.iter().enumerate() {
            if i == raiser || !p.can_act() {
                continue;
            }
            if full_raise {
                self.may_raise[i] = true;
            } else if !self.pending[i] {
                self.may_raise[i] = false;
            }
            self.pending[i] = true;
        }
    }

    /// Moves to the next seat (starting at `from`, wrapping) that still owes
    /// a decision, or ends the round.
    fn advance(&mut self, players: &[BetState], from: usize) {
        let live: Vec<usize> = (0..players.len())
            .filter(|&i| players[i].is_live())
            .collect();
        if live.len() == 1 {
            self.state = RoundState::HandTerminated { winner: live[0] };
            return;
        }

        for (i, p) in players.iter().enumerate() {
            if !p.can_act() {
                self.pending[i] = false;
            }
        }
        // a lone player with chips and nothing to call has nobody to bet against
        let actors: Vec<usize> = (0..players.len())
            .filter(|&i| players[i].can_act())
            .collect();
        if let [only] = actors[..] {
            if players[only].contributed_this_round >= self.current_bet {
                self.pending[only] = false;
            }
        }

        let n = players.len();
        self.state = (0..n)
            .map(|k| (from + k) % n.max(1))
            .find(|&i| self.pending[i])
            .map_or(RoundState::RoundComplete, RoundState::AwaitingAction);
    }
}

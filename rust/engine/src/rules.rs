use serde::{Deserialize, Serialize};

use crate::errors::IllegalAction;
use crate::player::{Action as A, BetState};
use crate::policy::BetLimit;

/// An action after legality checks, carrying the chips it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips moved to match the bet (0 when nothing was owed)
    Call(u32),
    /// New bet-to-call for the round
    Raise { to: u32 },
    /// Whole remaining stack
    AllIn(u32),
}

/// What the betting round looks like to the player about to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetContext {
    /// Highest `contributed_this_round` at the table
    pub current_bet: u32,
    /// Smallest legal raise increment: the big blind or the last full raise
    pub min_raise: u32,
    /// All chips committed this hand, every street included
    pub pot: u32,
}

impl BetContext {
    pub fn to_call(&self, player: &BetState) -> u32 {
        self.current_bet.saturating_sub(player.contributed_this_round)
    }

    pub fn min_raise_to(&self) -> u32 {
        self.current_bet.saturating_add(self.min_raise)
    }
}

/// Validates a player action according to betting rules and stack size.
///
/// Converts an [`crate::player::Action`] into a [`ValidatedAction`]. Calls
/// larger than the stack and raises that need the whole stack become
/// [`ValidatedAction::AllIn`]; everything else that breaks a rule is
/// reported and never reinterpreted.
///
/// `may_raise` is false for a player who already acted and has since only
/// faced an all-in too small to count as a full raise.
///
/// # Errors
///
/// - [`IllegalAction::PlayerFolded`] / [`IllegalAction::PlayerAllIn`] - the player can no longer act
/// - [`IllegalAction::CannotCheck`] - check while facing a bet
/// - [`IllegalAction::RaiseTooSmall`] - raise below the minimum increment
/// - [`IllegalAction::RaiseTooLarge`] - raise above what the limit policy allows
/// - [`IllegalAction::ActionNotReopened`] - raise when only call or fold is open
///
/// # Examples
///
/// ```
/// use pokeher_engine::player::{Action, BetState};
/// use pokeher_engine::policy::NoLimit;
/// use pokeher_engine::rules::{validate_action, BetContext, ValidatedAction};
///
/// let ctx = BetContext { current_bet: 50, min_raise: 50, pot: 75 };
/// let player = BetState::new("bot_0", 1000);
///
/// let call = validate_action(&ctx, &NoLimit, &player, true, Action::Call(50));
/// assert_eq!(call, Ok(ValidatedAction::Call(50)));
///
/// let short = BetState::new("bot_1", 30);
/// let all_in = validate_action(&ctx, &NoLimit, &short, true, Action::Call(50));
/// assert_eq!(all_in, Ok(ValidatedAction::AllIn(30)));
/// ```
pub fn validate_action(
    ctx: &BetContext,
    limit: &dyn BetLimit,
    player: &BetState,
    may_raise: bool,
    action: A,
) -> Result<ValidatedAction, IllegalAction> {
    if player.is_folded {
        return Err(IllegalAction::PlayerFolded(player.player_id.clone()));
    }
    if player.is_all_in {
        return Err(IllegalAction::PlayerAllIn(player.player_id.clone()));
    }
    let to_call = ctx.to_call(player);
    let all_in_to = player.contributed_this_round.saturating_add(player.stack);

    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(IllegalAction::CannotCheck { to_call })
            }
        }
        A::Call(_) => {
            if player.stack <= to_call {
                Ok(ValidatedAction::AllIn(player.stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::Raise(to) => {
            if to <= ctx.current_bet {
                return Err(IllegalAction::RaiseTooSmall {
                    amount: to,
                    minimum: ctx.min_raise_to().min(all_in_to),
                });
            }
            if !may_raise && all_in_to > ctx.current_bet {
                return Err(IllegalAction::ActionNotReopened(player.player_id.clone()));
            }
            let max_to = limit.max_raise_to(ctx, player);
            if to >= all_in_to && max_to >= all_in_to {
                return Ok(ValidatedAction::AllIn(player.stack));
            }
            if to > max_to {
                return Err(IllegalAction::RaiseTooLarge {
                    amount: to,
                    maximum: max_to,
                });
            }
            if to < ctx.min_raise_to() {
                return Err(IllegalAction::RaiseTooSmall {
                    amount: to,
                    minimum: ctx.min_raise_to(),
                });
            }
            Ok(ValidatedAction::Raise { to })
        }
        A::AllIn => {
            if all_in_to > ctx.current_bet {
                if !may_raise {
                    return Err(IllegalAction::ActionNotReopened(player.player_id.clone()));
                }
                let max_to = limit.max_raise_to(ctx, player);
                if all_in_to > max_to {
                    return Err(IllegalAction::RaiseTooLarge {
                        amount: all_in_to,
                        maximum: max_to,
                    });
                }
            }
            Ok(ValidatedAction::AllIn(player.stack))
        }
    }
}

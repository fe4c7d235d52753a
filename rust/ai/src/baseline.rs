//! Baseline bot for simulations.
//!
//! A simple rule-based opponent used for testing and benchmarking. It
//! rates its hand on a 0-10 scale and maps that rating, the price to call,
//! and the pot to an action.

use pokeher_engine::cards::{Card, HoleCards, Rank};
use pokeher_engine::hand::{Category, evaluate};
use pokeher_engine::logger::Street;
use pokeher_engine::player::Action;
use pokeher_engine::source::{ActionRequest, ActionSource};

use crate::Bot;

/// Deterministic rule-based bot.
///
/// # Strategy
///
/// **Preflop:**
/// - Strong hands (high pairs 77+, AK, AQ): Raise or call
/// - Medium hands (suited connectors, Ax, small pairs): Call if cheap
/// - Weak hands: Fold to raises, check if free
///
/// **Postflop:**
/// - Strong hands (Two Pair+): Bet or call
/// - Medium hands (One Pair): Check or call small bets
/// - Draws and weak hands: Calculate pot odds, fold if unfavorable
///
/// Raise sizes are turned into raise-to totals and clamped to what the
/// request allows, so the bot never submits an illegal raise.
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    /// Preflop hand strength on a scale of 0-10.
    ///
    /// - 9-10: Premium hands (AA, KK, QQ, JJ, AKs)
    /// - 7-8: Strong hands (TT-99, AK, AQ, KQs)
    /// - 5-6: Medium hands (88-77, AJ, suited connectors)
    /// - 3-4: Marginal hands (66-22, Ax, suited cards)
    /// - 0-2: Weak hands (offsuit low cards)
    fn preflop_strength(hole: &HoleCards) -> u8 {
        let high = hole.high().rank.value();
        let low = hole.low().rank.value();
        let suited = hole.is_suited();
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if hole.is_pair() {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            _ => {
                if suited && hole.card_gap() <= 2 {
                    if high >= 9 { 5 } else { 4 }
                } else if high >= 11 && low >= 9 {
                    4
                } else {
                    2
                }
            }
        }
    }

    /// Postflop strength from the best hand on the current board, or
    /// `None` before the flop.
    fn postflop_strength(hole: &HoleCards, board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }
        let mut cards = hole.cards().to_vec();
        cards.extend_from_slice(board);
        let score = evaluate(&cards).ok()?;

        let base = match score.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush => 10,
        };
        let kicker_boost = u8::from(score.tiebreak[0] >= Rank::Queen.value());
        Some((base + kicker_boost).min(10))
    }

    /// pot / (pot + call); 1.0 when calling is free.
    fn pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + to_call) as f32
    }

    fn strength(request: &ActionRequest) -> Option<u8> {
        let hole = request.hole.as_ref()?;
        let strength = match request.street {
            Street::Preflop => Self::preflop_strength(hole),
            _ => Self::postflop_strength(hole, &request.board)
                .unwrap_or_else(|| Self::preflop_strength(hole)),
        };
        Some(strength)
    }

    fn decide(strength: u8, req: &ActionRequest) -> Action {
        if req.to_call == 0 {
            return match strength {
                9..=10 => raise_by(req, req.pot * 2 / 3),
                7..=8 => raise_by(req, req.pot / 2),
                _ => Action::Check,
            };
        }

        // Can't cover the call: all-in or fold
        if req.to_call >= req.stack {
            return if strength >= 7 {
                Action::AllIn
            } else {
                Action::Fold
            };
        }

        let odds = Self::pot_odds(req.pot, req.to_call);
        match strength {
            9..=10 => raise_by(req, req.pot / 2),
            7..=8 => Action::Call(req.to_call),
            5..=6 if odds >= 0.3 || req.to_call <= req.pot / 4 => Action::Call(req.to_call),
            3..=4 if odds >= 0.4 || req.to_call <= req.pot / 6 => Action::Call(req.to_call),
            _ => Action::Fold,
        }
    }
}

/// Raises the bet by about `increment`, within the request's bounds; falls
/// back to check or call when raising is closed.
fn raise_by(req: &ActionRequest, increment: u32) -> Action {
    let passive = if req.to_call == 0 {
        Action::Check
    } else {
        Action::Call(req.to_call)
    };
    if !req.may_raise || req.max_raise_to <= req.current_bet {
        return passive;
    }
    if req.max_raise_to < req.min_raise_to {
        // only an all-in short of a full raise is left
        return if req.max_raise_to == req.all_in_to() {
            Action::AllIn
        } else {
            passive
        };
    }
    let to = (req.current_bet + increment)
        .max(req.min_raise_to)
        .min(req.max_raise_to);
    Action::Raise(to)
}

impl ActionSource for BaselineAI {
    fn get_action(&mut self, request: &ActionRequest) -> Action {
        match Self::strength(request) {
            Some(strength) => Self::decide(strength, request),
            // No hole cards, default to check/fold
            None if request.to_call == 0 => Action::Check,
            None => Action::Fold,
        }
    }
}

impl Bot for BaselineAI {
    fn name(&self) -> &str {
        "BaselineAI"
    }
}

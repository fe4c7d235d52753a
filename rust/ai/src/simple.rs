//! Bots with no hand reading at all.

use pokeher_engine::player::Action;
use pokeher_engine::source::{ActionRequest, ActionSource};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::Bot;

/// Never folds, never raises.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingStation;

impl ActionSource for CallingStation {
    fn get_action(&mut self, request: &ActionRequest) -> Action {
        if request.to_call == 0 {
            Action::Check
        } else {
            Action::Call(request.to_call)
        }
    }
}

impl Bot for CallingStation {
    fn name(&self) -> &str {
        "CallingStation"
    }
}

/// Picks among the legal actions at random. Seeded, so a simulation can be
/// replayed.
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: ChaCha20Rng,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    fn random_raise(&mut self, req: &ActionRequest) -> Option<Action> {
        if !req.may_raise || req.max_raise_to <= req.current_bet {
            return None;
        }
        if req.max_raise_to < req.min_raise_to {
            return (req.max_raise_to == req.all_in_to()).then_some(Action::AllIn);
        }
        let to = self.rng.random_range(req.min_raise_to..=req.max_raise_to);
        Some(Action::Raise(to))
    }
}

impl ActionSource for RandomBot {
    fn get_action(&mut self, request: &ActionRequest) -> Action {
        let roll: u8 = self.rng.random_range(0..100);
        let passive = if request.to_call == 0 {
            Action::Check
        } else {
            Action::Call(request.to_call)
        };
        match roll {
            0..=19 if request.to_call > 0 => Action::Fold,
            80..=99 => self.random_raise(request).unwrap_or(passive),
            _ => passive,
        }
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        "RandomBot"
    }
}

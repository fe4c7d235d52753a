use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::PotError;
use crate::player::{BetState, BotId};

/// Chips that can only be won by the players in `eligible`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    pub eligible: BTreeSet<BotId>,
}

/// The hand's contributions split into a main pot and side pots.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotBreakdown {
    /// Main pot first, then side pots in ascending cap order
    pub pots: Vec<Pot>,
    /// Chips nobody left in the hand could win, handed back to the one
    /// folded player who put them in
    pub returned: Vec<(BotId, u32)>,
}

impl PotBreakdown {
    pub fn main_pot(&self) -> u32 {
        self.pots.first().map_or(0, |p| p.amount)
    }

    pub fn side_pots(&self) -> Vec<u32> {
        self.pots.iter().skip(1).map(|p| p.amount).collect()
    }

    pub fn total(&self) -> u64 {
        let pots: u64 = self.pots.iter().map(|p| p.amount as u64).sum();
        let returned: u64 = self.returned.iter().map(|(_, a)| *a as u64).sum();
        pots + returned
    }
}

/// Partitions every player's `contributed_total` into pots.
///
/// Caps are the distinct all-in totals plus the largest contribution. The
/// layer between two caps holds what each player put in between them, and
/// is open to the non-folded players whose total reached the upper cap.
/// Folded players' chips stay in whatever layers they reached.
///
/// A layer that only folded players reached moves up into the next layer.
/// If it is the last one it goes back to its funder when there is exactly
/// one, otherwise into the highest pot.
pub fn build_pots(players: &[BetState]) -> Result<PotBreakdown, PotError> {
    let mut caps: BTreeSet<u32> = players
        .iter()
        .filter(|p| p.is_all_in && p.contributed_total > 0)
        .map(|p| p.contributed_total)
        .collect();
    if let Some(top) = players.iter().map(|p| p.contributed_total).max() {
        if top > 0 {
            caps.insert(top);
        }
    }

    let mut breakdown = PotBreakdown::default();
    let mut prev = 0u32;
    let mut carry = 0u32;
    let mut carry_funders: BTreeSet<BotId> = BTreeSet::new();

    for cap in caps {
        let amount = players
            .iter()
            .map(|p| p.contributed_total.min(cap) - p.contributed_total.min(prev))
            .fold(0u32, u32::saturating_add);
        let eligible: BTreeSet<BotId> = players
            .iter()
            .filter(|p| p.is_live() && p.contributed_total >= cap)
            .map(|p| p.player_id.clone())
            .collect();
        let funders = players
            .iter()
            .filter(|p| p.contributed_total > prev)
            .map(|p| p.player_id.clone())
            .collect::<Vec<_>>();
        prev = cap;

        if eligible.is_empty() {
            carry = carry.saturating_add(amount);
            carry_funders.extend(funders);
            continue;
        }
        breakdown.pots.push(Pot {
            amount: amount.saturating_add(carry),
            eligible,
        });
        carry = 0;
        carry_funders.clear();
    }

    if carry > 0 {
        if carry_funders.len() == 1 {
            let funder = carry_funders.into_iter().next().unwrap_or_default();
            breakdown.returned.push((funder, carry));
        } else if let Some(last) = breakdown.pots.last_mut() {
            last.amount = last.amount.saturating_add(carry);
        } else {
            return Err(PotError::NoEligiblePlayers { amount: carry });
        }
    }

    let contributions: u64 = players.iter().map(|p| p.contributed_total as u64).sum();
    check_conservation(breakdown.total(), contributions)?;
    Ok(breakdown)
}

/// Fails when the chips held by pots differ from what players put in.
pub fn check_conservation(pots: u64, contributions: u64) -> Result<(), PotError> {
    if pots != contributions {
        error!(pots, contributions, "pot accounting invariant violated");
        return Err(PotError::InvariantViolated {
            pots,
            contributions,
        });
    }
    Ok(())
}

/// Total chips each player put into the hand.
pub fn contributions(players: &[BetState]) -> BTreeMap<BotId, u32> {
    players
        .iter()
        .map(|p| (p.player_id.clone(), p.contributed_total))
        .collect()
}

//! Simulation command handler.
//!
//! Seats a table of bots and plays a run of hands between them. Chips carry
//! over from hand to hand, the button moves one seat each hand, and a bot
//! that busts sits out the rest of the run.
//!
//! # Examples
//!
//! ```no_run
//! use pokeher_cli::commands::sim::{handle_sim_command, SimArgs};
//! use std::io;
//!
//! let args = SimArgs {
//!     hands: 100,
//!     bots: vec!["baseline".into(), "random".into()],
//!     seed: Some(42),
//!     stack: None,
//!     json: false,
//! };
//! handle_sim_command(&args, &mut io::stdout(), &mut io::stderr()).unwrap();
//! ```

use std::collections::BTreeMap;
use std::io::Write;

use pokeher_ai::{BotTable, create_bot};
use pokeher_engine::deck::Deck;
use pokeher_engine::engine::{HandConfig, HandOutcome, PokerHand};
use pokeher_engine::logger::HandIds;
use pokeher_engine::player::{BotId, Seat};
use tracing::{debug, info};

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_board, format_delta, format_winners};
use crate::ui;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimArgs {
    pub hands: u64,
    /// Bot kinds, one per seat
    pub bots: Vec<String>,
    /// Base seed; bot `i` is seeded with `seed + i`, hand `n` with `seed + n`
    pub seed: Option<u64>,
    /// Starting stack, overriding the configured one
    pub stack: Option<u32>,
    /// Print each hand record as a JSON line instead of text
    pub json: bool,
}

/// Handle the sim command.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for a bad hand count or bot list,
/// `CliError::Config` when the configuration cannot be loaded, and
/// `CliError::Engine` if the engine rejects a hand.
pub fn handle_sim_command(
    args: &SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if args.hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    if args.bots.len() < 2 {
        ui::write_error(err, "at least 2 bots are needed")?;
        return Err(CliError::InvalidInput(
            "at least 2 bots are needed".to_string(),
        ));
    }

    let cfg = match config::load() {
        Ok(c) => c,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };
    let starting_stack = args.stack.unwrap_or(cfg.starting_stack);
    if starting_stack == 0 {
        ui::write_error(err, "stack must be >= 1")?;
        return Err(CliError::InvalidInput("stack must be >= 1".to_string()));
    }
    let base_seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let schedule = cfg.blind_schedule();

    let mut table = BotTable::new();
    let mut order: Vec<BotId> = Vec::with_capacity(args.bots.len());
    for (i, kind) in args.bots.iter().enumerate() {
        let id = format!("bot_{}", i);
        let bot = create_bot(kind, base_seed.wrapping_add(i as u64))?;
        table.seat(id.clone(), bot);
        order.push(id);
    }
    let mut chips: BTreeMap<BotId, u32> = order
        .iter()
        .map(|id| (id.clone(), starting_stack))
        .collect();

    info!(
        hands = args.hands,
        bots = order.len(),
        seed = base_seed,
        "simulation starting"
    );

    let mut ids = HandIds::today();
    let mut ledger: BTreeMap<BotId, i64> = BTreeMap::new();
    let mut played = 0u64;
    for n in 0..args.hands {
        let active: Vec<&BotId> = order
            .iter()
            .filter(|id| chips.get(*id).copied().unwrap_or(0) > 0)
            .collect();
        if active.len() < 2 {
            ui::display_warning(
                err,
                &format!("only {} bot(s) left with chips, stopping", active.len()),
            )?;
            break;
        }

        // the button moves one seat per hand
        let k = active.len();
        let seats: Vec<Seat> = (0..k)
            .map(|j| {
                let id = active[(n as usize + j) % k];
                Seat::new(id.clone(), chips.get(id).copied().unwrap_or(0))
            })
            .collect();

        let seed = base_seed.wrapping_add(n);
        let config = HandConfig {
            hand_id: ids.next_id(),
            blinds: schedule.blinds_for_hand(n),
            limit: cfg.limit,
            on_illegal: cfg.on_illegal,
            seed: Some(seed),
        };
        let mut hand = PokerHand::new(seats, config)?;
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        let outcome = hand.play(&mut deck, &mut table, &mut ledger)?;

        for (id, stack) in &outcome.final_stacks {
            chips.insert(id.clone(), *stack);
        }
        write_hand(&outcome, args.json, out)?;
        played += 1;
        debug!(hand = n, "hand complete");
    }

    if args.json {
        return Ok(());
    }
    writeln!(out, "Simulated: {} hands", played)?;
    for id in &order {
        let stack = chips.get(id).copied().unwrap_or(0);
        writeln!(
            out,
            "  {} ({}): {} -> {}",
            id,
            table.name_of(id).unwrap_or("?"),
            format_delta(stack as i64 - starting_stack as i64),
            stack
        )?;
    }
    Ok(())
}

fn write_hand(outcome: &HandOutcome, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let record = &outcome.record;
    if json {
        let line = record.to_jsonl().map_err(std::io::Error::other)?;
        writeln!(out, "{}", line)?;
        return Ok(());
    }
    let winners: Vec<BotId> = outcome
        .awards
        .first()
        .map(|a| a.winners.clone())
        .unwrap_or_default();
    let pot: u32 = record.pots.iter().map(|p| p.amount).sum();
    writeln!(
        out,
        "{} board {} pot {} won by {}",
        record.hand_id,
        format_board(&record.board),
        pot,
        format_winners(&winners)
    )?;
    Ok(())
}

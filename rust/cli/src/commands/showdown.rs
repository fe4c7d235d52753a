//! Showdown command handler.
//!
//! Ranks named hole cards against a board and shows who wins, and how a
//! pot would be divided when `--pot` is given.

use std::collections::BTreeSet;
use std::io::Write;

use pokeher_engine::cards::Card;
use pokeher_engine::errors::GameError;
use pokeher_engine::hand::best_five;
use pokeher_engine::showdown::{Showdown, split_pot};

use crate::error::CliError;
use crate::formatters::{format_board, format_winners};
use crate::ui;
use crate::validation::{parse_cards, parse_named_hand};

pub fn handle_showdown_command(
    board: &str,
    hands: &[String],
    pot: Option<u32>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let board = match parse_cards(board) {
        Ok(cards) if (3..=5).contains(&cards.len()) => cards,
        Ok(cards) => {
            let msg = format!("board needs 3 to 5 cards, got {}", cards.len());
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
        Err(e) => {
            ui::write_error(err, &e)?;
            return Err(CliError::InvalidInput(e));
        }
    };

    let mut parsed = Vec::with_capacity(hands.len());
    let mut names = BTreeSet::new();
    let mut seen: BTreeSet<Card> = board.iter().copied().collect();
    for text in hands {
        let (name, hole) = parse_named_hand(text).map_err(CliError::InvalidInput)?;
        if !names.insert(name.clone()) {
            return Err(CliError::InvalidInput(format!("{} listed twice", name)));
        }
        if let Some(dup) = hole.cards().into_iter().find(|c| !seen.insert(*c)) {
            return Err(CliError::InvalidInput(format!("Duplicate card: {}", dup)));
        }
        parsed.push((name, hole));
    }
    if parsed.len() < 2 {
        return Err(CliError::InvalidInput(
            "showdown needs at least 2 hands".to_string(),
        ));
    }

    let showdown = Showdown::new(&parsed, &board).map_err(GameError::from)?;
    writeln!(out, "Board: {}", format_board(&board))?;
    for (name, hole) in &parsed {
        let mut cards = hole.cards().to_vec();
        cards.extend_from_slice(&board);
        let (five, score) = best_five(&cards).map_err(GameError::from)?;
        writeln!(
            out,
            "{}: {} {} {}",
            name,
            hole,
            score.category,
            format_board(&five)
        )?;
    }

    let winners = showdown.winners();
    writeln!(out, "Winner: {}", format_winners(&winners))?;
    if let Some(amount) = pot {
        for (name, share) in split_pot(amount, &winners) {
            writeln!(out, "  {} takes {}", name, share)?;
        }
    }
    Ok(())
}

//! Card and board formatters for terminal display.
//!
//! Suits print as Unicode symbols where the terminal is known to render
//! them, and as `h d c s` letters otherwise.
//!
//! ## Example
//!
//! ```rust
//! use pokeher_engine::cards::{Card, Rank, Suit};
//! use pokeher_cli::formatters::{format_card, format_board};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use pokeher_engine::cards::{Card, Suit};
use pokeher_engine::player::BotId;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> char {
    if supports_unicode() {
        match suit {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    } else {
        suit.symbol()
    }
}

/// String like "A♠" (Unicode) or "As" (ASCII)
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.symbol(), format_suit(card.suit))
}

/// Formatted board string like "[A♠ K♥ Q♦]" or "[]" if empty
pub fn format_board(cards: &[Card]) -> String {
    let formatted_cards: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted_cards.join(" "))
}

/// Signed chip result, e.g. "+120" or "-40".
pub fn format_delta(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

pub fn format_winners(winners: &[BotId]) -> String {
    match winners {
        [] => "nobody".to_string(),
        [one] => one.clone(),
        many => format!("{} (split)", many.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokeher_engine::cards::Rank;

    #[test]
    fn empty_board_is_brackets() {
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn board_cards_are_space_separated() {
        let board = [
            Card::new(Rank::Ten, Suit::Clubs),
            Card::new(Rank::Two, Suit::Hearts),
        ];
        let s = format_board(&board);
        assert!(s.starts_with("[T"));
        assert_eq!(s.split(' ').count(), 2);
    }

    #[test]
    fn deltas_carry_a_sign() {
        assert_eq!(format_delta(120), "+120");
        assert_eq!(format_delta(-40), "-40");
        assert_eq!(format_delta(0), "0");
    }

    #[test]
    fn winners_mark_splits() {
        assert_eq!(format_winners(&["a".to_string()]), "a");
        assert_eq!(
            format_winners(&["a".to_string(), "b".to_string()]),
            "a, b (split)"
        );
    }
}

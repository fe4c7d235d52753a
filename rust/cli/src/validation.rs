//! Parsing of card text typed on the command line.
//!
//! Cards are written rank then suit: `Ah`, `Tc`, `9s`. `10` is accepted
//! for ten. Lists may be separated by spaces or commas, or run together
//! (`AhKd`).

use pokeher_engine::cards::{Card, HoleCards, Rank, Suit};

/// Parses one card such as `Ah` or `10c`.
///
/// # Example
///
/// ```rust
/// use pokeher_cli::validation::parse_card;
/// use pokeher_engine::cards::{Card, Rank, Suit};
///
/// assert_eq!(parse_card("Td"), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
/// assert!(parse_card("1x").is_err());
/// ```
pub fn parse_card(text: &str) -> Result<Card, String> {
    let text = text.trim();
    let mut chars: Vec<char> = text.chars().collect();
    let suit_char = chars
        .pop()
        .ok_or_else(|| "Empty card".to_string())?;
    let rank_text: String = chars.into_iter().collect();

    let rank = match rank_text.to_ascii_uppercase().as_str() {
        "A" => Rank::Ace,
        "K" => Rank::King,
        "Q" => Rank::Queen,
        "J" => Rank::Jack,
        "T" | "10" => Rank::Ten,
        digit if digit.len() == 1 => digit
            .parse::<u8>()
            .ok()
            .and_then(|v| Rank::try_from(v).ok())
            .ok_or_else(|| format!("Invalid rank in card: {}", text))?,
        _ => return Err(format!("Invalid rank in card: {}", text)),
    };
    let suit = match suit_char.to_ascii_lowercase() {
        'c' | '♣' => Suit::Clubs,
        'd' | '♦' => Suit::Diamonds,
        'h' | '♥' => Suit::Hearts,
        's' | '♠' => Suit::Spades,
        _ => return Err(format!("Invalid suit in card: {}", text)),
    };
    Ok(Card::new(rank, suit))
}

/// Parses a list of cards, e.g. `"5s Kc 3d"`, `"5s,Kc,3d"`, or `"5sKc3d"`.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, String> {
    let mut cards = Vec::new();
    for token in text.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        let mut current = String::new();
        for ch in token.chars() {
            current.push(ch);
            if is_suit(ch) && current.chars().count() >= 2 {
                cards.push(parse_card(&current)?);
                current.clear();
            }
        }
        if !current.is_empty() {
            return Err(format!("Incomplete card: {}", current));
        }
    }
    Ok(cards)
}

fn is_suit(ch: char) -> bool {
    matches!(
        ch.to_ascii_lowercase(),
        'c' | 'd' | 'h' | 's' | '♣' | '♦' | '♥' | '♠'
    )
}

/// Parses `name=AhKd` into a bot name and its hole cards.
pub fn parse_named_hand(text: &str) -> Result<(String, HoleCards), String> {
    let (name, cards) = text
        .split_once('=')
        .ok_or_else(|| format!("Expected name=CARDS, got: {}", text))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Missing name in: {}", text));
    }
    match parse_cards(cards)?.as_slice() {
        &[a, b] => HoleCards::new(a, b)
            .map(|hole| (name.to_string(), hole))
            .map_err(|e| e.to_string()),
        other => Err(format!(
            "{} needs exactly 2 hole cards, got {}",
            name,
            other.len()
        )),
    }
}

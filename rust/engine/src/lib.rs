//! # pokeher-engine: No-Limit Hold'em Hand Engine
//!
//! Adjudicates Texas Hold'em hands between bots: deals from whatever card
//! source it is given, validates betting actions, keeps the pot and side
//! pots, and pays out at showdown with exact split-pot arithmetic.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), hole cards, board
//! - [`hand`] - Best-five-of-seven hand evaluation
//! - [`rules`] - Action validation against the betting rules
//! - [`betting`] - Betting round state machine
//! - [`pot`] - Main pot and side pot accounting
//! - [`showdown`] - Winner selection and pot splitting
//! - [`engine`] - Orchestration of a full hand
//! - [`policy`] - Betting limit, blind schedule, illegal-action policy
//! - [`source`] - Bot decision and bankroll boundaries
//! - [`deck`] - Card sources, including a seeded ChaCha deck
//! - [`logger`] - Hand records
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use pokeher_engine::cards::{Card, Rank, Suit};
//! use pokeher_engine::hand::{evaluate, Category};
//!
//! let cards = [
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::King, Suit::Hearts),
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//!
//! let score = evaluate(&cards).unwrap();
//! assert_eq!(score.category, Category::StraightFlush);
//! ```
//!
//! ## Showdown
//!
//! ```rust
//! use pokeher_engine::cards::{Card, HoleCards, Rank, Suit};
//! use pokeher_engine::showdown::Showdown;
//!
//! let board = [
//!     Card::new(Rank::Five, Suit::Spades),
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//!     Card::new(Rank::Queen, Suit::Clubs),
//!     Card::new(Rank::Nine, Suit::Clubs),
//! ];
//! let aces = HoleCards::new(
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::Ace, Suit::Spades),
//! )
//! .unwrap();
//! let junk = HoleCards::new(
//!     Card::new(Rank::Six, Suit::Clubs),
//!     Card::new(Rank::Five, Suit::Diamonds),
//! )
//! .unwrap();
//!
//! let showdown = Showdown::new(&[("aces".into(), aces), ("junk".into(), junk)], &board).unwrap();
//! assert_eq!(showdown.winners(), vec!["aces".to_string()]);
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod policy;
pub mod pot;
pub mod rules;
pub mod showdown;
pub mod source;

use std::collections::BTreeSet;

use pokeher_engine::cards::{Card, HoleCards, Rank, Suit};
use pokeher_engine::errors::{GameError, HandError, PotError};
use pokeher_engine::hand::Category;
use pokeher_engine::pot::Pot;
use pokeher_engine::showdown::{award_uncontested, resolve, split_pot, winnings, Showdown};

fn c(s: &str) -> Card {
    let mut chars = s.chars();
    let rank = match chars.next() {
        Some('A') => Rank::Ace,
        Some('K') => Rank::King,
        Some('Q') => Rank::Queen,
        Some('J') => Rank::Jack,
        Some('T') => Rank::Ten,
        Some(d) => Rank::try_from(d.to_digit(10).unwrap() as u8).unwrap(),
        None => panic!("empty card"),
    };
    let suit = match chars.next() {
        Some('c') => Suit::Clubs,
        Some('d') => Suit::Diamonds,
        Some('h') => Suit::Hearts,
        Some('s') => Suit::Spades,
        other => panic!("bad suit {:?}", other),
    };
    Card::new(rank, suit)
}

fn hole(a: &str, b: &str) -> HoleCards {
    HoleCards::new(c(a), c(b)).unwrap()
}

fn board() -> Vec<Card> {
    ["5s", "Kc", "3d", "Qc", "9c"].iter().map(|s| c(s)).collect()
}

fn pot(amount: u32, eligible: &[&str]) -> Pot {
    Pot {
        amount,
        eligible: eligible.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
    }
}

#[test]
fn pocket_aces_beat_junk() {
    let hands = vec![
        ("aces".to_string(), hole("Ah", "As")),
        ("junk".to_string(), hole("6c", "5d")),
    ];
    let showdown = Showdown::new(&hands, &board()).unwrap();
    assert_eq!(showdown.winners(), vec!["aces".to_string()]);
    assert_eq!(showdown.score("aces").unwrap().category, Category::OnePair);
    assert!(showdown.score("aces") > showdown.score("junk"));
    assert!(showdown.score("nobody").is_none());
}

#[test]
fn same_hand_in_other_suits_splits() {
    let hands = vec![
        ("qj1".to_string(), hole("Qh", "Js")),
        ("qj2".to_string(), hole("Qd", "Jh")),
    ];
    let showdown = Showdown::new(&hands, &board()).unwrap();
    assert_eq!(
        showdown.winners(),
        vec!["qj1".to_string(), "qj2".to_string()]
    );
}

#[test]
fn hole_card_also_on_the_board_is_rejected() {
    let hands = vec![
        ("qj1".to_string(), hole("Qh", "Js")),
        ("qj2".to_string(), hole("Qc", "Jh")),
    ];
    let err = Showdown::new(&hands, &board()).unwrap_err();
    assert_eq!(err, HandError::DuplicateCard(c("Qc")));
}

#[test]
fn odd_chip_goes_to_the_first_winner() {
    let hands = vec![
        ("qj1".to_string(), hole("Qh", "Js")),
        ("qj2".to_string(), hole("Qd", "Jh")),
    ];
    let awards = resolve(&hands, &board(), &[pot(41, &["qj1", "qj2"])]).unwrap();
    assert_eq!(awards.len(), 1);
    assert_eq!(
        awards[0].shares,
        vec![("qj1".to_string(), 21), ("qj2".to_string(), 20)]
    );
}

#[test]
fn split_pot_hands_out_remainders_in_order() {
    let winners: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    let shares = split_pot(100, &winners);
    assert_eq!(
        shares.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
        vec![34, 33, 33]
    );
    let shares = split_pot(101, &winners);
    assert_eq!(
        shares.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
        vec![34, 34, 33]
    );
    assert!(split_pot(10, &[]).is_empty());
}

#[test]
fn side_pot_goes_to_the_best_eligible_hand() {
    // the short stack holds the best hand but can only win the main pot
    let hands = vec![
        ("short".to_string(), hole("Ah", "As")),
        ("mid".to_string(), hole("Jh", "Js")),
        ("big".to_string(), hole("7h", "2d")),
    ];
    let pots = [pot(300, &["short", "mid", "big"]), pot(400, &["mid", "big"])];
    let awards = resolve(&hands, &board(), &pots).unwrap();
    assert_eq!(awards[0].winners, vec!["short".to_string()]);
    assert_eq!(awards[1].winners, vec!["mid".to_string()]);

    let won = winnings(&awards);
    assert_eq!(won["short"], 300);
    assert_eq!(won["mid"], 400);
    assert!(!won.contains_key("big"));
}

#[test]
fn lone_survivor_takes_every_pot_unshown() {
    let pots = [pot(300, &["a", "b"]), pot(200, &["b"])];
    let awards = award_uncontested("b", &pots);
    assert_eq!(winnings(&awards)["b"], 500);

    // resolve with one hand skips evaluation, even without a board
    let hands = vec![("b".to_string(), hole("7h", "2d"))];
    let awards = resolve(&hands, &[], &pots).unwrap();
    assert_eq!(winnings(&awards)["b"], 500);
}

#[test]
fn pot_with_no_eligible_hand_is_an_error() {
    let hands = vec![
        ("a".to_string(), hole("Ah", "As")),
        ("b".to_string(), hole("Kh", "Ks")),
    ];
    let err = resolve(&hands, &board(), &[pot(50, &["c"])]).unwrap_err();
    assert_eq!(err, GameError::Pot(PotError::NoEligiblePlayers { amount: 50 }));
}

use std::collections::BTreeMap;

use pokeher_engine::cards::{Card, HoleCards, Rank, Suit};
use pokeher_engine::deck::{Deck, PresetDealer};
use pokeher_engine::engine::{HandConfig, PokerHand};
use pokeher_engine::errors::{CardError, GameError, IllegalAction};
use pokeher_engine::hand::Category;
use pokeher_engine::logger::Street;
use pokeher_engine::player::{Action, Seat};
use pokeher_engine::policy::{Blinds, IllegalActionPolicy, LimitKind};
use pokeher_engine::source::{ActionRequest, ActionSource, ScriptedSource};

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

fn preset(cards: &[&str]) -> PresetDealer {
    PresetDealer::new(cards.iter().map(|s| c(s)).collect())
}

/// Remembers who was asked to act, in order.
struct Recorder<S> {
    inner: S,
    asked: Vec<(String, Street)>,
}

impl<S: ActionSource> ActionSource for Recorder<S> {
    fn get_action(&mut self, request: &ActionRequest) -> Action {
        self.asked.push((request.player_id.clone(), request.street));
        self.inner.get_action(request)
    }
}

/// Calls everything, checks when it can.
struct CallAll;

impl ActionSource for CallAll {
    fn get_action(&mut self, request: &ActionRequest) -> Action {
        if request.to_call == 0 {
            Action::Check
        } else {
            Action::Call(request.to_call)
        }
    }
}

fn heads_up(config: HandConfig) -> PokerHand {
    let seats = vec![Seat::new("bot_0", 1000), Seat::new("bot_1", 1000)];
    PokerHand::new(seats, config).unwrap()
}

const HEADS_UP_DEAL: [&str; 9] = ["6c", "Ah", "5d", "As", "5s", "Kc", "3d", "Qc", "9c"];

#[test]
fn heads_up_hand_checked_down_to_showdown() {
    let mut hand = heads_up(HandConfig::new(Blinds::new(10, 20)));
    let mut dealer = preset(&HEADS_UP_DEAL);
    let script = ScriptedSource::new([
        ("bot_0", Action::Call(10)),
        ("bot_1", Action::Check),
        ("bot_1", Action::Check),
        ("bot_0", Action::Check),
        ("bot_1", Action::Check),
        ("bot_0", Action::Check),
        ("bot_1", Action::Check),
        ("bot_0", Action::Check),
    ]);
    let mut bots = Recorder {
        inner: script,
        asked: Vec::new(),
    };
    let mut ledger: BTreeMap<String, i64> = BTreeMap::new();

    let outcome = hand.play(&mut dealer, &mut bots, &mut ledger).unwrap();

    // hole cards go out one at a time starting left of the button
    assert_eq!(hand.hole_cards("bot_0"), Some(HoleCards::new(c("Ah"), c("As")).unwrap()));
    assert_eq!(hand.hole_cards("bot_1"), Some(HoleCards::new(c("6c"), c("5d")).unwrap()));
    assert_eq!(hand.board(), &[c("5s"), c("Kc"), c("3d"), c("Qc"), c("9c")]);
    assert_eq!(hand.street(), Street::River);

    // the button acts first before the flop and last after it
    assert_eq!(bots.asked[0], ("bot_0".to_string(), Street::Preflop));
    assert_eq!(bots.asked[2], ("bot_1".to_string(), Street::Flop));
    assert_eq!(bots.asked.len(), 8);

    assert_eq!(hand.pot(), 40);
    assert_eq!(outcome.deltas["bot_0"], 20);
    assert_eq!(outcome.deltas["bot_1"], -20);
    assert_eq!(outcome.final_stacks["bot_0"], 1020);
    assert_eq!(ledger["bot_1"], -20);

    let showdown = outcome.record.showdown.expect("went to showdown");
    assert_eq!(showdown.winners, vec!["bot_0".to_string()]);
    assert!(showdown.notes.is_none());
    let shown = showdown
        .hands
        .iter()
        .find(|h| h.player_id == "bot_0")
        .unwrap();
    assert_eq!(shown.category, Category::OnePair);
}

#[test]
fn three_way_all_in_pays_main_and_side_pots() {
    let seats = vec![
        Seat::new("a", 100),
        Seat::new("b", 300),
        Seat::new("c", 1000),
    ];
    let mut hand = PokerHand::new(seats, HandConfig::new(Blinds::new(5, 10))).unwrap();
    let mut dealer = preset(&[
        "Kh", "7c", "Ah", "Ks", "2d", "As", "3s", "8d", "9h", "Jc", "4s",
    ]);
    let mut bots = ScriptedSource::new([
        ("a", Action::AllIn),
        ("b", Action::AllIn),
        ("c", Action::Call(300)),
    ]);
    let mut ledger: BTreeMap<String, i64> = BTreeMap::new();

    let outcome = hand.play(&mut dealer, &mut bots, &mut ledger).unwrap();

    assert_eq!(hand.hole_cards("a"), Some(HoleCards::new(c("Ah"), c("As")).unwrap()));
    assert_eq!(outcome.pots.main_pot(), 300);
    assert_eq!(outcome.pots.side_pots(), vec![400]);
    assert_eq!(outcome.deltas["a"], 200);
    assert_eq!(outcome.deltas["b"], 100);
    assert_eq!(outcome.deltas["c"], -300);
    assert_eq!(outcome.deltas.values().sum::<i64>(), 0);
    assert_eq!(outcome.final_stacks["c"], 700);
    assert_eq!(ledger["a"], 200);
    // nobody could act after the flop
    assert_eq!(hand.actions().len(), 3);
}

#[test]
fn multiway_blinds_sit_left_of_the_button() {
    let seats = (0..4).map(|i| Seat::new(format!("bot_{}", i), 1000)).collect();
    let mut hand = PokerHand::new(seats, HandConfig::new(Blinds::new(10, 20))).unwrap();
    let mut deck = Deck::new_with_seed(3);
    deck.shuffle();
    let mut bots = Recorder {
        inner: ScriptedSource::new([
            ("bot_3", Action::Fold),
            ("bot_0", Action::Fold),
            ("bot_1", Action::Fold),
        ]),
        asked: Vec::new(),
    };
    let mut ledger: BTreeMap<String, i64> = BTreeMap::new();

    let outcome = hand.play(&mut deck, &mut bots, &mut ledger).unwrap();

    let asked: Vec<&str> = bots.asked.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(asked, vec!["bot_3", "bot_0", "bot_1"]);
    assert_eq!(outcome.deltas["bot_1"], -10);
    assert_eq!(outcome.deltas["bot_2"], 10);
    assert_eq!(outcome.deltas["bot_0"], 0);
    assert!(outcome.record.showdown.is_none());
    assert!(hand.board().is_empty());
}

#[test]
fn short_big_blind_is_all_in_for_what_it_has() {
    let seats = vec![Seat::new("bot_0", 1000), Seat::new("bot_1", 15)];
    let mut hand = PokerHand::new(seats, HandConfig::new(Blinds::new(10, 20))).unwrap();
    hand.post_blinds().unwrap();
    assert_eq!(hand.pot(), 25);
    assert!(hand.player("bot_1").unwrap().is_all_in);

    let mut dealer = preset(&HEADS_UP_DEAL);
    hand.deal_hole_cards(&mut dealer).unwrap();
    let mut bots = ScriptedSource::new([("bot_0", Action::Call(10))]);
    let (ended, _) = hand
        .betting_round(&["bot_0".to_string(), "bot_1".to_string()], &mut bots)
        .unwrap();
    assert!(!ended);
    // only the 5 chips the big blind could cover are matched
    assert_eq!(hand.pot(), 30);
}

#[test]
fn illegal_action_aborts_under_reject_policy() {
    let mut hand = heads_up(HandConfig::new(Blinds::new(10, 20)));
    let mut dealer = preset(&HEADS_UP_DEAL);
    let mut bots = ScriptedSource::new([("bot_0", Action::Check)]);
    let mut ledger: BTreeMap<String, i64> = BTreeMap::new();
    let err = hand.play(&mut dealer, &mut bots, &mut ledger).unwrap_err();
    assert_eq!(
        err,
        GameError::IllegalAction(IllegalAction::CannotCheck { to_call: 10 })
    );
    assert!(ledger.is_empty());
}

#[test]
fn illegal_action_becomes_a_fold_under_fold_policy() {
    let mut config = HandConfig::new(Blinds::new(10, 20));
    config.on_illegal = IllegalActionPolicy::Fold;
    let mut hand = heads_up(config);
    let mut dealer = preset(&HEADS_UP_DEAL);
    let mut bots = ScriptedSource::new([("bot_0", Action::Check)]);
    let mut ledger: BTreeMap<String, i64> = BTreeMap::new();

    let outcome = hand.play(&mut dealer, &mut bots, &mut ledger).unwrap();
    assert_eq!(hand.actions()[0].action, Action::Fold);
    assert_eq!(outcome.deltas["bot_0"], -10);
    assert_eq!(ledger["bot_1"], 10);
}

#[test]
fn pot_limit_refuses_an_overbet() {
    let mut config = HandConfig::new(Blinds::new(10, 20));
    config.limit = LimitKind::PotLimit;
    let mut hand = heads_up(config);
    let mut dealer = preset(&HEADS_UP_DEAL);
    let mut bots = ScriptedSource::new([("bot_0", Action::Raise(61))]);
    let err = hand
        .play(&mut dealer, &mut bots, &mut BTreeMap::<String, i64>::new())
        .unwrap_err();
    assert_eq!(
        err,
        GameError::IllegalAction(IllegalAction::RaiseTooLarge {
            amount: 61,
            maximum: 60
        })
    );
}

#[test]
fn table_setup_is_validated() {
    let blinds = HandConfig::new(Blinds::new(10, 20));
    assert_eq!(
        PokerHand::new(vec![Seat::new("solo", 100)], blinds.clone()).unwrap_err(),
        GameError::NotEnoughPlayers(1)
    );
    assert_eq!(
        PokerHand::new(vec![Seat::new("x", 100), Seat::new("x", 100)], blinds.clone())
            .unwrap_err(),
        GameError::DuplicatePlayer("x".into())
    );
    assert_eq!(
        PokerHand::new(vec![Seat::new("x", 100), Seat::new("y", 0)], blinds).unwrap_err(),
        GameError::EmptyStack("y".into())
    );
}

#[test]
fn tables_beyond_what_a_pot_can_hold_are_refused() {
    let seats = vec![Seat::new("bot_0", 3_000_000_000), Seat::new("bot_1", 3_000_000_000)];
    assert_eq!(
        PokerHand::new(seats, HandConfig::new(Blinds::new(10, 20))).unwrap_err(),
        GameError::TooManyChips {
            total: 6_000_000_000
        }
    );
}

#[test]
fn all_in_for_every_chip_a_pot_can_hold() {
    let seats = vec![Seat::new("bot_0", u32::MAX - 1_000), Seat::new("bot_1", 1_000)];
    let mut hand = PokerHand::new(seats, HandConfig::new(Blinds::new(10, 20))).unwrap();
    let mut deck = Deck::new_with_seed(5);
    deck.shuffle();
    let mut bots = ScriptedSource::new([("bot_0", Action::AllIn), ("bot_1", Action::Call(0))]);
    let mut ledger: BTreeMap<String, i64> = BTreeMap::new();

    let outcome = hand.play(&mut deck, &mut bots, &mut ledger).unwrap();
    assert_eq!(outcome.deltas.values().sum::<i64>(), 0);
    let total: u64 = outcome.final_stacks.values().map(|&s| s as u64).sum();
    assert_eq!(total, u32::MAX as u64);
}

#[test]
fn running_out_of_cards_is_an_error() {
    let mut hand = heads_up(HandConfig::new(Blinds::new(10, 20)));
    let mut dealer = preset(&["Ah", "Kd", "2c"]);
    let mut bots = ScriptedSource::default();
    let err = hand
        .play(&mut dealer, &mut bots, &mut BTreeMap::<String, i64>::new())
        .unwrap_err();
    assert_eq!(err, GameError::DeckEmpty);
}

#[test]
fn board_must_be_dealt_in_order_without_duplicates() {
    let mut hand = heads_up(HandConfig::new(Blinds::new(10, 20)));
    hand.set_hole_cards("bot_0", HoleCards::new(c("Ah"), c("As")).unwrap())
        .unwrap();
    assert_eq!(
        hand.set_hole_cards("bot_1", HoleCards::new(c("Ah"), c("2d")).unwrap()),
        Err(GameError::Card(CardError::DuplicateCard(c("Ah"))))
    );
    assert_eq!(
        hand.deal_board(Street::Turn, &[c("2c")]),
        Err(GameError::BoardOutOfOrder {
            dealt: 0,
            requested: 1
        })
    );
    assert_eq!(
        hand.deal_board(Street::Flop, &[c("As"), c("3d"), c("4d")]),
        Err(GameError::Card(CardError::DuplicateCard(c("As"))))
    );
    hand.deal_board(Street::Flop, &[c("2c"), c("3d"), c("4d")])
        .unwrap();
    assert_eq!(hand.board().len(), 3);
    assert!(hand.dead_cards().contains(&c("As")));
}

#[test]
fn chips_are_conserved_across_seeded_hands() {
    let mut ledger: BTreeMap<String, i64> = BTreeMap::new();
    for seed in 0..20u64 {
        let seats = (0..3).map(|i| Seat::new(format!("bot_{}", i), 500)).collect();
        let mut config = HandConfig::new(Blinds::new(5, 10));
        config.seed = Some(seed);
        let mut hand = PokerHand::new(seats, config).unwrap();
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        let outcome = hand.play(&mut deck, &mut CallAll, &mut ledger).unwrap();

        assert_eq!(outcome.final_stacks.values().sum::<u32>(), 1500);
        assert_eq!(hand.board().len(), 5);
        assert_eq!(outcome.record.seed, Some(seed));
    }
    assert_eq!(ledger.values().sum::<i64>(), 0);
}

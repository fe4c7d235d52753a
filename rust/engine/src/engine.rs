use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use crate::betting::{BettingRound, RoundState};
use crate::cards::{Board, Card, HoleCards};
use crate::deck::Dealer;
use crate::errors::{CardError, GameError, IllegalAction};
use crate::hand::best_five;
use crate::logger::{ActionRecord, HandRecord, ShowdownInfo, ShownHand, Street};
use crate::player::{Action, BetState, BotId, Seat};
use crate::policy::{BetLimit, Blinds, IllegalActionPolicy, LimitKind};
use crate::pot::{build_pots, check_conservation, PotBreakdown};
use crate::rules::ValidatedAction;
use crate::showdown::{award_uncontested, resolve, winnings, PotAward};
use crate::source::{ActionRequest, ActionSource, Ledger};

/// Rules for a single hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandConfig {
    pub hand_id: String,
    pub blinds: Blinds,
    pub limit: LimitKind,
    pub on_illegal: IllegalActionPolicy,
    /// Seed of the deck the hand is dealt from, if any; recorded only
    pub seed: Option<u64>,
}

impl HandConfig {
    pub fn new(blinds: Blinds) -> Self {
        Self {
            hand_id: "hand-1".to_string(),
            blinds,
            limit: LimitKind::NoLimit,
            on_illegal: IllegalActionPolicy::Reject,
            seed: None,
        }
    }
}

/// Everything that came out of a settled hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandOutcome {
    pub pots: PotBreakdown,
    pub awards: Vec<PotAward>,
    /// Won (or returned) minus contributed, per player; sums to zero
    pub deltas: BTreeMap<BotId, i64>,
    pub final_stacks: BTreeMap<BotId, u32>,
    pub record: HandRecord,
}

/// Plays one hand: blinds, four betting streets, and the showdown.
///
/// Seat 0 is the button. Heads-up the button posts the small blind and acts
/// first before the flop; with more players the two seats after the button
/// post the blinds. After the flop the first live seat left of the button
/// acts first.
///
/// Bot decisions, cards, and bankrolls all come from the caller through
/// [`ActionSource`], [`Dealer`], and [`Ledger`].
///
/// # Examples
///
/// ```
/// use pokeher_engine::deck::Deck;
/// use pokeher_engine::engine::{HandConfig, PokerHand};
/// use pokeher_engine::player::{Action, Seat};
/// use pokeher_engine::policy::Blinds;
/// use pokeher_engine::source::ScriptedSource;
/// use std::collections::BTreeMap;
///
/// let seats = vec![Seat::new("bot_0", 1000), Seat::new("bot_1", 1000)];
/// let mut hand = PokerHand::new(seats, HandConfig::new(Blinds::new(10, 20))).unwrap();
/// let mut deck = Deck::new_with_seed(7);
/// deck.shuffle();
/// // the button folds its small blind
/// let mut bots = ScriptedSource::new([("bot_0", Action::Fold)]);
/// let mut ledger: BTreeMap<String, i64> = BTreeMap::new();
///
/// let outcome = hand.play(&mut deck, &mut bots, &mut ledger).unwrap();
/// assert_eq!(outcome.deltas["bot_0"], -10);
/// assert_eq!(ledger["bot_1"], 10);
/// ```
#[derive(Debug)]
pub struct PokerHand {
    config: HandConfig,
    limit: Box<dyn BetLimit>,
    players: Vec<BetState>,
    hole: BTreeMap<BotId, HoleCards>,
    board: Board,
    street: Street,
    pot: u32,
    actions: Vec<ActionRecord>,
}

impl PokerHand {
    pub fn new(seats: Vec<Seat>, config: HandConfig) -> Result<Self, GameError> {
        if seats.len() < 2 {
            return Err(GameError::NotEnoughPlayers(seats.len()));
        }
        let mut ids = BTreeSet::new();
        for seat in &seats {
            if !ids.insert(seat.id.as_str()) {
                return Err(GameError::DuplicatePlayer(seat.id.clone()));
            }
            if seat.stack == 0 {
                return Err(GameError::EmptyStack(seat.id.clone()));
            }
        }
        // the pot is a u32, so every chip on the table must fit in one
        let total: u64 = seats.iter().map(|s| s.stack as u64).sum();
        if total > u32::MAX as u64 {
            return Err(GameError::TooManyChips { total });
        }
        let players = seats
            .into_iter()
            .map(|s| BetState::new(s.id, s.stack))
            .collect();
        Ok(Self {
            limit: config.limit.policy(),
            config,
            players,
            hole: BTreeMap::new(),
            board: Board::new(),
            street: Street::Preflop,
            pot: 0,
            actions: Vec::new(),
        })
    }

    /// Chips committed so far this hand.
    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn board(&self) -> &[Card] {
        self.board.cards()
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn players(&self) -> &[BetState] {
        &self.players
    }

    pub fn player(&self, id: &str) -> Option<&BetState> {
        self.players.iter().find(|p| p.player_id == id)
    }

    pub fn hole_cards(&self, id: &str) -> Option<HoleCards> {
        self.hole.get(id).copied()
    }

    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    fn seat_of(&self, id: &str) -> Result<usize, IllegalAction> {
        self.players
            .iter()
            .position(|p| p.player_id == id)
            .ok_or_else(|| IllegalAction::UnknownPlayer(id.to_string()))
    }

    fn blind_seats(&self) -> (usize, usize) {
        if self.players.len() == 2 {
            (0, 1)
        } else {
            (1, 2)
        }
    }

    fn first_to_act(&self, street: Street) -> usize {
        let n = self.players.len();
        match street {
            Street::Preflop if n == 2 => 0,
            Street::Preflop => 3 % n,
            _ => 1,
        }
    }

    /// Live players starting at `seat` and wrapping around the table.
    fn live_from(&self, seat: usize) -> Vec<BotId> {
        let n = self.players.len();
        (0..n)
            .map(|k| &self.players[(seat + k) % n])
            .filter(|p| p.is_live())
            .map(|p| p.player_id.clone())
            .collect()
    }

    /// Posts the forced bets. A player who cannot cover a blind posts what
    /// they have and is all-in.
    pub fn post_blinds(&mut self) -> Result<(), GameError> {
        let (sb, bb) = self.blind_seats();
        let Blinds { small, big } = self.config.blinds;
        for (seat, amount) in [(sb, small), (bb, big)] {
            let moved = self.players[seat].contribute(amount);
            self.pot += moved;
            debug!(player = %self.players[seat].player_id, amount = moved, "blind posted");
        }
        self.check_pot()
    }

    /// Cards already out in this hand, hole cards and board together.
    pub fn dead_cards(&self) -> BTreeSet<Card> {
        self.hole
            .values()
            .flat_map(|h| h.cards())
            .chain(self.board.cards().iter().copied())
            .collect()
    }

    /// Gives a player hole cards supplied by an outside dealing source.
    pub fn set_hole_cards(&mut self, id: &str, hole: HoleCards) -> Result<(), GameError> {
        self.seat_of(id)?;
        let mut dead = self.dead_cards();
        if let Some(previous) = self.hole.get(id) {
            for c in previous.cards() {
                dead.remove(&c);
            }
        }
        if let Some(dup) = hole.cards().into_iter().find(|c| dead.contains(c)) {
            return Err(CardError::DuplicateCard(dup).into());
        }
        self.hole.insert(id.to_string(), hole);
        Ok(())
    }

    /// Deals two cards to every player, one at a time, starting left of the
    /// button.
    pub fn deal_hole_cards(&mut self, dealer: &mut dyn Dealer) -> Result<(), GameError> {
        let n = self.players.len();
        let order: Vec<usize> = (1..=n).map(|k| k % n).collect();
        let mut first: BTreeMap<usize, Card> = BTreeMap::new();
        for round in 0..2 {
            for &seat in &order {
                let card = dealer.deal_card().ok_or(GameError::DeckEmpty)?;
                if round == 0 {
                    first.insert(seat, card);
                    continue;
                }
                let id = self.players[seat].player_id.clone();
                let hole = HoleCards::new(first[&seat], card)?;
                self.set_hole_cards(&id, hole)?;
            }
        }
        Ok(())
    }

    /// Adds a street's community cards supplied from outside.
    pub fn deal_board(&mut self, street: Street, cards: &[Card]) -> Result<(), GameError> {
        let dead = self.dead_cards();
        let dealt = self.board.len();
        match (street, cards) {
            (Street::Flop, &[a, b, c]) => self.board.deal_flop([a, b, c], &dead)?,
            (Street::Turn, &[t]) => self.board.deal_turn(t, &dead)?,
            (Street::River, &[r]) => self.board.deal_river(r, &dead)?,
            _ => {
                return Err(GameError::BoardOutOfOrder {
                    dealt,
                    requested: cards.len(),
                })
            }
        }
        debug!(street = %street, board = ?self.board.cards(), "board dealt");
        Ok(())
    }

    /// Burns a card and deals the street from `dealer`.
    pub fn deal_street(&mut self, street: Street, dealer: &mut dyn Dealer) -> Result<(), GameError> {
        let count = street.board_len() - self.board.len().min(street.board_len());
        dealer.burn_card();
        let cards = (0..count)
            .map(|_| dealer.deal_card().ok_or(GameError::DeckEmpty))
            .collect::<Result<Vec<_>, _>>()?;
        self.deal_board(street, &cards)
    }

    /// Moves to a new street: round contributions start again from zero.
    pub fn start_street(&mut self, street: Street) {
        self.street = street;
        for p in &mut self.players {
            p.start_round();
        }
    }

    /// Runs one betting round to completion.
    ///
    /// `players` are the bots still in the hand in acting order; the first
    /// one acts first. Returns whether the hand ended because everyone else
    /// folded, and the bots still contesting the pot.
    ///
    /// Illegal actions are handled by the configured
    /// [`IllegalActionPolicy`]: rejected back to the caller, or folded.
    pub fn betting_round(
        &mut self,
        players: &[BotId],
        source: &mut dyn ActionSource,
    ) -> Result<(bool, Vec<BotId>), GameError> {
        let first = match players.first() {
            Some(id) => self.seat_of(id)?,
            None => return Err(GameError::NotEnoughPlayers(0)),
        };
        for id in players {
            self.seat_of(id)?;
        }

        let mut round = BettingRound::new(&self.players, first, self.config.blinds.big);
        loop {
            match round.state() {
                RoundState::AwaitingAction(seat) => {
                    let request = self.request(&round, seat);
                    let action = source.get_action(&request);
                    self.act(&mut round, seat, action)?;
                }
                RoundState::RoundComplete => return Ok((false, self.live_from(first))),
                RoundState::HandTerminated { winner } => {
                    debug!(winner = %self.players[winner].player_id, "everyone else folded");
                    return Ok((true, self.live_from(first)));
                }
            }
        }
    }

    fn act(&mut self, round: &mut BettingRound, seat: usize, action: Action) -> Result<(), GameError> {
        let applied = match round.apply(&mut self.players, seat, action, self.limit.as_ref()) {
            Ok(applied) => applied,
            Err(illegal) => match self.config.on_illegal {
                IllegalActionPolicy::Reject => return Err(illegal.into()),
                IllegalActionPolicy::Fold => {
                    warn!(
                        player = %self.players[seat].player_id,
                        action = %action,
                        error = %illegal,
                        "illegal action, folding"
                    );
                    round.apply(&mut self.players, seat, Action::Fold, self.limit.as_ref())?
                }
            },
        };
        self.pot += applied.moved;
        self.actions.push(ActionRecord {
            player_id: self.players[seat].player_id.clone(),
            street: self.street,
            action: if applied.action == ValidatedAction::Fold {
                Action::Fold
            } else {
                action
            },
            moved: applied.moved,
        });
        self.check_pot()
    }

    fn request(&self, round: &BettingRound, seat: usize) -> ActionRequest {
        let p = &self.players[seat];
        let ctx = round.context(&self.players);
        ActionRequest {
            player_id: p.player_id.clone(),
            street: self.street,
            hole: self.hole.get(&p.player_id).copied(),
            board: self.board.cards().to_vec(),
            pot: self.pot,
            stack: p.stack,
            current_bet: ctx.current_bet,
            to_call: ctx.to_call(p),
            min_raise_to: ctx.min_raise_to(),
            max_raise_to: self.limit.max_raise_to(&ctx, p),
            may_raise: round.may_raise(seat),
        }
    }

    /// The hand's pot must always equal what players have put in.
    fn check_pot(&self) -> Result<(), GameError> {
        let contributed: u64 = self.players.iter().map(|p| p.contributed_total as u64).sum();
        check_conservation(self.pot as u64, contributed)?;
        Ok(())
    }

    /// Plays the whole hand and settles it.
    pub fn play(
        &mut self,
        dealer: &mut dyn Dealer,
        source: &mut dyn ActionSource,
        ledger: &mut dyn Ledger,
    ) -> Result<HandOutcome, GameError> {
        self.post_blinds()?;
        self.deal_hole_cards(dealer)?;

        let order = self.live_from(self.first_to_act(Street::Preflop));
        let (mut ended, _) = self.betting_round(&order, source)?;
        for street in [Street::Flop, Street::Turn, Street::River] {
            if ended {
                break;
            }
            self.deal_street(street, dealer)?;
            self.start_street(street);
            let order = self.live_from(self.first_to_act(street));
            (ended, _) = self.betting_round(&order, source)?;
        }
        self.settle(ledger)
    }

    /// Splits the pot among the winners and reports each player's result.
    pub fn settle(&mut self, ledger: &mut dyn Ledger) -> Result<HandOutcome, GameError> {
        self.check_pot()?;
        let pots = build_pots(&self.players)?;

        // canonical order for odd chips: first seat left of the button
        let live = self.live_from(1 % self.players.len());
        let awards = match live.as_slice() {
            [only] => award_uncontested(only, &pots.pots),
            _ => {
                let hands = live
                    .iter()
                    .map(|id| {
                        self.hole
                            .get(id)
                            .map(|h| (id.clone(), *h))
                            .ok_or_else(|| GameError::MissingHoleCards(id.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                resolve(&hands, self.board.cards(), &pots.pots)?
            }
        };

        let mut won = winnings(&awards);
        for (id, amount) in &pots.returned {
            *won.entry(id.clone()).or_insert(0) += amount;
        }
        let paid: u64 = won.values().map(|&v| v as u64).sum();
        check_conservation(paid, self.pot as u64)?;

        let mut deltas = BTreeMap::new();
        let mut final_stacks = BTreeMap::new();
        for p in &mut self.players {
            let amount = won.get(&p.player_id).copied().unwrap_or(0);
            let delta = amount as i64 - p.contributed_total as i64;
            p.stack += amount;
            deltas.insert(p.player_id.clone(), delta);
            final_stacks.insert(p.player_id.clone(), p.stack);
            ledger.record(&p.player_id, delta);
        }

        let showdown = if live.len() > 1 {
            Some(self.showdown_info(&live, &awards)?)
        } else {
            None
        };
        info!(
            hand_id = %self.config.hand_id,
            pot = self.pot,
            winners = ?awards.first().map(|a| &a.winners),
            showdown = showdown.is_some(),
            "hand settled"
        );

        let record = HandRecord {
            hand_id: self.config.hand_id.clone(),
            seed: self.config.seed,
            button: self.players[0].player_id.clone(),
            blinds: self.config.blinds,
            actions: self.actions.clone(),
            board: self.board.cards().to_vec(),
            pots: pots.pots.clone(),
            deltas: deltas.clone(),
            showdown,
            ts: None,
        };
        Ok(HandOutcome {
            pots,
            awards,
            deltas,
            final_stacks,
            record,
        })
    }

    fn showdown_info(&self, live: &[BotId], awards: &[PotAward]) -> Result<ShowdownInfo, GameError> {
        let hands = live
            .iter()
            .filter_map(|id| self.hole.get(id).map(|h| (id, h)))
            .map(|(id, hole)| -> Result<ShownHand, GameError> {
                let mut cards = hole.cards().to_vec();
                cards.extend_from_slice(self.board.cards());
                let (_, score) = best_five(&cards)?;
                Ok(ShownHand {
                    player_id: id.clone(),
                    cards: hole.cards().to_vec(),
                    category: score.category,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let winners = awards.first().map(|a| a.winners.clone()).unwrap_or_default();
        let notes = (winners.len() > 1).then(|| "split pot".to_string());
        Ok(ShowdownInfo {
            winners,
            hands,
            notes,
        })
    }
}

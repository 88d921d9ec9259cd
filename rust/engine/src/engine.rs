use tracing::{debug, error, info, warn};

use crate::cards::Card;
use crate::config::{SessionConfig, TableConfig};
use crate::errors::GameError;
use crate::game::{GameState, TableView, Turn};
use crate::logger::{RoundLogger, RoundRecord};
use crate::payout;
use crate::player::PlayerAction;
use crate::rules::{self, ValidatedAction};
use crate::shoe::Shoe;

/// Dealer stands on 17 unless it is soft and the table hits soft 17.
pub const DEALER_STANDS_ON: u8 = 17;

/// Turn state machine for a single-player blackjack table.
///
/// Owns the [`GameState`] and the [`Shoe`] exclusively. Every action runs to
/// completion, including dealer play and settlement when the round reaches
/// them, before the resulting [`TableView`] is returned. A refused action
/// returns a [`GameError`] and leaves the table as it was.
///
/// # Examples
///
/// ```
/// use blackjack_engine::config::SessionConfig;
/// use blackjack_engine::engine::Engine;
/// use blackjack_engine::game::Turn;
///
/// let mut engine = Engine::new(SessionConfig {
///     seed: Some(7),
///     ..SessionConfig::default()
/// });
///
/// let view = engine.place_bet(10).expect("betting is open");
/// assert_eq!(view.chips, 90);
/// assert_eq!(view.player_hand.len(), 2);
///
/// // Standing hands the round to the dealer, which plays out and settles
/// let view = engine.stand().expect("player may stand");
/// assert_eq!(view.turn, Turn::Payout);
///
/// // Hitting is refused once the round is settled
/// assert!(engine.hit().is_err());
/// ```
#[derive(Debug)]
pub struct Engine {
    state: GameState,
    shoe: Shoe,
    logger: RoundLogger,
    /// Accepted actions of the round in progress
    actions: Vec<PlayerAction>,
    last_round: Option<RoundRecord>,
}

impl Engine {
    pub fn new(config: SessionConfig) -> Self {
        let table = config.table.clamped();
        let shoe = Shoe::new(table.decks_in_shoe, config.seed);
        Self::with_shoe(config, shoe)
    }

    /// Opens the table on a prepared shoe, e.g. [`Shoe::stacked`] for a fixed deal.
    pub fn with_shoe(config: SessionConfig, shoe: Shoe) -> Self {
        let state = GameState::new(config.table, config.starting_chips, config.initial_bet);
        info!(
            seed = shoe.seed(),
            decks = shoe.decks(),
            chips = config.starting_chips,
            "table opened"
        );
        Self {
            state,
            shoe,
            logger: RoundLogger::in_memory(),
            actions: Vec::new(),
            last_round: None,
        }
    }

    /// Routes settled rounds to `logger`.
    pub fn with_logger(mut self, logger: RoundLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn shoe_size(&self) -> usize {
        self.shoe.remaining()
    }

    pub fn last_round(&self) -> Option<&RoundRecord> {
        self.last_round.as_ref()
    }

    pub fn view(&self) -> TableView {
        self.state
            .view(self.shoe.remaining(), rules::legal_actions(&self.state))
    }

    pub fn place_bet(&mut self, amount: u64) -> Result<TableView, GameError> {
        self.apply(PlayerAction::Bet(amount))
    }

    pub fn hit(&mut self) -> Result<TableView, GameError> {
        self.apply(PlayerAction::Hit)
    }

    pub fn stand(&mut self) -> Result<TableView, GameError> {
        self.apply(PlayerAction::Stand)
    }

    pub fn double(&mut self) -> Result<TableView, GameError> {
        self.apply(PlayerAction::Double)
    }

    pub fn split(&mut self) -> Result<TableView, GameError> {
        self.apply(PlayerAction::Split)
    }

    pub fn next_hand(&mut self) -> Result<TableView, GameError> {
        self.apply(PlayerAction::NextHand)
    }

    /// Validates `action` against the current turn and applies it.
    pub fn apply(&mut self, action: PlayerAction) -> Result<TableView, GameError> {
        let turn = self.state.turn;
        let validated = match rules::validate_action(&self.state, action) {
            Ok(v) => v,
            Err(e) => {
                debug!(?action, %turn, reason = %e, "action refused");
                return Err(e);
            }
        };
        debug!(?action, %turn, "action accepted");

        match validated {
            ValidatedAction::Bet(stake) => {
                let requested = match action {
                    PlayerAction::Bet(amount) => amount,
                    _ => stake,
                };
                self.actions.clear();
                self.actions.push(action);
                self.deal_round(requested, stake)?;
            }
            ValidatedAction::Hit => {
                self.actions.push(action);
                self.hit_active()?;
            }
            ValidatedAction::Stand => {
                self.actions.push(action);
                self.advance_turn()?;
            }
            ValidatedAction::Double(extra) => {
                self.actions.push(action);
                self.double_active(extra)?;
            }
            ValidatedAction::Split(_) => {
                self.actions.push(action);
                self.split_pair()?;
            }
            ValidatedAction::NextHand => self.clear_round(),
        }
        Ok(self.view())
    }

    /// Applies a new table configuration and resets the round.
    ///
    /// A changed deck count rebuilds and reshuffles the shoe immediately.
    pub fn configure(&mut self, config: TableConfig) -> TableView {
        let config = config.clamped();
        let decks_changed = config.decks_in_shoe != self.state.config.decks_in_shoe;
        self.state.config = config;
        if decks_changed {
            self.shoe.rebuild_with(config.decks_in_shoe);
            info!(decks = config.decks_in_shoe, "shoe rebuilt for new deck count");
        }
        self.reset()
    }

    /// Abandons the round in progress, refunding any live bets.
    ///
    /// Also the way back from [`GameError::ShoeExhausted`]: a shoe too short
    /// to deal another round is rebuilt before betting reopens.
    pub fn reset(&mut self) -> TableView {
        let escrow = self.state.escrow();
        if escrow > 0 {
            self.state.player.refund_bets();
            debug!(escrow, "bets refunded");
        } else {
            self.state.player.clear_bets();
        }
        self.state.player.clear_cards();
        self.state.dealer.clear();
        self.actions.clear();
        if self.shoe.needs_reshuffle() {
            self.shoe.rebuild();
            info!(size = self.shoe.remaining(), "shoe reshuffled on reset");
        }
        self.state.turn = Turn::Bet;
        self.view()
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        self.shoe.draw().ok_or_else(|| {
            error!(turn = %self.state.turn, "shoe exhausted mid-round");
            GameError::ShoeExhausted
        })
    }

    fn deal_round(&mut self, requested: u64, stake: u64) -> Result<(), GameError> {
        let dealer_up = self.draw()?;
        let dealer_hole = self.draw()?;
        let first = self.draw()?;
        let second = self.draw()?;

        let player = &mut self.state.player;
        player.set_initial_bet(requested);
        player.place_bet(stake);
        player.record_winnings(0, 0);
        let hand = player.active_hand_mut(Turn::Player);
        hand.push(first);
        hand.push(second);

        let dealer = &mut self.state.dealer;
        dealer.push(dealer_up);
        dealer.push(dealer_hole);
        // the hole card stays visible when it completes a natural
        if !dealer.is_natural() {
            dealer.hide(1);
        }

        self.state.turn = Turn::Player;
        debug!(
            stake,
            player = %self.state.player.hand().score_name(),
            dealer = %self.state.dealer.score_name(),
            "round dealt"
        );
        Ok(())
    }

    fn hit_active(&mut self) -> Result<(), GameError> {
        let turn = self.state.turn;
        let card = self.draw()?;
        let hand = self.state.player.active_hand_mut(turn);
        hand.push(card);
        if hand.is_bust() {
            debug!(%turn, score = hand.score().score, "hand busted");
            self.advance_turn()?;
        }
        Ok(())
    }

    fn double_active(&mut self, extra: u64) -> Result<(), GameError> {
        let turn = self.state.turn;
        let card = self.draw()?;
        let player = &mut self.state.player;
        player.raise_active(turn, extra);
        player.active_hand_mut(turn).push(card);
        self.advance_turn()
    }

    fn split_pair(&mut self) -> Result<(), GameError> {
        let to_main = self.draw()?;
        let to_split = self.draw()?;
        let player = &mut self.state.player;
        if !player.split() {
            return Err(GameError::CannotSplit);
        }
        player.active_hand_mut(Turn::Player).push(to_main);
        player.active_hand_mut(Turn::Split).push(to_split);
        debug!(stake = player.split_bet(), "pair split");
        Ok(())
    }

    /// Ends the active hand: the split hand plays next if it has not yet,
    /// otherwise the dealer plays and the round settles.
    fn advance_turn(&mut self) -> Result<(), GameError> {
        let next = if self.state.turn == Turn::Split || !self.state.player.has_split() {
            Turn::Dealer
        } else {
            Turn::Split
        };
        self.state.turn = next;
        if next == Turn::Dealer {
            self.play_dealer()?;
        }
        Ok(())
    }

    fn play_dealer(&mut self) -> Result<(), GameError> {
        self.state.dealer.reveal_all();
        let hits_soft_17 = self.state.config.dealer_hits_soft_17;
        loop {
            let s = self.state.dealer.score();
            let hits = s.score < DEALER_STANDS_ON
                || (s.score == DEALER_STANDS_ON && s.is_soft && hits_soft_17);
            if !hits {
                break;
            }
            let card = self.draw()?;
            self.state.dealer.push(card);
        }
        info!(
            dealer = %self.state.dealer.score_name(),
            cards = self.state.dealer.len(),
            "dealer finished"
        );
        self.state.turn = Turn::Payout;
        self.settle_round();
        Ok(())
    }

    fn settle_round(&mut self) {
        let player = &self.state.player;
        let (main, split) = payout::settle(
            player.hand(),
            player.bet(),
            player.split_hand(),
            player.split_bet(),
            &self.state.dealer,
        );
        let returned = main
            .winnings
            .saturating_add(split.map_or(0, |s| s.winnings));
        let player = &mut self.state.player;
        player.add_chips(returned);
        player.record_winnings(main.net(), split.map_or(0, |s| s.net()));
        info!(
            outcome = ?main.outcome,
            split_outcome = ?split.map(|s| s.outcome),
            returned,
            chips = player.chips(),
            "round settled"
        );

        let record = RoundRecord {
            round_id: self.logger.next_id(),
            seed: self.shoe.seed(),
            actions: std::mem::take(&mut self.actions),
            dealer_hand: self.state.dealer.cards().to_vec(),
            player_hand: player.hand().cards().to_vec(),
            split_hand: player.split_hand().cards().to_vec(),
            player: main,
            split,
            chips: player.chips(),
            ts: None,
        };
        if let Err(e) = self.logger.write(&record) {
            warn!(error = %e, round = %record.round_id, "failed to write round record");
        }
        self.last_round = Some(record);

        if self.shoe.needs_reshuffle() {
            self.shoe.rebuild();
            info!(size = self.shoe.remaining(), "shoe reshuffled");
        }
    }

    fn clear_round(&mut self) {
        let player = &mut self.state.player;
        player.clamp_initial_bet();
        player.clear_cards();
        player.clear_bets();
        self.state.dealer.clear();
        self.actions.clear();
        self.state.turn = Turn::Bet;
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::config::TableConfig;
use crate::hand::{Hand, Score};
use crate::player::{ActionKind, Player};

/// Phase of the round. BET is both the initial and the re-entered state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Bet,
    Player,
    Split,
    /// Transient: the dealer plays out inside the action that entered it
    Dealer,
    Payout,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Turn::Bet => "bet",
            Turn::Player => "player",
            Turn::Split => "split",
            Turn::Dealer => "dealer",
            Turn::Payout => "payout",
        };
        f.write_str(s)
    }
}

/// Authoritative table state, owned by [`crate::engine::Engine`].
///
/// Hosts only ever see it through shared references or a [`TableView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) turn: Turn,
    pub(crate) dealer: Hand,
    pub(crate) player: Player,
    pub(crate) config: TableConfig,
}

impl GameState {
    pub fn new(config: TableConfig, chips: u64, initial_bet: u64) -> Self {
        Self {
            turn: Turn::Bet,
            dealer: Hand::new(),
            player: Player::new(chips, initial_bet),
            config: config.clamped(),
        }
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }
    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }
    pub fn player(&self) -> &Player {
        &self.player
    }
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Bets still at risk on the table.
    pub fn escrow(&self) -> u64 {
        match self.turn {
            Turn::Player | Turn::Split | Turn::Dealer => {
                self.player.bet().saturating_add(self.player.split_bet())
            }
            Turn::Bet | Turn::Payout => 0,
        }
    }

    pub fn view(&self, shoe_size: usize, legal_actions: Vec<ActionKind>) -> TableView {
        let p = &self.player;
        TableView {
            turn: self.turn,
            dealer_hand: self.dealer.cards().to_vec(),
            player_hand: p.hand().cards().to_vec(),
            split_hand: p.split_hand().cards().to_vec(),
            dealer_score: self.dealer.score(),
            player_score: p.hand().score(),
            split_score: p.split_hand().score(),
            chips: p.chips(),
            player_bet: p.bet(),
            split_bet: p.split_bet(),
            player_winnings: p.winnings(),
            split_winnings: p.split_winnings(),
            shoe_size,
            initial_bet: p.initial_bet(),
            config: self.config,
            legal_actions,
        }
    }
}

/// Read model handed back after every action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub turn: Turn,
    pub dealer_hand: Vec<Card>,
    pub player_hand: Vec<Card>,
    pub split_hand: Vec<Card>,
    pub dealer_score: Score,
    pub player_score: Score,
    pub split_score: Score,
    pub chips: u64,
    pub player_bet: u64,
    pub split_bet: u64,
    /// Net result of the last settled round
    pub player_winnings: i64,
    pub split_winnings: i64,
    pub shoe_size: usize,
    /// Amount offered at the bet prompt
    pub initial_bet: u64,
    pub config: TableConfig,
    /// Actions whose preconditions hold right now
    pub legal_actions: Vec<ActionKind>,
}

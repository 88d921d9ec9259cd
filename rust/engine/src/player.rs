use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Turn;
use crate::hand::Hand;

/// Actions a host can submit to the table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Place the opening bet and deal the round
    Bet(u64),
    /// Draw one card into the active hand
    Hit,
    /// Finish the active hand
    Stand,
    /// Double the active hand's stake, draw one card, then stand
    Double,
    /// Split a pair into two hands
    Split,
    /// Clear the settled round and return to betting
    NextHand,
}

/// Payload-free form of [`PlayerAction`], used in errors and legal action lists.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Bet,
    Hit,
    Stand,
    Double,
    Split,
    NextHand,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Bet(_) => ActionKind::Bet,
            PlayerAction::Hit => ActionKind::Hit,
            PlayerAction::Stand => ActionKind::Stand,
            PlayerAction::Double => ActionKind::Double,
            PlayerAction::Split => ActionKind::Split,
            PlayerAction::NextHand => ActionKind::NextHand,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Bet => "bet",
            ActionKind::Hit => "hit",
            ActionKind::Stand => "stand",
            ActionKind::Double => "double",
            ActionKind::Split => "split",
            ActionKind::NextHand => "next hand",
        };
        f.write_str(s)
    }
}

/// Default bankroll for a new session
pub const STARTING_CHIPS: u64 = 100;

/// Default opening bet offered at the bet prompt
pub const DEFAULT_BET: u64 = 10;

/// The seated player: bankroll, main and split hands, and the stakes riding on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Chips not currently escrowed
    chips: u64,
    /// Bet amount offered at the next bet prompt
    initial_bet: u64,
    hand: Hand,
    split_hand: Hand,
    bet: u64,
    split_bet: u64,
    /// Net result of the last settled round, per hand
    winnings: i64,
    split_winnings: i64,
}

impl Player {
    pub fn new(chips: u64, initial_bet: u64) -> Self {
        Self {
            chips,
            initial_bet,
            hand: Hand::new(),
            split_hand: Hand::new(),
            bet: 0,
            split_bet: 0,
            winnings: 0,
            split_winnings: 0,
        }
    }

    pub fn chips(&self) -> u64 {
        self.chips
    }
    pub fn initial_bet(&self) -> u64 {
        self.initial_bet
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn split_hand(&self) -> &Hand {
        &self.split_hand
    }
    pub fn bet(&self) -> u64 {
        self.bet
    }
    pub fn split_bet(&self) -> u64 {
        self.split_bet
    }
    pub fn winnings(&self) -> i64 {
        self.winnings
    }
    pub fn split_winnings(&self) -> i64 {
        self.split_winnings
    }

    pub fn has_split(&self) -> bool {
        !self.split_hand.is_empty()
    }

    /// Hand played during `turn`: the split hand on [`Turn::Split`], otherwise the main hand.
    pub fn active_hand(&self, turn: Turn) -> &Hand {
        match turn {
            Turn::Split => &self.split_hand,
            _ => &self.hand,
        }
    }

    /// Stake on the hand played during `turn`.
    pub fn active_bet(&self, turn: Turn) -> u64 {
        match turn {
            Turn::Split => self.split_bet,
            _ => self.bet,
        }
    }

    pub(crate) fn active_hand_mut(&mut self, turn: Turn) -> &mut Hand {
        match turn {
            Turn::Split => &mut self.split_hand,
            _ => &mut self.hand,
        }
    }

    pub(crate) fn set_initial_bet(&mut self, amount: u64) {
        self.initial_bet = amount;
    }

    /// Lowers the offered bet to the bankroll if it no longer fits.
    pub(crate) fn clamp_initial_bet(&mut self) {
        if self.initial_bet > self.chips {
            self.initial_bet = self.chips;
        }
    }

    /// Moves `amount` from the bankroll onto the main hand.
    pub(crate) fn place_bet(&mut self, amount: u64) {
        let amount = amount.min(self.chips);
        self.chips -= amount;
        self.bet = amount;
        self.split_bet = 0;
    }

    /// Adds `amount` to the stake of the hand played during `turn`.
    pub(crate) fn raise_active(&mut self, turn: Turn, amount: u64) {
        let amount = amount.min(self.chips);
        self.chips -= amount;
        match turn {
            Turn::Split => self.split_bet += amount,
            _ => self.bet += amount,
        }
    }

    /// Moves the second card of the main hand into the split hand and escrows
    /// a matching stake for it.
    pub(crate) fn split(&mut self) -> bool {
        let Some(card) = self.hand.take_second() else {
            return false;
        };
        self.split_hand.push(card);
        let stake = self.bet.min(self.chips);
        self.chips -= stake;
        self.split_bet = stake;
        true
    }

    pub(crate) fn add_chips(&mut self, amount: u64) {
        self.chips = self.chips.saturating_add(amount);
    }

    pub(crate) fn record_winnings(&mut self, winnings: i64, split_winnings: i64) {
        self.winnings = winnings;
        self.split_winnings = split_winnings;
    }

    /// Returns live escrow to the bankroll.
    pub(crate) fn refund_bets(&mut self) {
        let escrow = self.bet.saturating_add(self.split_bet);
        self.add_chips(escrow);
        self.bet = 0;
        self.split_bet = 0;
    }

    pub(crate) fn clear_bets(&mut self) {
        self.bet = 0;
        self.split_bet = 0;
    }

    pub(crate) fn clear_cards(&mut self) {
        self.hand.clear();
        self.split_hand.clear();
    }
}

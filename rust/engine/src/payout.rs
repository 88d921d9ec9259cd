use serde::{Deserialize, Serialize};

use crate::hand::{Hand, Score, BLACKJACK};

/// Result of one player hand against the dealer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Two-card 21 against a dealer without one, paid 3:2
    Blackjack,
    Win,
    /// Push: stake returned
    Tie,
    Lose,
}

/// Classifies `hand` against the dealer. First matching rule wins:
/// both naturals push, a lone player natural is blackjack, a player bust
/// loses even when the dealer also busts, then a dealer bust wins, then
/// totals are compared.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::Hand;
/// use blackjack_engine::payout::{classify, Outcome};
///
/// let player = Hand::from_cards(vec![
///     Card::new(Rank::Ace, Suit::Hearts, 0),
///     Card::new(Rank::King, Suit::Hearts, 0),
/// ]);
/// let dealer = Hand::from_cards(vec![
///     Card::new(Rank::Ten, Suit::Clubs, 0),
///     Card::new(Rank::Nine, Suit::Clubs, 0),
/// ]);
/// let outcome = classify(&player, player.score(), &dealer, dealer.score());
/// assert_eq!(outcome, Outcome::Blackjack);
/// ```
pub fn classify(hand: &Hand, hand_score: Score, dealer: &Hand, dealer_score: Score) -> Outcome {
    let natural = hand.len() == 2 && hand_score.score == BLACKJACK;
    let dealer_natural = dealer.len() == 2 && dealer_score.score == BLACKJACK;

    if natural && dealer_natural {
        return Outcome::Tie;
    }
    if natural {
        return Outcome::Blackjack;
    }
    if hand_score.is_bust() {
        return Outcome::Lose;
    }
    if dealer_score.is_bust() {
        return Outcome::Win;
    }
    match hand_score.score.cmp(&dealer_score.score) {
        std::cmp::Ordering::Greater => Outcome::Win,
        std::cmp::Ordering::Less => Outcome::Lose,
        std::cmp::Ordering::Equal => Outcome::Tie,
    }
}

/// Chips returned for a settled hand. The stake was already escrowed, so a
/// push returns exactly `bet` and a loss returns nothing.
///
/// Computed in `u128`; only a return beyond `u64::MAX` saturates.
pub fn winnings(outcome: Outcome, bet: u64) -> u64 {
    let bet = u128::from(bet);
    let returned = match outcome {
        Outcome::Blackjack => bet * 5 / 2,
        Outcome::Win => bet * 2,
        Outcome::Tie => bet,
        Outcome::Lose => 0,
    };
    u64::try_from(returned).unwrap_or(u64::MAX)
}

/// Profit or loss reported to the player: winnings minus stake.
pub fn net(outcome: Outcome, bet: u64) -> i64 {
    signed_difference(winnings(outcome, bet), bet)
}

fn signed_difference(returned: u64, staked: u64) -> i64 {
    let diff = i128::from(returned) - i128::from(staked);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}

/// Settlement of a single hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcome: Outcome,
    pub bet: u64,
    pub winnings: u64,
}

impl Settlement {
    pub fn new(outcome: Outcome, bet: u64) -> Self {
        Self {
            outcome,
            bet,
            winnings: winnings(outcome, bet),
        }
    }

    pub fn net(&self) -> i64 {
        signed_difference(self.winnings, self.bet)
    }
}

/// Settles the main hand and, when present, the split hand against the dealer.
pub fn settle(
    hand: &Hand,
    hand_bet: u64,
    split_hand: &Hand,
    split_bet: u64,
    dealer: &Hand,
) -> (Settlement, Option<Settlement>) {
    let dealer_score = dealer.score();
    let main = Settlement::new(classify(hand, hand.score(), dealer, dealer_score), hand_bet);
    let split = if split_hand.is_empty() {
        None
    } else {
        Some(Settlement::new(
            classify(split_hand, split_hand.score(), dealer, dealer_score),
            split_bet,
        ))
    };
    (main, split)
}

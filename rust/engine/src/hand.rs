use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Highest total a hand can reach without busting.
pub const BLACKJACK: u8 = 21;

/// Derived value of a hand.
///
/// Always recomputed from the cards, never stored on its own.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub score: u8,
    /// An ace is still counted as 11.
    pub is_soft: bool,
}

impl Score {
    pub fn is_bust(&self) -> bool {
        self.score > BLACKJACK
    }
}

/// Scores a sequence of cards.
///
/// Face-down cards are ignored. Aces start at 11 and are softened to 1 one
/// at a time while the total is over 21. The result is soft only when at
/// least one ace is still counted as 11 afterwards.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::score;
///
/// let cards = [
///     Card::new(Rank::Ace, Suit::Hearts, 0),
///     Card::new(Rank::Ace, Suit::Spades, 0),
///     Card::new(Rank::Nine, Suit::Clubs, 0),
/// ];
/// let s = score(&cards);
/// assert_eq!(s.score, 21);
/// assert!(s.is_soft);
/// ```
pub fn score(cards: &[Card]) -> Score {
    let mut total: u32 = 0;
    let mut aces: u32 = 0;
    for c in cards.iter().filter(|c| c.is_face_up()) {
        total += u32::from(c.rank().points());
        if c.rank() == Rank::Ace {
            aces += 1;
        }
    }

    let mut is_soft = aces > 0;
    if total > u32::from(BLACKJACK) {
        is_soft = false;
        for softened in 1..=aces {
            total -= 10;
            if total <= u32::from(BLACKJACK) {
                is_soft = softened < aces;
                break;
            }
        }
    }

    Score {
        score: u8::try_from(total).unwrap_or(u8::MAX),
        is_soft,
    }
}

/// Ordered cards held by the dealer, the player or the split hand.
///
/// Cards keep deal order. An empty hand is the pre-deal state.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> Score {
        score(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.score().is_bust()
    }

    /// Two cards totalling 21.
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.score().score == BLACKJACK
    }

    /// Exactly two cards of the same rank; suits are irrelevant.
    pub fn is_pair(&self) -> bool {
        match self.cards.as_slice() {
            [a, b] => a.rank() == b.rank(),
            _ => false,
        }
    }

    /// Human readable score label: `Blackjack`, `Soft 17`, `17`.
    pub fn score_name(&self) -> String {
        if self.is_natural() {
            return "Blackjack".to_string();
        }
        let s = self.score();
        if s.is_soft {
            format!("Soft {}", s.score)
        } else {
            s.score.to_string()
        }
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub(crate) fn take_second(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }

    pub(crate) fn reveal_all(&mut self) {
        for c in &mut self.cards {
            c.set_face_up(true);
        }
    }

    pub(crate) fn hide(&mut self, index: usize) {
        if let Some(c) = self.cards.get_mut(index) {
            c.set_face_up(false);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }
}

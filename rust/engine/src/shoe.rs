use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A shoe holding fewer cards than this at payout is rebuilt before the next round.
pub const RESHUFFLE_THRESHOLD: usize = 20;

pub const MIN_DECKS: u8 = 1;
pub const MAX_DECKS: u8 = 8;

/// Builds `decks` ordered 52-card decks, each card tagged with its deck index.
pub fn build(decks: u8) -> Vec<Card> {
    let mut cards = Vec::with_capacity(usize::from(decks) * 52);
    for deck in 0..decks {
        cards.extend(full_deck(deck));
    }
    cards
}

/// Multi-deck draw stack. The top of the shoe is the end of the vector.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    decks: u8,
    seed: u64,
    rng: ChaCha20Rng,
}

impl Shoe {
    /// Builds and shuffles a fresh shoe. Without a seed one is drawn at random
    /// and remains available through [`Shoe::seed`] for replay.
    pub fn new(decks: u8, seed: Option<u64>) -> Self {
        let mut shoe = Self::unshuffled(decks, seed);
        shoe.shuffle();
        shoe
    }

    /// Builds a shoe in deck order without shuffling it.
    pub fn unshuffled(decks: u8, seed: Option<u64>) -> Self {
        let decks = decks.clamp(MIN_DECKS, MAX_DECKS);
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            cards: build(decks),
            decks,
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Shoe that deals `draw_order` front to back. Rebuilds fall back to
    /// `decks` shuffled decks.
    pub fn stacked(decks: u8, draw_order: Vec<Card>, seed: u64) -> Self {
        let mut cards = draw_order;
        cards.reverse();
        Self {
            cards,
            decks: decks.clamp(MIN_DECKS, MAX_DECKS),
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Fisher-Yates over the whole shoe, walking from the end to the start.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Replaces the contents with a full shuffled shoe. The RNG stream continues.
    pub fn rebuild(&mut self) {
        self.cards = build(self.decks);
        self.shuffle();
    }

    /// Switches deck count and rebuilds.
    pub fn rebuild_with(&mut self, decks: u8) {
        self.decks = decks.clamp(MIN_DECKS, MAX_DECKS);
        self.rebuild();
    }

    /// Removes the top card. `None` only when the shoe is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn capacity(&self) -> usize {
        usize::from(self.decks) * 52
    }

    pub fn needs_reshuffle(&self) -> bool {
        self.cards.len() < RESHUFFLE_THRESHOLD
    }

    pub fn decks(&self) -> u8 {
        self.decks
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

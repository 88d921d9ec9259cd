//! # blackjack-engine: Blackjack Table Rules Engine
//!
//! The rules engine of a single-player blackjack table: shoe management,
//! hand scoring, the betting and turn state machine, and payouts. A
//! presentation layer reads the [`game::TableView`] returned by each action
//! and submits actions; it never mutates hands, shoe or chips directly.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`hand`] - Hand scoring with ace softening
//! - [`shoe`] - Multi-deck shoe with seeded ChaCha20 shuffling
//! - [`payout`] - Outcome classification and winnings
//! - [`rules`] - Action preconditions per turn
//! - [`player`] - Player actions, bankroll and hands
//! - [`game`] - Turn, game state and the read model
//! - [`engine`] - Turn state machine, dealer play and settlement
//! - [`config`] - Table and session configuration
//! - [`logger`] - Round records and JSONL round log
//! - [`logging`] - tracing subscriber setup for hosts
//! - [`errors`] - Error types for refused actions and configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::config::SessionConfig;
//! use blackjack_engine::engine::Engine;
//! use blackjack_engine::game::Turn;
//!
//! let mut engine = Engine::new(SessionConfig::default());
//! let view = engine.place_bet(10).unwrap();
//! assert_eq!(view.turn, Turn::Player);
//!
//! let view = engine.stand().unwrap();
//! assert_eq!(view.turn, Turn::Payout);
//! println!("net: {}", view.player_winnings);
//!
//! engine.next_hand().unwrap();
//! ```
//!
//! ## Refused Actions
//!
//! Actions that do not fit the current turn are refused with a
//! [`errors::GameError`] and change nothing, so every button can be wired
//! straight to an action:
//!
//! ```rust
//! use blackjack_engine::config::SessionConfig;
//! use blackjack_engine::engine::Engine;
//! use blackjack_engine::errors::GameError;
//!
//! let mut engine = Engine::new(SessionConfig::default());
//! assert!(matches!(engine.hit(), Err(GameError::NotPermitted { .. })));
//! assert_eq!(engine.view().chips, 100);
//! ```

pub mod cards;
pub mod config;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod logging;
pub mod payout;
pub mod player;
pub mod rules;
pub mod shoe;

use thiserror::Error;

use crate::game::Turn;
use crate::player::ActionKind;

/// Why an action was refused.
///
/// Every variant except [`GameError::ShoeExhausted`] is reported before any
/// state changes, so a host can attempt any action and simply ignore a refusal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("{action} is not permitted during the {turn} turn")]
    NotPermitted { action: ActionKind, turn: Turn },
    #[error("No chips left to bet")]
    NoChips,
    #[error("Insufficient chips: need {needed}, have {available}")]
    InsufficientChips { needed: u64, available: u64 },
    #[error("Hand cannot be split")]
    CannotSplit,
    #[error("Doubling after a split is disabled")]
    DoubleAfterSplitDisabled,
    /// The shoe emptied while cards were being drawn. Cards already drawn
    /// this action are lost, so the round cannot continue; call
    /// [`crate::engine::Engine::reset`] to refund live bets and restock.
    #[error("Shoe ran out of cards mid-round")]
    ShoeExhausted,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

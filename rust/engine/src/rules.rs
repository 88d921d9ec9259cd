use crate::errors::GameError;
use crate::game::{GameState, Turn};
use crate::player::{ActionKind, PlayerAction as A};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    /// Opening bet, already clamped to the bankroll
    Bet(u64),
    Hit,
    Stand,
    /// Extra stake to escrow on the active hand
    Double(u64),
    /// Stake escrowed for the new split hand
    Split(u64),
    NextHand,
}

/// Checks an action's preconditions against the current state.
///
/// Nothing is mutated here; the engine applies a [`ValidatedAction`] only
/// after this returns `Ok`, so a refused action leaves the table untouched.
///
/// # Errors
///
/// - [`GameError::NotPermitted`] - the action does not belong to the current turn
/// - [`GameError::NoChips`] - betting with an empty bankroll
/// - [`GameError::InsufficientChips`] - doubling or splitting without cover
/// - [`GameError::DoubleAfterSplitDisabled`] - doubling a split round when the table forbids it
/// - [`GameError::CannotSplit`] - the main hand is not a fresh pair, or a split already happened
///
/// # Examples
///
/// ```
/// use blackjack_engine::config::TableConfig;
/// use blackjack_engine::errors::GameError;
/// use blackjack_engine::game::GameState;
/// use blackjack_engine::player::PlayerAction;
/// use blackjack_engine::rules::{validate_action, ValidatedAction};
///
/// let state = GameState::new(TableConfig::default(), 50, 10);
///
/// // Bets are clamped to the bankroll rather than refused
/// assert_eq!(
///     validate_action(&state, PlayerAction::Bet(80)),
///     Ok(ValidatedAction::Bet(50))
/// );
///
/// // No cards have been dealt yet
/// assert!(matches!(
///     validate_action(&state, PlayerAction::Hit),
///     Err(GameError::NotPermitted { .. })
/// ));
/// ```
pub fn validate_action(state: &GameState, action: A) -> Result<ValidatedAction, GameError> {
    let turn = state.turn();
    let player = state.player();
    let not_permitted = || GameError::NotPermitted {
        action: action.kind(),
        turn,
    };

    match action {
        A::Bet(amount) => {
            if turn != Turn::Bet {
                return Err(not_permitted());
            }
            if player.chips() == 0 {
                return Err(GameError::NoChips);
            }
            Ok(ValidatedAction::Bet(amount.min(player.chips())))
        }
        A::Hit => {
            require_playing(turn).ok_or_else(not_permitted)?;
            Ok(ValidatedAction::Hit)
        }
        A::Stand => {
            require_playing(turn).ok_or_else(not_permitted)?;
            Ok(ValidatedAction::Stand)
        }
        A::Double => {
            require_playing(turn).ok_or_else(not_permitted)?;
            if player.has_split() && !state.config().allow_double_after_split {
                return Err(GameError::DoubleAfterSplitDisabled);
            }
            let extra = player.active_bet(turn);
            if player.chips() < extra {
                return Err(GameError::InsufficientChips {
                    needed: extra,
                    available: player.chips(),
                });
            }
            Ok(ValidatedAction::Double(extra))
        }
        A::Split => {
            if turn != Turn::Player {
                return Err(not_permitted());
            }
            if player.has_split() || !player.hand().is_pair() {
                return Err(GameError::CannotSplit);
            }
            if player.chips() < player.bet() {
                return Err(GameError::InsufficientChips {
                    needed: player.bet(),
                    available: player.chips(),
                });
            }
            Ok(ValidatedAction::Split(player.bet()))
        }
        A::NextHand => {
            if turn != Turn::Payout {
                return Err(not_permitted());
            }
            Ok(ValidatedAction::NextHand)
        }
    }
}

fn require_playing(turn: Turn) -> Option<()> {
    matches!(turn, Turn::Player | Turn::Split).then_some(())
}

/// Actions that would currently pass [`validate_action`].
pub fn legal_actions(state: &GameState) -> Vec<ActionKind> {
    let candidates = [
        A::Bet(state.player().initial_bet()),
        A::Hit,
        A::Stand,
        A::Double,
        A::Split,
        A::NextHand,
    ];
    candidates
        .into_iter()
        .filter(|a| validate_action(state, *a).is_ok())
        .map(|a| a.kind())
        .collect()
}

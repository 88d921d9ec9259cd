use blackjack_engine::cards::{Card, Rank as R, Suit as S};
use blackjack_engine::config::{SessionConfig, TableConfig};
use blackjack_engine::engine::Engine;
use blackjack_engine::errors::GameError;
use blackjack_engine::game::Turn;
use blackjack_engine::payout::Outcome;
use blackjack_engine::player::{ActionKind, PlayerAction};
use blackjack_engine::shoe::Shoe;

fn c(r: R) -> Card {
    Card::new(r, S::Spades, 0)
}

fn table(h17: bool, das: bool) -> SessionConfig {
    SessionConfig {
        table: TableConfig {
            decks_in_shoe: 1,
            dealer_hits_soft_17: h17,
            allow_double_after_split: das,
            ..TableConfig::default()
        },
        starting_chips: 100,
        initial_bet: 10,
        seed: Some(1),
    }
}

/// Deal order: dealer up, dealer hole, player, player, then draws.
fn engine_with(config: SessionConfig, order: &[R]) -> Engine {
    let cards = order.iter().map(|&r| c(r)).collect();
    Engine::with_shoe(config, Shoe::stacked(1, cards, 11))
}

#[test]
fn stand_on_nineteen_beats_dealer_seventeen() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::Ten, R::Nine]);
    let view = eng.place_bet(10).expect("bet");
    assert_eq!(view.turn, Turn::Player);
    assert_eq!(view.chips, 90);
    assert_eq!(view.player_bet, 10);

    let view = eng.stand().expect("stand");
    assert_eq!(view.turn, Turn::Payout);
    assert_eq!(view.chips, 110);
    assert_eq!(view.player_winnings, 10);
    assert_eq!(view.split_winnings, 0);
    assert_eq!(view.legal_actions, vec![ActionKind::NextHand]);
}

#[test]
fn dealer_hole_card_is_hidden_until_dealer_plays() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::Ten, R::Nine]);
    let view = eng.place_bet(10).unwrap();
    assert!(view.dealer_hand[0].is_face_up());
    assert!(!view.dealer_hand[1].is_face_up());
    assert_eq!(view.dealer_score.score, 10);

    let view = eng.stand().unwrap();
    assert!(view.dealer_hand.iter().all(|c| c.is_face_up()));
    assert_eq!(view.dealer_score.score, 17);
}

#[test]
fn dealer_natural_is_dealt_face_up() {
    let mut eng = engine_with(table(false, true), &[R::Ace, R::King, R::Ten, R::Nine]);
    let view = eng.place_bet(10).unwrap();
    assert!(view.dealer_hand[1].is_face_up());
    assert_eq!(view.dealer_score.score, 21);
}

#[test]
fn bust_ends_the_hand_and_settles() {
    let mut eng = engine_with(
        table(false, true),
        &[R::Ten, R::Seven, R::Ten, R::Six, R::King],
    );
    eng.place_bet(10).unwrap();
    let view = eng.hit().expect("hit");
    assert_eq!(view.player_score.score, 26);
    assert_eq!(view.turn, Turn::Payout);
    assert_eq!(view.chips, 90);
    assert_eq!(view.player_winnings, -10);
    assert_eq!(
        eng.last_round().map(|r| r.player.outcome),
        Some(Outcome::Lose)
    );
}

#[test]
fn dealer_stands_on_soft_seventeen_without_h17() {
    let mut eng = engine_with(
        table(false, true),
        &[R::Ace, R::Six, R::Ten, R::Eight, R::Four],
    );
    eng.place_bet(10).unwrap();
    let view = eng.stand().unwrap();
    assert_eq!(view.dealer_hand.len(), 2);
    assert_eq!(view.dealer_score.score, 17);
    assert!(view.dealer_score.is_soft);
    assert_eq!(view.chips, 110);
}

#[test]
fn dealer_hits_soft_seventeen_with_h17() {
    let mut eng = engine_with(
        table(true, true),
        &[R::Ace, R::Six, R::Ten, R::Eight, R::Four],
    );
    eng.place_bet(10).unwrap();
    let view = eng.stand().unwrap();
    assert_eq!(view.dealer_hand.len(), 3);
    assert_eq!(view.dealer_score.score, 21);
    assert_eq!(view.chips, 90);
}

#[test]
fn dealer_stands_on_hard_seventeen_with_h17() {
    let mut eng = engine_with(
        table(true, true),
        &[R::Ten, R::Seven, R::Ten, R::Eight, R::Four],
    );
    eng.place_bet(10).unwrap();
    let view = eng.stand().unwrap();
    assert_eq!(view.dealer_hand.len(), 2);
    assert_eq!(view.chips, 110);
}

#[test]
fn natural_pays_three_to_two() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::Ace, R::King]);
    eng.place_bet(10).unwrap();
    let view = eng.stand().unwrap();
    assert_eq!(view.chips, 115);
    assert_eq!(view.player_winnings, 15);
}

#[test]
fn two_naturals_push() {
    let mut eng = engine_with(table(false, true), &[R::Ace, R::King, R::Ace, R::Queen]);
    eng.place_bet(10).unwrap();
    let view = eng.stand().unwrap();
    assert_eq!(view.chips, 100);
    assert_eq!(view.player_winnings, 0);
}

#[test]
fn split_then_double_then_stand() {
    let mut eng = engine_with(
        table(false, true),
        &[
            R::Ten,
            R::Seven,
            R::Eight,
            R::Eight,
            R::Three, // main hand after split
            R::Ten,   // split hand after split
            R::Ten,   // main hand double
        ],
    );
    eng.place_bet(10).unwrap();

    let view = eng.split().expect("split");
    assert_eq!(view.turn, Turn::Player);
    assert_eq!(view.player_hand.len(), 2);
    assert_eq!(view.split_hand.len(), 2);
    assert_eq!(view.player_score.score, 11);
    assert_eq!(view.split_score.score, 18);
    assert_eq!(view.split_bet, 10);
    assert_eq!(view.chips, 80);
    assert!(!view.legal_actions.contains(&ActionKind::Split));

    let view = eng.double().expect("double");
    assert_eq!(view.turn, Turn::Split);
    assert_eq!(view.player_bet, 20);
    assert_eq!(view.player_score.score, 21);
    assert_eq!(view.chips, 70);

    let view = eng.stand().expect("stand split hand");
    assert_eq!(view.turn, Turn::Payout);
    assert_eq!(view.player_winnings, 20);
    assert_eq!(view.split_winnings, 10);
    assert_eq!(view.chips, 130);
}

#[test]
fn busting_the_split_hand_settles_the_round() {
    let mut eng = engine_with(
        table(false, true),
        &[
            R::Ten,
            R::Seven,
            R::Eight,
            R::Eight,
            R::Three,
            R::Five,
            R::King, // split hand hit
        ],
    );
    eng.place_bet(10).unwrap();
    eng.split().unwrap();
    let view = eng.stand().unwrap();
    assert_eq!(view.turn, Turn::Split);

    let view = eng.hit().expect("hit split hand");
    assert!(view.split_score.is_bust());
    assert_eq!(view.turn, Turn::Payout);
    assert_eq!(view.dealer_score.score, 17);
    assert_eq!(view.player_winnings, -10);
    assert_eq!(view.split_winnings, -10);
    assert_eq!(view.chips, 80);
    assert_eq!(view.legal_actions, vec![ActionKind::NextHand]);
}

#[test]
fn doubling_the_split_hand_raises_the_split_bet() {
    let mut eng = engine_with(
        table(false, true),
        &[
            R::Ten,
            R::Seven,
            R::Eight,
            R::Eight,
            R::Three,
            R::Three,
            R::Ten, // split hand double
        ],
    );
    eng.place_bet(10).unwrap();
    eng.split().unwrap();
    eng.stand().unwrap();

    let view = eng.double().expect("double split hand");
    assert_eq!(view.turn, Turn::Payout);
    assert_eq!(view.split_hand.len(), 3);
    assert_eq!(view.split_score.score, 21);
    assert_eq!(view.player_bet, 10);
    assert_eq!(view.split_bet, 20);
    // main 11 loses to 17, doubled split 21 wins
    assert_eq!(view.player_winnings, -10);
    assert_eq!(view.split_winnings, 20);
    assert_eq!(view.chips, 110);
}

#[test]
fn double_without_cover_is_refused() {
    let config = SessionConfig {
        starting_chips: 15,
        ..table(false, true)
    };
    let mut eng = engine_with(config, &[R::Ten, R::Seven, R::Five, R::Six, R::Ten]);
    let view = eng.place_bet(10).unwrap();
    assert_eq!(view.chips, 5);
    assert!(!view.legal_actions.contains(&ActionKind::Double));

    let before = eng.view();
    assert_eq!(
        eng.double(),
        Err(GameError::InsufficientChips {
            needed: 10,
            available: 5
        })
    );
    assert_eq!(eng.view(), before);
}

#[test]
fn double_draws_one_card_and_settles() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::Five, R::Six, R::Ten]);
    eng.place_bet(10).unwrap();

    let view = eng.double().expect("double");
    assert_eq!(view.turn, Turn::Payout);
    assert_eq!(view.player_hand.len(), 3);
    assert_eq!(view.player_score.score, 21);
    assert_eq!(view.player_bet, 20);
    assert_eq!(view.split_bet, 0);
    assert!(view.split_hand.is_empty());
    assert_eq!(view.player_winnings, 20);
    assert_eq!(view.chips, 120);
}

#[test]
fn large_bankroll_natural_pays_in_full() {
    let config = SessionConfig {
        starting_chips: 2_000_000_000,
        initial_bet: 1_000_000_000,
        ..table(false, true)
    };
    let mut eng = engine_with(config, &[R::Ten, R::Nine, R::Ace, R::King]);
    eng.place_bet(1_000_000_000).unwrap();
    let view = eng.stand().unwrap();
    assert_eq!(view.player_winnings, 1_500_000_000);
    assert_eq!(view.chips, 3_500_000_000);
}

#[test]
fn reset_recovers_from_an_exhausted_shoe() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::Ten, R::Two, R::Three]);
    eng.place_bet(10).unwrap();
    eng.hit().unwrap();
    assert_eq!(eng.shoe_size(), 0);
    assert_eq!(eng.hit(), Err(GameError::ShoeExhausted));

    let view = eng.reset();
    assert_eq!(view.turn, Turn::Bet);
    assert_eq!(view.chips, 100);
    assert_eq!(view.shoe_size, 52);

    let view = eng.place_bet(10).expect("betting reopens");
    assert_eq!(view.turn, Turn::Player);
    assert_eq!(view.player_hand.len(), 2);
}

#[test]
fn busting_the_main_hand_moves_to_the_split_hand() {
    let mut eng = engine_with(
        table(false, true),
        &[
            R::Ten,
            R::Seven,
            R::Eight,
            R::Eight,
            R::Five,
            R::Nine,
            R::King,
        ],
    );
    eng.place_bet(10).unwrap();
    eng.split().unwrap();
    let view = eng.hit().unwrap();
    assert!(view.player_score.is_bust());
    assert_eq!(view.turn, Turn::Split);

    let view = eng.stand().unwrap();
    assert_eq!(view.turn, Turn::Payout);
    assert_eq!(view.player_winnings, -10);
    // split 17 against dealer 17
    assert_eq!(view.split_winnings, 0);
    assert_eq!(view.chips, 90);
}

#[test]
fn split_needs_matching_ranks() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::King, R::Ten]);
    eng.place_bet(10).unwrap();
    let before = eng.view();
    assert_eq!(eng.split(), Err(GameError::CannotSplit));
    assert_eq!(eng.view(), before);
}

#[test]
fn split_needs_chips_to_cover_second_bet() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::Eight, R::Eight]);
    eng.place_bet(80).unwrap();
    assert_eq!(
        eng.split(),
        Err(GameError::InsufficientChips {
            needed: 80,
            available: 20
        })
    );
}

#[test]
fn double_after_split_can_be_disabled() {
    let mut eng = engine_with(
        table(false, false),
        &[R::Ten, R::Seven, R::Eight, R::Eight, R::Three, R::Ten],
    );
    eng.place_bet(10).unwrap();
    eng.split().unwrap();
    assert_eq!(eng.double(), Err(GameError::DoubleAfterSplitDisabled));
    assert!(!eng.view().legal_actions.contains(&ActionKind::Double));
}

#[test]
fn actions_outside_their_turn_are_refused_without_side_effects() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::Ten, R::Nine]);
    let before = eng.view();
    for action in [
        PlayerAction::Hit,
        PlayerAction::Stand,
        PlayerAction::Double,
        PlayerAction::Split,
        PlayerAction::NextHand,
    ] {
        let err = eng.apply(action).unwrap_err();
        assert!(matches!(err, GameError::NotPermitted { turn: Turn::Bet, .. }));
        assert_eq!(eng.view(), before);
    }

    eng.place_bet(10).unwrap();
    assert!(matches!(
        eng.place_bet(10),
        Err(GameError::NotPermitted { turn: Turn::Player, .. })
    ));
}

#[test]
fn bet_is_clamped_to_chips() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::Ten, R::Nine]);
    let view = eng.place_bet(500).unwrap();
    assert_eq!(view.player_bet, 100);
    assert_eq!(view.chips, 0);
    assert_eq!(view.initial_bet, 500);
}

#[test]
fn next_hand_clamps_offered_bet_and_clears_the_table() {
    let mut eng = engine_with(
        table(false, true),
        &[R::Ten, R::Seven, R::Ten, R::Six, R::King],
    );
    eng.place_bet(100).unwrap();
    let view = eng.hit().unwrap();
    assert_eq!(view.chips, 0);
    assert_eq!(view.initial_bet, 100);

    let view = eng.next_hand().unwrap();
    assert_eq!(view.turn, Turn::Bet);
    assert_eq!(view.initial_bet, 0);
    assert!(view.player_hand.is_empty());
    assert!(view.dealer_hand.is_empty());
    assert_eq!(view.player_bet, 0);
    assert!(view.legal_actions.is_empty());
    assert_eq!(eng.place_bet(10), Err(GameError::NoChips));
}

#[test]
fn configure_mid_round_refunds_live_bets() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::Eight, R::Eight, R::Two, R::Three]);
    eng.place_bet(10).unwrap();
    eng.split().unwrap();
    assert_eq!(eng.view().chips, 80);

    let view = eng.configure(TableConfig {
        decks_in_shoe: 1,
        dealer_hits_soft_17: true,
        ..TableConfig::default()
    });
    assert_eq!(view.turn, Turn::Bet);
    assert_eq!(view.chips, 100);
    assert!(view.player_hand.is_empty());
    assert!(view.split_hand.is_empty());
    assert!(view.config.dealer_hits_soft_17);
}

#[test]
fn configure_after_settlement_does_not_mint_chips() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::Ten, R::Nine]);
    eng.place_bet(10).unwrap();
    eng.stand().unwrap();
    assert_eq!(eng.view().chips, 110);
    let view = eng.reset();
    assert_eq!(view.chips, 110);
}

#[test]
fn changing_deck_count_rebuilds_the_shoe() {
    let mut eng = Engine::new(SessionConfig {
        seed: Some(5),
        ..SessionConfig::default()
    });
    assert_eq!(eng.shoe_size(), 6 * 52);
    eng.place_bet(10).unwrap();

    let view = eng.configure(TableConfig {
        decks_in_shoe: 2,
        ..TableConfig::default()
    });
    assert_eq!(view.shoe_size, 104);

    let view = eng.configure(TableConfig {
        decks_in_shoe: 12,
        ..TableConfig::default()
    });
    assert_eq!(view.config.decks_in_shoe, 8);
    assert_eq!(view.shoe_size, 8 * 52);
}

#[test]
fn round_record_tracks_actions_and_outcome() {
    let mut eng = engine_with(table(false, true), &[R::Ten, R::Seven, R::Two, R::Three, R::Five]);
    eng.place_bet(10).unwrap();
    eng.hit().unwrap();
    eng.stand().unwrap();

    let rec = eng.last_round().expect("round recorded");
    assert_eq!(
        rec.actions,
        vec![PlayerAction::Bet(10), PlayerAction::Hit, PlayerAction::Stand]
    );
    assert_eq!(rec.player.outcome, Outcome::Lose);
    assert_eq!(rec.player_hand.len(), 3);
    assert!(rec.split.is_none());
    assert_eq!(rec.chips, 90);
    assert_eq!(rec.seed, 11);
}

use holdem_engine::errors::GameError;
use holdem_engine::game::{Action, GameState, Street};
use holdem_engine::pot::PotManager;
use holdem_engine::rules::{validate_action, Blinds, ValidatedAction};

const BLINDS: Blinds = Blinds { small: 1, big: 2 };

#[test]
fn bet_zero_is_invalid() {
    let mut g = GameState::new(vec![100, 100], BLINDS).unwrap();
    g.call().unwrap();
    g.check().unwrap();
    assert_eq!(g.street(), Street::Flop);
    let p = g.current_player().unwrap();
    match validate_action(&g, &Action::bet_raise(p, 0)).unwrap_err() {
        GameError::InvalidBetAmount { minimum: 2, .. } => {}
        other => panic!("expected InvalidBetAmount, got {other:?}"),
    }
}

#[test]
fn opening_bet_on_the_flop() {
    let mut g = GameState::new(vec![100, 100], BLINDS).unwrap();
    g.call().unwrap();
    g.check().unwrap();
    assert_eq!(
        validate_action(&g, &Action::bet_raise(1, 8)),
        Ok(ValidatedAction::Bet { to: 8, added: 8 })
    );
}

#[test]
fn folding_twice_is_rejected() {
    let mut g = GameState::new(vec![200, 200, 200], BLINDS).unwrap();
    g.apply(Action::fold(2)).unwrap();
    let before = g.clone();
    assert_eq!(g.apply(Action::fold(2)), Err(GameError::PlayerAlreadyFolded));
    assert_eq!(g, before);
}

#[test]
fn acting_out_of_turn_is_rejected() {
    let mut g = GameState::new(vec![200, 200, 200], BLINDS).unwrap();
    assert_eq!(
        g.apply(Action::check_call(1)),
        Err(GameError::NotPlayersTurn {
            expected: 2,
            actual: 1
        })
    );
}

#[test]
fn short_all_in_does_not_reopen_raising() {
    let mut g = GameState::new(vec![200, 200, 200, 13], BLINDS).unwrap();
    g.apply(Action::bet_raise(2, 10)).unwrap();
    // Seat 3 shoves 13: three more than the bet, short of a full raise.
    let rec = g.all_in().unwrap();
    assert!(rec.all_in);
    assert_eq!(g.current_bet(), 13);
    // The blinds have not acted yet and may still raise.
    assert!(g.may_raise(0));
    g.call().unwrap();
    g.call().unwrap();
    assert_eq!(g.current_player(), Some(2));
    assert!(!g.may_raise(2));
    assert_eq!(g.bet_raise(40), Err(GameError::RaiseNotReopened));
    assert_eq!(g.call().unwrap().added, 3);
    assert_eq!(g.street(), Street::Flop);
}

#[test]
fn full_raise_reopens_for_everyone() {
    let mut g = GameState::new(vec![200, 200, 200], BLINDS).unwrap();
    g.bet_raise(6).unwrap();
    g.bet_raise(10).unwrap();
    assert_eq!(g.min_raise_to(), 14);
    assert!(g.may_raise(2));
}

#[test]
fn raising_without_anyone_to_respond_is_rejected() {
    let mut g = GameState::new(vec![100, 50], BLINDS).unwrap();
    g.all_in().unwrap();
    assert_eq!(g.current_player(), Some(1));
    assert_eq!(g.bet_raise(50), Err(GameError::NoOpponentToRaise));
    let rec = g.call().unwrap();
    assert_eq!(rec.added, 48);
    assert!(rec.all_in);
    assert!(g.is_over());
}

#[test]
fn short_big_blind_still_prices_the_full_blind() {
    // Seat 1 has one chip and posts it as a short big blind.
    let mut g = GameState::new(vec![200, 1, 200], BLINDS).unwrap();
    assert_eq!(g.blind_posts(), [(0, 1), (1, 1)]);
    assert!(g.is_all_in(1));
    assert_eq!(g.current_bet(), 2);
    assert_eq!(g.current_player(), Some(2));
    assert_eq!(g.to_call(2), 2);
    assert_eq!(g.call().unwrap().added, 2);
    assert_eq!(g.to_call(0), 1);
    assert_eq!(g.call().unwrap().added, 1);
    assert_eq!(g.street(), Street::Flop);
    assert_eq!(g.contributions(), &[2, 1, 2]);
}

#[test]
fn short_big_blind_excess_is_returned_heads_up() {
    let mut g = GameState::new(vec![100, 1], BLINDS).unwrap();
    assert_eq!(g.current_player(), Some(0));
    assert_eq!(g.to_call(0), 1);
    assert_eq!(g.bet_raise(10), Err(GameError::NoOpponentToRaise));
    g.call().unwrap();
    assert!(g.is_over());
    let pm = PotManager::new(g.contributions(), &[false, false]);
    assert_eq!(pm.main_pot(), 2);
    assert_eq!(pm.uncalled(), Some((0, 1)));
}

#[test]
fn call_with_insufficient_stack_is_all_in_call() {
    let mut g = GameState::new(vec![300, 60, 300], BLINDS).unwrap();
    g.bet_raise(100).unwrap();
    g.fold().unwrap();
    assert_eq!(
        g.validate(&Action::check_call(1)),
        Ok(ValidatedAction::AllIn { to: 60, added: 58 })
    );
}

#[test]
fn actions_after_the_hand_are_rejected() {
    let mut g = GameState::new(vec![100, 100], BLINDS).unwrap();
    g.fold().unwrap();
    assert!(g.is_over());
    assert_eq!(
        g.apply(Action::check_call(1)),
        Err(GameError::HandAlreadyComplete)
    );
}

use std::collections::HashSet;

use holdem_engine::cards::{Card, FullDeal};
use holdem_engine::deck::Deck;
use holdem_engine::errors::DealError;

#[test]
fn deck_reset_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    deck.reset();
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.deal_card().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(
        deck.deal_card().is_none(),
        "after 52 cards, deck should be empty"
    );
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.deal_card().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal_card().unwrap()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.deal_card().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal_card().unwrap()).collect();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn consecutive_deals_from_one_stream_differ() {
    let mut deck = Deck::new_with_seed(777);
    let first = deck.deal_full(2).unwrap();
    let second = deck.deal_full(2).unwrap();
    assert_ne!(first, second);
}

#[test]
fn full_deal_cards_are_pairwise_distinct() {
    for seed in 0..50 {
        let deal = Deck::new_with_seed(seed).deal_full(10).unwrap();
        let mut set = HashSet::new();
        for h in deal.hole_cards() {
            for c in h.cards() {
                assert!(set.insert(c));
            }
        }
        for c in deal.board().cards() {
            assert!(set.insert(c));
        }
        assert_eq!(set.len(), 25);
    }
}

#[test]
fn full_deal_rejects_shared_cards() {
    let err = FullDeal::new(
        vec!["AcKd".parse().unwrap(), "AcQh".parse().unwrap()],
        "2c3d4h5s9c".parse().unwrap(),
    )
    .unwrap_err();
    assert_eq!(err, DealError::DuplicateCard("Ac".parse().unwrap()));

    let err = FullDeal::new(
        vec!["AcKd".parse().unwrap(), "7c7h".parse().unwrap()],
        "2c3d4h".parse().unwrap(),
    )
    .unwrap_err();
    assert_eq!(err, DealError::IncompleteBoard(3));
}

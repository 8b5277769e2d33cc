//! # holdem-engine: No-Limit Hold'em Rules Engine
//!
//! Card model, hand evaluation, equity estimation, the per-hand betting state
//! machine and showdown resolution with side pots, for 2 to 10 seats.
//! Everything here is pure computation; randomness comes from seeded ChaCha20
//! streams so every deal and simulation is reproducible.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card, HoleCards, Board and FullDeal with text notation
//! - [`deck`] - Deterministic deck shuffling and dealing
//! - [`hand`] - Hand evaluation and strength comparison
//! - [`odds`] - Monte-Carlo and exhaustive equity estimation
//! - [`game`] - Betting state machine, actions and the read-only GameView
//! - [`rules`] - Action legality and blind structure
//! - [`pot`] - Main pot and side pot layering
//! - [`showdown`] - Settles a finished hand into per-seat rewards
//! - [`engine`] - Multi-hand table session with rotating button
//! - [`logger`] - HandRecord serialization to JSONL
//! - [`errors`] - Error types for every fallible operation
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate_hand, Category};
//!
//! let cards = parse_cards("AhKhQhJhTh2c3d").unwrap();
//! let strength = evaluate_hand(&cards);
//! assert_eq!(strength.category, Category::StraightFlush);
//! ```
//!
//! ## Playing a Hand
//!
//! ```rust
//! use holdem_engine::cards::FullDeal;
//! use holdem_engine::game::GameState;
//! use holdem_engine::rules::Blinds;
//! use holdem_engine::showdown::resolve;
//!
//! let deal = FullDeal::new(
//!     vec!["AhKs".parse().unwrap(), "7c2d".parse().unwrap(), "5h5c".parse().unwrap()],
//!     "KdJs3d7s6s".parse().unwrap(),
//! )
//! .unwrap();
//! let mut state = GameState::new(vec![200, 200, 200], Blinds { small: 1, big: 2 }).unwrap();
//!
//! state.bet_raise(10).unwrap(); // seat 2 opens
//! state.fold().unwrap();
//! state.fold().unwrap();
//!
//! let results = resolve(&state, &deal).unwrap();
//! assert_eq!(results.rewards, vec![-1, -2, 3]);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod odds;
pub mod pot;
pub mod rules;
pub mod showdown;

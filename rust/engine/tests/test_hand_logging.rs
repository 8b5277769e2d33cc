use std::fs;
use std::path::PathBuf;

use holdem_engine::cards::FullDeal;
use holdem_engine::engine::Engine;
use holdem_engine::game::{Action, GameState};
use holdem_engine::logger::{format_hand_id, HandLogger, HandRecord};
use holdem_engine::rules::Blinds;
use holdem_engine::showdown::resolve;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn folded_hand() -> HandRecord {
    let deal = FullDeal::new(
        vec!["AhKs".parse().unwrap(), "7c2d".parse().unwrap()],
        "KdJs3d7s6s".parse().unwrap(),
    )
    .unwrap();
    let mut g = GameState::new(vec![100, 100], Blinds { small: 1, big: 2 }).unwrap();
    g.apply(Action::bet_raise(0, 6)).unwrap();
    g.apply(Action::check_call(1)).unwrap();
    g.apply(Action::bet_raise(1, 10)).unwrap();
    g.apply(Action::fold(0)).unwrap();
    let results = resolve(&g, &deal).unwrap();
    HandRecord::from_hand("20250102-000001".to_string(), Some(1), &g, &deal, &results)
}

#[test]
fn record_shows_only_the_board_that_was_reached() {
    let rec = folded_hand();
    assert_eq!(rec.board.len(), 3);
    assert_eq!(rec.rewards, vec![-6, 6]);
    assert_eq!(rec.actions.len(), 4);
    assert_eq!(rec.result.as_deref(), Some("seat 1 wins 22 uncontested"));
    assert!(rec.showdown.is_none());
}

#[test]
fn hand_record_serializes_and_deserializes() {
    let rec = folded_hand();
    let s = serde_json::to_string(&rec).expect("serialize");
    assert!(s.contains("\"move\":\"BetRaise\""));
    let back: HandRecord = serde_json::from_str(&s).expect("deserialize");
    assert_eq!(rec, back);
}

#[test]
fn writes_jsonl_with_lf_only() {
    let path = tmp_path("handlog");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&folded_hand()).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let path = tmp_path("handlog_ts");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let rec = folded_hand();
    logger.write(&rec).expect("write");
    let line = String::from_utf8(fs::read(&path).unwrap()).unwrap();
    assert!(line.contains("\"ts\":\""), "ts should be injected");

    let preset = "2030-01-01T00:00:00Z".to_string();
    let rec2 = HandRecord {
        ts: Some(preset.clone()),
        ..rec
    };
    logger.write(&rec2).expect("write2");
    let content = String::from_utf8(fs::read(&path).unwrap()).unwrap();
    assert!(content.contains(&preset), "preset ts must be kept");
}

#[test]
fn showdown_record_names_the_winning_category() {
    let mut engine = Engine::new(Some(3), 1, vec![100, 100]).unwrap();
    let (deal, mut g) = engine.deal_hand().unwrap();
    while !g.is_over() {
        g.call().unwrap();
    }
    let results = resolve(&g, &deal).unwrap();
    let rec = HandRecord::from_hand(format_hand_id("20251231", 42), Some(3), &g, &deal, &results);
    assert_eq!(rec.hand_id, "20251231-000042");
    assert_eq!(rec.board.len(), 5);
    let info = rec.showdown.expect("hand went to showdown");
    assert!(!info.winners.is_empty());
    assert!(info.notes.is_some());
}

use serde_json::Value;
use std::io::Write;
use std::sync::{Mutex, OnceLock};

const VARS: &[&str] = &[
    "HOLDEM_CONFIG",
    "HOLDEM_SEED",
    "HOLDEM_LEVEL",
    "HOLDEM_PLAYERS",
    "HOLDEM_STACK",
    "HOLDEM_TRIALS",
];

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn clear_env() {
    for var in VARS {
        unsafe {
            std::env::remove_var(var);
        }
    }
}

fn cfg() -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = holdem_cli::run(["holdem", "cfg"], &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn defaults_when_nothing_is_set() {
    let _guard = env_lock().lock().unwrap();
    clear_env();

    let (code, stdout, _) = cfg();
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["level"]["value"].as_u64(), Some(1));
    assert_eq!(json["level"]["source"].as_str(), Some("default"));
    assert!(json["seed"]["value"].is_null());
}

#[test]
fn env_beats_file_and_flags_beat_env() {
    let _guard = env_lock().lock().unwrap();
    clear_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = 456\nplayers = 3\nstarting_stack = 500").unwrap();
    unsafe {
        std::env::set_var("HOLDEM_CONFIG", file.path());
    }
    let (code, stdout, _) = cfg();
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["seed"]["value"].as_u64(), Some(456));
    assert_eq!(json["seed"]["source"].as_str(), Some("file"));
    assert_eq!(json["players"]["value"].as_u64(), Some(3));

    unsafe {
        std::env::set_var("HOLDEM_SEED", "123");
    }
    let (_, stdout, _) = cfg();
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["seed"]["value"].as_u64(), Some(123));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));

    // The configured table size applies unless --players says otherwise.
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = holdem_cli::run(["holdem", "deal"], &mut out, &mut err);
    assert_eq!(code, 0);
    let dealt = String::from_utf8(out).unwrap();
    assert!(dealt.starts_with("Seed: 123\n"));
    assert!(dealt.contains("Seat 2: "));

    let mut out = Vec::new();
    let code = holdem_cli::run(
        ["holdem", "deal", "--players", "2", "--seed", "1"],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0);
    let dealt = String::from_utf8(out).unwrap();
    assert!(dealt.starts_with("Seed: 1\n"));
    assert!(!dealt.contains("Seat 2: "));

    clear_env();
}

#[test]
fn invalid_env_value_fails_every_command() {
    let _guard = env_lock().lock().unwrap();
    clear_env();
    unsafe {
        std::env::set_var("HOLDEM_PLAYERS", "1");
    }

    let (code, stdout, stderr) = cfg();
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("players must be between 2 and 10"));

    clear_env();
}

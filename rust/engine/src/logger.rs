use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::{Card, FullDeal, HoleCards};
use crate::game::{ActionRecord, GameState, Street};
use crate::rules::Blinds;
use crate::showdown::{GameResults, PotAward};

/// Complete record of a played hand: setup, every action, the cards that were
/// seen and the outcome. Serialized one per line (JSONL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Seed of the deck stream that dealt the hand
    pub seed: Option<u64>,
    pub button: usize,
    pub blinds: Blinds,
    pub starting_stacks: Vec<u32>,
    pub hole_cards: Vec<HoleCards>,
    /// Chronological list of all player actions
    pub actions: Vec<ActionRecord>,
    /// Community cards up to the street the hand reached
    pub board: Vec<Card>,
    pub rewards: Vec<i64>,
    /// Pot layers and their winners
    #[serde(default)]
    pub pots: Vec<PotAward>,
    /// Short outcome summary
    pub result: Option<String>,
    /// Timestamp when the hand was written (RFC3339)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

/// Who won at showdown and with what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub winners: Vec<usize>,
    /// Category name of the best hand, e.g. "Full House"
    #[serde(default)]
    pub notes: Option<String>,
}

impl HandRecord {
    pub fn from_hand(
        hand_id: String,
        seed: Option<u64>,
        state: &GameState,
        deal: &FullDeal,
        results: &GameResults,
    ) -> Self {
        let reached = match &results.showdown {
            Some(_) => Street::River,
            None => state
                .history()
                .last()
                .map_or(Street::Preflop, |rec| rec.street),
        };
        let winners = results.winners();
        let result = match (&results.showdown, winners.as_slice()) {
            (None, [w]) => Some(format!("seat {w} wins {} uncontested", state.pot())),
            (Some(_), [w]) => Some(format!("seat {w} wins at showdown")),
            (Some(_), ws) => Some(format!("split between seats {ws:?}")),
            (None, _) => None,
        };
        let showdown = results.showdown.as_ref().map(|entries| ShowdownInfo {
            winners: winners.clone(),
            notes: entries.first().map(|e| e.strength.category.to_string()),
        });
        Self {
            hand_id,
            seed,
            button: state.button(),
            blinds: state.blinds(),
            starting_stacks: state.starting_stacks().to_vec(),
            hole_cards: deal.hole_cards().to_vec(),
            actions: state.history().to_vec(),
            board: deal.board().visible_at(reached).cards(),
            rewards: results.rewards.clone(),
            pots: results.pots.clone(),
            result,
            ts: None,
            meta: None,
            showdown,
        }
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends [`HandRecord`]s to a JSONL file, numbering hands by date.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that numbers hands but writes nothing.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::payout::Settlement;
use crate::player::PlayerAction;

/// Complete record of one settled round.
/// Serialized to JSONL for round history and audit.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Identifier in `YYYYMMDD-NNNNNN` form
    pub round_id: String,
    /// Seed of the shoe the round was dealt from
    pub seed: u64,
    /// Accepted actions in the order they were applied
    pub actions: Vec<PlayerAction>,
    pub dealer_hand: Vec<Card>,
    pub player_hand: Vec<Card>,
    #[serde(default)]
    pub split_hand: Vec<Card>,
    pub player: Settlement,
    #[serde(default)]
    pub split: Option<Settlement>,
    /// Bankroll after settlement
    pub chips: u64,
    /// RFC3339 settlement time
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Hands out round ids and optionally appends records to a JSONL file.
#[derive(Debug)]
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl Default for RoundLogger {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: today(),
            seq: 0,
        })
    }

    /// Numbers rounds without writing them anywhere.
    pub fn in_memory() -> Self {
        Self::with_date(&today())
    }

    /// In-memory logger whose ids carry `yyyymmdd` instead of today's date.
    pub fn with_date(yyyymmdd: &str) -> Self {
        Self {
            writer: None,
            date: yyyymmdd.to_string(),
            seq: 0,
        }
    }

    /// Whether [`RoundLogger::write`] persists anything.
    pub fn has_sink(&self) -> bool {
        self.writer.is_some()
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    /// Appends `record` as one JSON line, stamping `ts` when unset.
    /// Without a sink this is a no-op.
    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let Some(w) = &mut self.writer else {
            return Ok(());
        };
        let line = if record.ts.is_some() {
            serde_json::to_string(record)
        } else {
            serde_json::to_string(&RoundRecord {
                ts: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                ..record.clone()
            })
        }
        .map_err(std::io::Error::other)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()
    }
}

fn today() -> String {
    Utc::now().format("%Y%m%d").to_string()
}

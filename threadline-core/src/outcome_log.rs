//! Append-only JSONL log of applied outcomes.
//!
//! Every outcome the store merges can be written as one line. Replaying the
//! file through the reducers rebuilds the state without touching the network,
//! which is how bug reports get turned into fixtures.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use threadline_types::reduce;
use threadline_types::{CommentsState, Outcome, RequestId};

/// Append-only JSONL writer for applied outcomes.
pub struct OutcomeLog {
    writer: BufWriter<File>,
    session_start: Instant,
}

#[derive(Serialize)]
struct SessionHeader<'a> {
    event: &'static str,
    epoch_ms: u128,
    post_id: &'a str,
}

#[derive(Serialize)]
struct LogEntry<'a> {
    t_ms: u128,
    id: RequestId,
    outcome: &'a Outcome,
}

/// Deserialized log line. Session headers have `event` instead of `outcome`.
#[derive(Deserialize)]
struct ReplayEntry {
    outcome: Option<Outcome>,
}

impl OutcomeLog {
    /// Open `path` for appending and write a session header.
    pub fn open(path: &Path, post_id: &str) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);

        let header = SessionHeader {
            event: "session_start",
            epoch_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
            post_id,
        };
        if let Ok(json) = serde_json::to_string(&header) {
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }

        Ok(Self { writer, session_start: Instant::now() })
    }

    pub fn record(&mut self, id: RequestId, outcome: &Outcome) {
        let entry = LogEntry { t_ms: self.session_start.elapsed().as_millis(), id, outcome };
        match serde_json::to_string(&entry) {
            Ok(json) => {
                let _ = writeln!(self.writer, "{}", json);
                let _ = self.writer.flush();
            }
            Err(e) => log::warn!(target: "outcome_log", "could not encode outcome: {}", e),
        }
    }
}

/// Error type for outcome log replay.
#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
    Json { line: usize, source: serde_json::Error },
}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json { line, source } => write!(f, "JSON error on line {}: {}", line, source),
        }
    }
}

impl std::error::Error for ReplayError {}

/// Re-apply every logged outcome, in order, on top of `initial`.
pub fn replay_outcome_log(path: &Path, initial: CommentsState) -> Result<CommentsState, ReplayError> {
    let mut state = initial;
    let file = File::open(path)?;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: ReplayEntry = serde_json::from_str(&line)
            .map_err(|source| ReplayError::Json { line: index + 1, source })?;
        if let Some(outcome) = entry.outcome {
            reduce::reduce_outcome(&outcome, &mut state);
        }
    }
    Ok(state)
}

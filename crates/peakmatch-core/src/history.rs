//! Session history with JSON persistence and improvement tracking.
//!
//! The whole history is one JSON array kept in a single key-value slot. It is
//! read once when the store is opened and rewritten in full on every change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::traits::KeyValueStore;

/// Slot the history array lives in.
pub const HISTORY_KEY: &str = "peakKnowledgeHistory";

/// One finished quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the quiz was finished.
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    /// Who played it.
    #[serde(rename = "name")]
    pub user_name: String,
    /// Final score, 0–100.
    pub score: u32,
    /// Pairing attempts it took.
    pub moves: u32,
}

/// Direction of a score change relative to the player's previous session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up(i64),
    Down(i64),
    Same,
    /// No earlier session for this player.
    Unknown,
}

impl Trend {
    pub fn from_improvement(improvement: Option<i64>) -> Self {
        match improvement {
            Some(d) if d > 0 => Trend::Up(d),
            Some(d) if d < 0 => Trend::Down(d),
            Some(_) => Trend::Same,
            None => Trend::Unknown,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up(d) => write!(f, "▲ +{d}"),
            Trend::Down(d) => write!(f, "▼ {d}"),
            Trend::Same => write!(f, "= 0"),
            Trend::Unknown => write!(f, "-"),
        }
    }
}

/// A history entry as shown in the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    /// Score change since this player's previous session.
    pub improvement: Option<i64>,
}

impl HistoryRow {
    pub fn trend(&self) -> Trend {
        Trend::from_improvement(self.improvement)
    }
}

/// Sort entries most recent first.
///
/// Entries with equal timestamps keep their relative order reversed, i.e. the
/// one appended later counts as the more recent.
pub fn sort_descending(entries: &[HistoryEntry]) -> Vec<HistoryEntry> {
    let mut indexed: Vec<(usize, &HistoryEntry)> = entries.iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| b.timestamp.cmp(&a.timestamp).then(ib.cmp(ia)));
    indexed.into_iter().map(|(_, e)| e.clone()).collect()
}

/// Score change of `sorted[index]` against the same player's previous
/// session: the first same-name entry after `index` in the descending list.
pub fn improvement_for(index: usize, sorted: &[HistoryEntry]) -> Option<i64> {
    let entry = sorted.get(index)?;
    sorted[index + 1..]
        .iter()
        .find(|older| older.user_name == entry.user_name)
        .map(|previous| i64::from(entry.score) - i64::from(previous.score))
}

/// Append-only log of finished quizzes backed by a key-value slot.
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    key: String,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Load history from the default slot.
    pub fn open(store: S) -> Result<Self> {
        Self::open_with_key(store, HISTORY_KEY)
    }

    /// Load history from a named slot.
    ///
    /// A missing slot is an empty history. So is a slot that does not parse;
    /// that case is logged and the bad content is overwritten on the next
    /// write.
    pub fn open_with_key(store: S, key: &str) -> Result<Self> {
        let raw = store.get(key).map_err(storage_error)?;
        let entries = match raw {
            None => Vec::new(),
            Some(content) if content.trim().is_empty() => Vec::new(),
            Some(content) => match serde_json::from_str::<Vec<HistoryEntry>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        backend = store.name(),
                        key,
                        "history is unreadable, starting empty: {e}"
                    );
                    Vec::new()
                }
            },
        };
        tracing::debug!(count = entries.len(), "history loaded");

        Ok(Self {
            store,
            key: key.to_string(),
            entries,
        })
    }

    /// Append a session finished now and persist.
    pub fn record_session(
        &mut self,
        user_name: &str,
        score: u32,
        moves: u32,
    ) -> Result<&HistoryEntry> {
        self.record_session_at(user_name, score, moves, Utc::now())
    }

    /// Append a session finished at `timestamp` and persist.
    pub fn record_session_at(
        &mut self,
        user_name: &str,
        score: u32,
        moves: u32,
        timestamp: DateTime<Utc>,
    ) -> Result<&HistoryEntry> {
        self.entries.push(HistoryEntry {
            timestamp,
            user_name: user_name.to_string(),
            score,
            moves,
        });
        if let Err(e) = self.persist() {
            self.entries.pop();
            return Err(e);
        }
        tracing::info!(user = user_name, score, moves, "session recorded");

        let last = self.entries.len() - 1;
        Ok(&self.entries[last])
    }

    /// Entries most recent first.
    pub fn list_sessions_descending(&self) -> Vec<HistoryEntry> {
        sort_descending(&self.entries)
    }

    /// Entries most recent first, each with its improvement.
    pub fn rows(&self) -> Vec<HistoryRow> {
        let sorted = self.list_sessions_descending();
        (0..sorted.len())
            .map(|i| HistoryRow {
                improvement: improvement_for(i, &sorted),
                entry: sorted[i].clone(),
            })
            .collect()
    }

    /// Drop every entry and the persisted slot. There is no undo; asking the
    /// user first is the caller's job.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.remove(&self.key).map_err(storage_error)?;
        let dropped = self.entries.len();
        self.entries.clear();
        tracing::info!(dropped, "history cleared");
        Ok(())
    }

    /// Entries in the order they were recorded.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(&self.key, &json).map_err(storage_error)
    }
}

fn storage_error(e: anyhow::Error) -> QuizError {
    QuizError::Storage(format!("{e:#}"))
}

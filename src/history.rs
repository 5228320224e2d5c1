//! Append-only history of check-ins, sessions and milestones
//!
//! The decision engine only reads a [`History`]. Writes go through a
//! [`HistoryStore`]: appends from finished check-ins and sessions, milestone
//! recording, and age-based pruning. Pruning removes old check-ins and sessions
//! but never milestones.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{HistoryError, Result};
use crate::models::{CheckIn, ExerciseSession, Milestone};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub check_ins: Vec<CheckIn>,
    #[serde(default)]
    pub sessions: Vec<ExerciseSession>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl History {
    pub fn is_empty(&self) -> bool {
        self.check_ins.is_empty() && self.sessions.is_empty()
    }

    pub fn has_milestone(&self, id: &str) -> bool {
        self.milestones.iter().any(|m| m.id == id)
    }

    /// Keep check-ins and sessions in date order; same-day records keep insertion order
    fn sort(&mut self) {
        self.check_ins.sort_by_key(|c| c.date);
        self.sessions.sort_by_key(|s| s.date);
    }

    fn prune(&mut self, cutoff: NaiveDate) -> PruneSummary {
        let check_ins_before = self.check_ins.len();
        let sessions_before = self.sessions.len();
        self.check_ins.retain(|c| c.date >= cutoff);
        self.sessions.retain(|s| s.date >= cutoff);

        PruneSummary {
            cutoff,
            check_ins_removed: check_ins_before - self.check_ins.len(),
            sessions_removed: sessions_before - self.sessions.len(),
        }
    }

    /// Add milestones whose id is not yet recorded, returning how many were added
    fn add_milestones(&mut self, milestones: Vec<Milestone>) -> usize {
        let mut added = 0;
        for milestone in milestones {
            if !self.has_milestone(&milestone.id) {
                self.milestones.push(milestone);
                added += 1;
            }
        }
        added
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneSummary {
    pub cutoff: NaiveDate,
    pub check_ins_removed: usize,
    pub sessions_removed: usize,
}

pub trait HistoryStore {
    fn append_check_in(&mut self, check_in: CheckIn) -> Result<()>;

    fn append_session(&mut self, session: ExerciseSession) -> Result<()>;

    /// Record milestones, skipping ids already present
    fn record_milestones(&mut self, milestones: Vec<Milestone>) -> Result<usize>;

    /// Full history ordered by date
    fn read_all(&self) -> Result<History>;

    /// Delete check-ins and sessions older than `days` before `today`
    fn prune_older_than(&mut self, days: u32, today: NaiveDate) -> Result<PruneSummary>;
}

fn cutoff_date(days: u32, today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(days))
}

/// In-memory store, mostly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    history: History,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut history: History) -> Self {
        history.sort();
        MemoryHistoryStore { history }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append_check_in(&mut self, check_in: CheckIn) -> Result<()> {
        self.history.check_ins.push(check_in);
        self.history.sort();
        Ok(())
    }

    fn append_session(&mut self, session: ExerciseSession) -> Result<()> {
        self.history.sessions.push(session);
        self.history.sort();
        Ok(())
    }

    fn record_milestones(&mut self, milestones: Vec<Milestone>) -> Result<usize> {
        Ok(self.history.add_milestones(milestones))
    }

    fn read_all(&self) -> Result<History> {
        Ok(self.history.clone())
    }

    fn prune_older_than(&mut self, days: u32, today: NaiveDate) -> Result<PruneSummary> {
        Ok(self.history.prune(cutoff_date(days, today)))
    }
}

/// History persisted as a single JSON document
///
/// A missing file reads as an empty history. Every write rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonHistoryStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<History> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "History file not found, starting empty");
            return Ok(History::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| HistoryError::ReadFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        let mut history: History = serde_json::from_str(&content)?;
        history.sort();
        Ok(history)
    }

    fn save(&self, history: &History) -> Result<()> {
        let write_failed = |reason: String| HistoryError::WriteFailed {
            path: self.path.clone(),
            reason,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, json).map_err(|e| write_failed(e.to_string()))?;
        Ok(())
    }

    fn update<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut History) -> T,
    {
        let mut history = self.load()?;
        let result = f(&mut history);
        history.sort();
        self.save(&history)?;
        Ok(result)
    }
}

impl HistoryStore for JsonHistoryStore {
    fn append_check_in(&mut self, check_in: CheckIn) -> Result<()> {
        let date = check_in.date;
        self.update(|h| h.check_ins.push(check_in))?;
        info!(%date, "Check-in saved");
        Ok(())
    }

    fn append_session(&mut self, session: ExerciseSession) -> Result<()> {
        let date = session.date;
        let exercises = session.exercises.len();
        self.update(|h| h.sessions.push(session))?;
        info!(%date, exercises, "Session saved");
        Ok(())
    }

    fn record_milestones(&mut self, milestones: Vec<Milestone>) -> Result<usize> {
        let added = self.update(|h| h.add_milestones(milestones))?;
        if added > 0 {
            info!(added, "Milestones recorded");
        }
        Ok(added)
    }

    fn read_all(&self) -> Result<History> {
        self.load()
    }

    fn prune_older_than(&mut self, days: u32, today: NaiveDate) -> Result<PruneSummary> {
        let cutoff = cutoff_date(days, today);
        let summary = self.update(|h| h.prune(cutoff))?;
        info!(
            %cutoff,
            check_ins = summary.check_ins_removed,
            sessions = summary.sessions_removed,
            "History pruned"
        );
        Ok(summary)
    }
}

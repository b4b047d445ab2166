//! Durable storage for tasks and the display configuration.
//!
//! Everything lives in one JSON document. Tasks are a map from a canonical
//! timestamp (`YYYY-MM-DD HH:MM:SS`, seconds always zero) to a description;
//! the map's lexicographic key order is chronological order, so day queries
//! are plain range scans. Every operation opens, rewrites, and closes the
//! file on its own; no handle outlives a call.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigPatch, ConfigRecord, DisplayConfig};
use crate::error::StoreError;

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One task as returned by day queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub when: NaiveDateTime,
    pub description: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    tasks: BTreeMap<String, String>,
    #[serde(default)]
    config: ConfigRecord,
}

/// Handle on the storage file. Cheap to construct; owns no open resources.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the storage file exists. Safe to call on every start.
    pub fn init(&self) -> Result<(), StoreError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "creating storage file");
            self.write(&Document::default())?;
        }
        Ok(())
    }

    /// Insert a task. Fails with [`StoreError::Conflict`] when a task
    /// already occupies that date-time.
    pub fn add_task(&self, when: NaiveDateTime, description: &str) -> Result<(), StoreError> {
        let stamp = stamp(when);
        let mut doc = self.read()?;
        if doc.tasks.contains_key(&stamp) {
            return Err(StoreError::Conflict { stamp });
        }
        tracing::debug!(%stamp, "adding task");
        doc.tasks.insert(stamp, description.to_string());
        self.write(&doc)
    }

    /// Remove the task at exactly `when`. Returns how many tasks went away
    /// (0 or 1); a missing target is a normal outcome, not an error.
    pub fn delete_task(&self, when: NaiveDateTime) -> Result<usize, StoreError> {
        let stamp = stamp(when);
        let mut doc = self.read()?;
        match doc.tasks.remove(&stamp) {
            Some(_) => {
                tracing::debug!(%stamp, "deleted task");
                self.write(&doc)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    /// Tasks whose timestamp falls on `date`, ascending by time.
    ///
    /// The scan covers `[00:00:00, 23:59:00)` — a task stamped in the final
    /// minute of the day is stored but never listed. Intentional; see
    /// DESIGN.md.
    pub fn tasks_for_day(&self, date: NaiveDate) -> Result<Vec<TaskEntry>, StoreError> {
        let day = date.format("%Y-%m-%d");
        let begin = format!("{day} 00:00:00");
        let end = format!("{day} 23:59:00");
        let doc = self.read()?;
        doc.tasks
            .range(begin..end)
            .map(|(key, description)| {
                let when = NaiveDateTime::parse_from_str(key, STAMP_FORMAT)
                    .map_err(|_| StoreError::BadStamp { stamp: key.clone() })?;
                Ok(TaskEntry {
                    when,
                    description: description.clone(),
                })
            })
            .collect()
    }

    /// The persisted configuration, only when every slot has been set.
    pub fn load_config(&self) -> Result<Option<DisplayConfig>, StoreError> {
        Ok(self.read()?.config.complete())
    }

    /// Apply a partial configuration update. Fields absent from the patch
    /// keep their stored value; an empty patch still materialises the
    /// record.
    pub fn save_config(&self, patch: &ConfigPatch) -> Result<(), StoreError> {
        let mut doc = self.read()?;
        doc.config.apply(patch);
        self.write(&doc)
    }

    fn read(&self) -> Result<Document, StoreError> {
        if !self.path.exists() {
            return Ok(Document::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Atomic-ish write via temp + rename.
    fn write(&self, doc: &Document) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(doc)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

/// Canonical storage key: minute precision with an explicit zero seconds
/// field.
fn stamp(when: NaiveDateTime) -> String {
    when.format("%Y-%m-%d %H:%M:00").to_string()
}

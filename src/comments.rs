//! Append-only review comment log.
//!
//! Comments are keyed by the diagram hash and row id of the FMEDA row
//! they refer to, with a snapshot of the row's derived fields at
//! comment time. The store is a single pretty-printed JSON array file,
//! rewritten whole on every append. There is no locking: concurrent
//! writers are last-writer-wins, which is accepted for a single-user
//! local tool. If the diagram changes and row indices shift, stale
//! comments point at different rows; the hash is the only tie to the
//! diagram state that produced them.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::CommentError;
use crate::fmeda::{FmedaRow, FMEDA_COLUMNS};
use crate::graph::ComponentType;

pub const DEFAULT_STORE_PATH: &str = "data/comments.json";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Major,
    Critical,
}

/// Snapshot of the derived row fields at comment time.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RowContext {
    pub failure_mode: String,
    pub effect: String,
    pub detection: String,
    pub diagnostic_coverage: String,
    #[serde(rename = "failure_rate_FIT")]
    pub failure_rate_fit: String,
    pub safety_relevance: String,
}

impl RowContext {
    pub fn from_row(row: &FmedaRow) -> Self {
        RowContext {
            failure_mode: row.failure_mode.clone(),
            effect: row.effect.clone(),
            detection: row.detection.clone(),
            diagnostic_coverage: row.diagnostic_coverage.clone(),
            failure_rate_fit: row.failure_rate_fit.clone(),
            safety_relevance: row.safety_relevance.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CommentEntry {
    /// ISO-8601 UTC, second precision, trailing 'Z'
    pub timestamp: String,
    pub diagram_hash: String,
    pub row_id: String,
    pub component_id: String,
    pub component_label: String,
    pub component_type: ComponentType,
    /// FMEDA column the comment refers to (not row_id/component_id)
    pub field: String,
    pub severity: Severity,
    pub comment: String,
    pub context: RowContext,
}

impl CommentEntry {
    /// Build a validated entry for `row`. Rejects empty (post-trim)
    /// comment text and field names outside the commentable columns,
    /// before anything is persisted.
    pub fn new(
        diagram_hash: &str,
        row: &FmedaRow,
        field: &str,
        severity: Severity,
        comment: &str,
    ) -> Result<Self, CommentError> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(CommentError::EmptyComment);
        }
        if !commentable_fields().contains(&field) {
            return Err(CommentError::UnknownField(field.to_string()));
        }
        Ok(CommentEntry {
            timestamp: now_iso(),
            diagram_hash: diagram_hash.to_string(),
            row_id: row.row_id.clone(),
            component_id: row.component_id.clone(),
            component_label: row.component_label.clone(),
            component_type: row.component_type,
            field: field.to_string(),
            severity,
            comment: comment.to_string(),
            context: RowContext::from_row(row),
        })
    }
}

/// FMEDA columns a comment may refer to.
pub fn commentable_fields() -> Vec<&'static str> {
    FMEDA_COLUMNS
        .iter()
        .copied()
        .filter(|c| *c != "row_id" && *c != "component_id")
        .collect()
}

fn now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

pub struct CommentStore {
    path: PathBuf,
}

impl CommentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CommentStore { path: path.into() }
    }

    /// Read all entries in insertion order. An absent or corrupt file
    /// yields an empty list; corruption is logged, not surfaced.
    pub fn load(&self) -> Vec<CommentEntry> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&text) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "comment store {} is corrupt, treating as empty: {}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Append one entry: read-modify-write of the whole file. Creates
    /// the parent directory on first write.
    pub fn append(&self, entry: CommentEntry) -> Result<(), CommentError> {
        let mut entries = self.load();
        entries.push(entry);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json)?;
        debug!("comment store now holds {} entries", entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> FmedaRow {
        FmedaRow {
            row_id: "R0001".to_string(),
            component_id: "n1".to_string(),
            component_label: "Temp Sensor".to_string(),
            component_type: ComponentType::Sensor,
            failure_mode: "Open circuit".to_string(),
            effect: "Local effect only".to_string(),
            detection: "Plausibility / continuity check".to_string(),
            diagnostic_coverage: String::new(),
            failure_rate_fit: String::new(),
            safety_relevance: "TBD".to_string(),
            notes: String::new(),
        }
    }

    fn entry(comment: &str) -> CommentEntry {
        CommentEntry::new(&"a".repeat(64), &sample_row(), "detection", Severity::Minor, comment)
            .unwrap()
    }

    #[test]
    fn appends_preserve_submission_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = CommentStore::new(dir.path().join("comments.json"));
        assert!(store.load().is_empty());

        for i in 0..3 {
            store.append(entry(&format!("comment {i}"))).unwrap();
        }
        let entries = store.load();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].comment, "comment 0");
        assert_eq!(entries[2].comment, "comment 2");
    }

    #[test]
    fn duplicates_are_permitted() {
        let dir = tempfile::tempdir().unwrap();
        let store = CommentStore::new(dir.path().join("comments.json"));
        store.append(entry("same")).unwrap();
        store.append(entry("same")).unwrap();
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn corrupt_store_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.json");
        fs::write(&path, "{ not json").unwrap();
        let store = CommentStore::new(&path);
        assert!(store.load().is_empty());
        // next append overwrites the corrupt file
        store.append(entry("fresh")).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn empty_comment_is_rejected() {
        let err =
            CommentEntry::new("h", &sample_row(), "detection", Severity::Major, "   \n\t ")
                .unwrap_err();
        assert!(matches!(err, CommentError::EmptyComment));
    }

    #[test]
    fn unknown_field_is_rejected() {
        for field in ["row_id", "component_id", "bogus"] {
            let err = CommentEntry::new("h", &sample_row(), field, Severity::Minor, "text")
                .unwrap_err();
            assert!(matches!(err, CommentError::UnknownField(_)));
        }
    }

    #[test]
    fn entry_snapshots_row_context() {
        let e = entry("check the detection claim");
        assert_eq!(e.row_id, "R0001");
        assert_eq!(e.context.failure_mode, "Open circuit");
        assert_eq!(e.context.detection, "Plausibility / continuity check");
        assert_eq!(e.comment, "check the detection claim");
        // trailing Z, second precision
        assert!(e.timestamp.ends_with('Z'));
        assert_eq!(e.timestamp.len(), "2026-01-01T00:00:00Z".len());
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }

    #[test]
    fn store_file_is_pretty_printed_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.json");
        let store = CommentStore::new(&path);
        store.append(entry("Prüfung nötig")).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n"));
        assert!(text.contains("Prüfung nötig"));
    }
}

//! Store trait and the two shipped backends.

use redline_core::model::{AnalysisScope, CritiqueResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum history entries retained per project.
pub const HISTORY_CAP: usize = 20;

/// One persisted critique run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritiqueRecord {
    /// Host-side project identifier the run belongs to.
    pub project: String,
    pub scope: AnalysisScope,
    /// Size of the analyzed scene, kept for trend display.
    pub element_count: usize,
    pub result: CritiqueResult,
}

// ─── Store trait ─────────────────────────────────────────────────────────

/// Backend contract for critique history.
///
/// Implemented differently by each host environment:
/// - native: `JsonFileStore` on disk
/// - tests / WASM hosts: `MemoryStore` or a custom backend
///
/// History is newest-first and capped at `HISTORY_CAP` entries per project.
pub trait CritiqueStore {
    /// Persist one record, pruning the project's history to the cap.
    ///
    /// # Errors
    /// Backend-specific failure (I/O, serialization) as a message.
    fn save(&self, record: &CritiqueRecord) -> Result<(), String>;

    /// Load a project's history, newest-first.
    ///
    /// # Errors
    /// Backend-specific failure as a message. An unknown project is not an
    /// error — it loads as an empty history.
    fn load_history(&self, project: &str) -> Result<Vec<CritiqueRecord>, String>;
}

// ─── Best-effort wrappers ────────────────────────────────────────────────

/// Persist a record, logging and swallowing any failure. The analysis
/// result the caller holds is unaffected either way.
pub fn save_best_effort(store: &dyn CritiqueStore, record: &CritiqueRecord) {
    if let Err(err) = store.save(record) {
        log::warn!(
            "failed to persist critique for project {:?}: {err}",
            record.project
        );
    }
}

/// Load history, degrading to an empty list on failure.
#[must_use]
pub fn load_history_or_empty(store: &dyn CritiqueStore, project: &str) -> Vec<CritiqueRecord> {
    match store.load_history(project) {
        Ok(records) => records,
        Err(err) => {
            log::warn!("failed to load critique history for project {project:?}: {err}");
            Vec::new()
        }
    }
}

// ─── JSON file backend ───────────────────────────────────────────────────

/// One JSON file per project under a root directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project IDs come from the host; keep the file name tame.
    fn project_path(&self, project: &str) -> PathBuf {
        let safe: String = project
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.root.join(format!("{safe}.json"))
    }

    fn read_records(&self, path: &Path) -> Result<Vec<CritiqueRecord>, String> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(path)
            .map_err(|e| format!("read {}: {e}", path.display()))?;
        serde_json::from_str(&data).map_err(|e| format!("parse {}: {e}", path.display()))
    }
}

impl CritiqueStore for JsonFileStore {
    fn save(&self, record: &CritiqueRecord) -> Result<(), String> {
        fs::create_dir_all(&self.root)
            .map_err(|e| format!("create {}: {e}", self.root.display()))?;

        let path = self.project_path(&record.project);
        let mut records = self.read_records(&path)?;
        records.insert(0, record.clone());
        records.truncate(HISTORY_CAP);

        let data = serde_json::to_string_pretty(&records)
            .map_err(|e| format!("serialize history: {e}"))?;
        fs::write(&path, data).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn load_history(&self, project: &str) -> Result<Vec<CritiqueRecord>, String> {
        let mut records = self.read_records(&self.project_path(project))?;
        records.truncate(HISTORY_CAP);
        Ok(records)
    }
}

// ─── In-memory backend ───────────────────────────────────────────────────

/// History in a mutex-guarded map. For tests and hosts without a disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    histories: Mutex<HashMap<String, Vec<CritiqueRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CritiqueStore for MemoryStore {
    fn save(&self, record: &CritiqueRecord) -> Result<(), String> {
        let mut histories = self
            .histories
            .lock()
            .map_err(|_| "history lock poisoned".to_string())?;
        let records = histories.entry(record.project.clone()).or_default();
        records.insert(0, record.clone());
        records.truncate(HISTORY_CAP);
        Ok(())
    }

    fn load_history(&self, project: &str) -> Result<Vec<CritiqueRecord>, String> {
        let histories = self
            .histories
            .lock()
            .map_err(|_| "history lock poisoned".to_string())?;
        Ok(histories.get(project).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use redline_core::engine::critique_document;
    use redline_core::model::AnalysisScope;

    fn record(project: &str, run: usize) -> CritiqueRecord {
        let mut result = critique_document(&[], AnalysisScope::Full);
        result.id = format!("critique_{run}");
        CritiqueRecord {
            project: project.into(),
            scope: AnalysisScope::Full,
            element_count: 0,
            result,
        }
    }

    #[test]
    fn memory_store_roundtrip_newest_first() {
        let store = MemoryStore::new();
        store.save(&record("site", 0)).unwrap();
        store.save(&record("site", 1)).unwrap();

        let history = store.load_history("site").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].result.id, "critique_1");
        assert_eq!(history[1].result.id, "critique_0");
    }

    #[test]
    fn memory_store_caps_history() {
        let store = MemoryStore::new();
        for run in 0..25 {
            store.save(&record("site", run)).unwrap();
        }
        let history = store.load_history("site").unwrap();
        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history[0].result.id, "critique_24");
    }

    #[test]
    fn unknown_project_loads_empty() {
        let store = MemoryStore::new();
        assert!(store.load_history("nowhere").unwrap().is_empty());
    }

    #[test]
    fn projects_are_isolated() {
        let store = MemoryStore::new();
        store.save(&record("a", 0)).unwrap();
        store.save(&record("b", 1)).unwrap();
        assert_eq!(store.load_history("a").unwrap().len(), 1);
        assert_eq!(store.load_history("b").unwrap().len(), 1);
    }
}

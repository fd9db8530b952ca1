use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::core::RunPayload;

/// On-disk store for finished runs, one JSON file per run. Runs are
/// read-back-whole payloads for a display surface; resuming accumulation is
/// not supported because per-event deltas are not retained.
pub struct RunStore {
    dir: PathBuf,
}

impl RunStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a run payload; returns the path written.
    pub fn save(&self, payload: &RunPayload) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create run directory {}", self.dir.display()))?;

        let name = format!("run-{}.json", payload.created_at.format("%Y%m%dT%H%M%S%3f"));
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(payload).context("serialize run payload")?;
        fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;

        info!("run saved to {}", path.display());
        Ok(path)
    }

    /// Load the most recent run, if any. Unrelated files in the directory
    /// are ignored; an unreadable run file is an error.
    pub fn load_latest(&self) -> Result<Option<RunPayload>> {
        if !self.dir.exists() {
            return Ok(None);
        }

        let mut runs: Vec<PathBuf> = fs::read_dir(&self.dir)
            .with_context(|| format!("read run directory {}", self.dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("run-") && n.ends_with(".json"))
            })
            .collect();
        // Timestamped names sort chronologically.
        runs.sort();

        let Some(path) = runs.pop() else {
            return Ok(None);
        };
        let contents =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let payload = serde_json::from_str(&contents)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(Some(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Breakdown, VendorAggregate};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_store() -> RunStore {
        let id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "vendorradar_store_test_{}_{}",
            std::process::id(),
            id
        ));
        let _ = fs::remove_dir_all(&dir);
        RunStore::new(dir)
    }

    fn payload(created_secs: i64, vendor_name: &str) -> RunPayload {
        RunPayload {
            vendors: vec![VendorAggregate {
                key: vendor_name.to_lowercase(),
                name: vendor_name.to_string(),
                country: "Germany".to_string(),
                keywords: ["bankruptcy".to_string()].into_iter().collect(),
                breakdown: Breakdown::new(12.0, 0.0, 0.0),
            }],
            counts: BTreeMap::from([("bankruptcy".to_string(), 1)]),
            aoi: None,
            seed: None,
            created_at: Utc.timestamp_opt(created_secs, 0).unwrap(),
        }
    }

    #[test]
    fn empty_store_has_no_latest() {
        let store = temp_store();
        assert!(store.load_latest().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store();
        let p = payload(1_700_000_000, "Acme");
        store.save(&p).unwrap();
        let loaded = store.load_latest().unwrap().unwrap();
        assert_eq!(loaded, p);
    }

    #[test]
    fn latest_wins_between_two_runs() {
        let store = temp_store();
        store.save(&payload(1_700_000_000, "Older")).unwrap();
        store.save(&payload(1_700_000_100, "Newer")).unwrap();
        let loaded = store.load_latest().unwrap().unwrap();
        assert_eq!(loaded.vendors[0].name, "Newer");
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let store = temp_store();
        store.save(&payload(1_700_000_000, "Acme")).unwrap();
        fs::write(store.dir().join("notes.txt"), "not a run").unwrap();
        fs::write(store.dir().join("zzz-other.json"), "{}").unwrap();
        let loaded = store.load_latest().unwrap().unwrap();
        assert_eq!(loaded.vendors[0].name, "Acme");
    }
}

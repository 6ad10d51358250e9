//! Memoization of loaded-and-enriched tables keyed by input identity.
//!
//! The cache is owned and passed explicitly by the caller; nothing here is
//! ambient global state. Entries are immutable once stored, so concurrent
//! renders sharing one cache never observe a partially built table.

use std::collections::HashMap;
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::EnrichConfig;
use crate::data::EnrichedTable;
use crate::enrich::{enrich, exclude_categories};
use crate::errors::PipelineError;
use crate::hash::{stable_hash_str, stable_hash_with};
use crate::loader::load_repo_records;

/// Identity of one enrichment run: source file state, reference date, and
/// config fingerprint. Any component changing produces a fresh entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
    now: NaiveDate,
    config: u64,
}

/// Thread-safe cache of enriched tables, keyed by input identity.
#[derive(Clone, Default)]
pub struct TableCache {
    inner: Arc<RwLock<HashMap<CacheKey, Arc<EnrichedTable>>>>,
}

impl TableCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the enriched table for `path`, loading and deriving it only
    /// when no entry matches the current (file state, `now`, config) key.
    ///
    /// Hits hand back the shared immutable table; misses run the full
    /// load → exclude → derive pipeline and store the result.
    pub fn get_or_enrich(
        &self,
        path: &Path,
        now: NaiveDate,
        config: &EnrichConfig,
    ) -> Result<Arc<EnrichedTable>, PipelineError> {
        let key = self.key_for(path, now, config)?;
        {
            let entries = self.inner.read().expect("table cache poisoned");
            if let Some(table) = entries.get(&key) {
                debug!(path = %path.display(), "enriched table cache hit");
                return Ok(Arc::clone(table));
            }
        }

        let raw = load_repo_records(path)?;
        let kept = exclude_categories(raw, &config.excluded_categories);
        let table = Arc::new(enrich(kept, now, config));

        let mut entries = self.inner.write().expect("table cache poisoned");
        let entry = entries.entry(key).or_insert_with(|| Arc::clone(&table));
        Ok(Arc::clone(entry))
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.inner.read().expect("table cache poisoned").len()
    }

    /// Returns `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("table cache poisoned").is_empty()
    }

    /// Drop every cached table.
    pub fn clear(&self) {
        self.inner.write().expect("table cache poisoned").clear();
    }

    fn key_for(
        &self,
        path: &Path,
        now: NaiveDate,
        config: &EnrichConfig,
    ) -> Result<CacheKey, PipelineError> {
        let metadata = fs::metadata(path).map_err(|_| PipelineError::DataSourceMissing {
            path: path.to_path_buf(),
        })?;
        Ok(CacheKey {
            path: path.to_path_buf(),
            modified: metadata.modified().ok(),
            len: metadata.len(),
            now,
            config: config_fingerprint(config),
        })
    }
}

fn config_fingerprint(config: &EnrichConfig) -> u64 {
    let mut acc = stable_hash_with(|hasher| {
        config.activity_window_days.hash(hasher);
        config.recency_window_days.hash(hasher);
        config.org_threshold.hash(hasher);
    });
    for category in &config.excluded_categories {
        acc = stable_hash_str(acc, category);
    }
    for handle in &config.bot_denylist {
        acc = stable_hash_str(acc, handle);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const HEADER: &str =
        "Repository,Category,Subcat,Language,Stars,Created,Last Commit,Top Contributors,Standard\n";

    fn write_catalog(dir: &Path, rows: &[&str]) -> PathBuf {
        let path = dir.join("catalog.csv");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        for row in rows {
            file.write_all(row.as_bytes()).unwrap();
            file.write_all(b"\n").unwrap();
        }
        path
    }

    #[test]
    fn repeated_lookups_share_one_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(
            dir.path(),
            &["acme/widget,NLP,Sub,Python,42,2023-01-10,2023-06-01,alice,FHIR"],
        );
        let cache = TableCache::new();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let config = EnrichConfig::default();

        let first = cache.get_or_enrich(&path, now, &config).unwrap();
        let second = cache.get_or_enrich(&path, now, &config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn config_changes_produce_fresh_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(
            dir.path(),
            &["acme/widget,NLP,Sub,Python,42,2023-01-10,2023-06-01,alice,FHIR"],
        );
        let cache = TableCache::new();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let default = cache
            .get_or_enrich(&path, now, &EnrichConfig::default())
            .unwrap();
        let tightened = cache
            .get_or_enrich(
                &path,
                now,
                &EnrichConfig::default().with_activity_window_days(30),
            )
            .unwrap();
        assert!(!Arc::ptr_eq(&default, &tightened));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn file_content_changes_invalidate_the_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(
            dir.path(),
            &["acme/widget,NLP,Sub,Python,42,2023-01-10,2023-06-01,alice,FHIR"],
        );
        let cache = TableCache::new();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let config = EnrichConfig::default();

        let before = cache.get_or_enrich(&path, now, &config).unwrap();
        write_catalog(
            dir.path(),
            &[
                "acme/widget,NLP,Sub,Python,42,2023-01-10,2023-06-01,alice,FHIR",
                "acme/gadget,NLP,Sub,Python,7,2022-01-10,2022-06-01,bob,",
            ],
        );
        let after = cache.get_or_enrich(&path, now, &config).unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn missing_file_reports_data_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TableCache::new();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let error = cache
            .get_or_enrich(&dir.path().join("absent.csv"), now, &EnrichConfig::default())
            .unwrap_err();
        assert!(matches!(error, PipelineError::DataSourceMissing { .. }));
    }
}

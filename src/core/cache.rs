//! Persistence of the last discovery result and the rescan policy.
//!
//! The discovered list is stored as a single named value in a [`KeyValueStore`].
//! The value is a JSON [`CacheRecord`] that keeps "absent", "no repositories"
//! and "malformed" apart, and the legacy `;`-delimited format is still read so
//! existing caches migrate on the next store.
//!
//! # Public API
//! - [`KeyValueStore`]: Minimal string store the cache is written to
//! - [`FileStore`]: JSON file store with atomic replace-on-write
//! - [`MemoryStore`]: In-process store
//! - [`CacheRecord`]: Persisted form of a repository list
//! - [`RepositoryCache`]: `load` / `store` / `needs_scan`

use crate::core::dirs::get_project_cache_directory;
use crate::core::error::{Result, ToolbarError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Key the repository list is stored under
pub const REPOSITORY_LIST_KEY: &str = "repositories";

/// Value older releases wrote when a scan found nothing
pub const LEGACY_EMPTY_SENTINEL: &str = "No repos!";

const LEGACY_DELIMITER: char = ';';
const STORE_FILE: &str = "store.json";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Stores every key of one project in a single JSON object file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store living in the per-project cache directory
    pub fn for_project(project_dir: &Path) -> Result<Self> {
        Ok(Self::new(
            get_project_cache_directory(project_dir)?.join(STORE_FILE),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| ToolbarError::cache_read_failed(&self.path, e))?;

        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable store file '{}': {e}",
                    self.path.display()
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| ToolbarError::cache_directory_creation_failed(dir, e))?;
        }

        let json = serde_json::to_string_pretty(map)?;

        // Readers only ever see the old or the new file
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| ToolbarError::cache_write_failed(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| ToolbarError::cache_write_failed(&self.path, e))?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Persisted result of a completed scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CacheRecord {
    /// The scan completed and found nothing
    Empty { scanned_at: DateTime<Utc> },
    /// The scan completed and found at least one repository
    Repositories {
        scanned_at: DateTime<Utc>,
        paths: Vec<PathBuf>,
    },
}

impl CacheRecord {
    pub fn from_list(list: &[PathBuf]) -> Self {
        let scanned_at = Utc::now();
        if list.is_empty() {
            Self::Empty { scanned_at }
        } else {
            Self::Repositories {
                scanned_at,
                paths: list.to_vec(),
            }
        }
    }

    pub fn into_list(self) -> Vec<PathBuf> {
        match self {
            Self::Empty { .. } => Vec::new(),
            Self::Repositories { paths, .. } => paths,
        }
    }

    /// When the scan ran. Records migrated from the legacy format report the Unix epoch.
    pub fn scanned_at(&self) -> DateTime<Utc> {
        match self {
            Self::Empty { scanned_at } | Self::Repositories { scanned_at, .. } => *scanned_at,
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a stored value. Returns `None` when the value is corrupt.
    pub fn decode(raw: &str) -> Option<Self> {
        let record = match serde_json::from_str::<CacheRecord>(raw) {
            Ok(record) => record,
            Err(_) => Self::decode_legacy(raw)?,
        };
        record.validated()
    }

    fn decode_legacy(raw: &str) -> Option<Self> {
        // Legacy values carry no timestamp
        let scanned_at = DateTime::<Utc>::default();

        if raw == LEGACY_EMPTY_SENTINEL {
            return Some(Self::Empty { scanned_at });
        }

        let paths: Vec<PathBuf> = raw
            .split(LEGACY_DELIMITER)
            .filter(|fragment| !fragment.is_empty())
            .map(PathBuf::from)
            .collect();

        Some(Self::Repositories { scanned_at, paths })
    }

    fn validated(self) -> Option<Self> {
        match self {
            Self::Empty { .. } => Some(self),
            Self::Repositories { scanned_at, paths } => {
                let paths: Vec<PathBuf> = paths
                    .into_iter()
                    .filter(|path| !path.as_os_str().is_empty())
                    .collect();

                if paths.is_empty() || paths.iter().any(|path| !path.is_absolute()) {
                    return None;
                }
                Some(Self::Repositories { scanned_at, paths })
            }
        }
    }
}

/// Last successful scan result plus the decision whether to walk again
#[derive(Debug)]
pub struct RepositoryCache<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> RepositoryCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Full record, or `None` if it is missing, blank or corrupt
    pub fn load_record(&self) -> Option<CacheRecord> {
        let raw = match self.store.get(REPOSITORY_LIST_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read repository cache, will rescan: {e}");
                return None;
            }
        };

        if raw.is_empty() {
            return None;
        }

        let record = CacheRecord::decode(&raw);
        if record.is_none() {
            log::warn!("Repository cache is corrupt, will rescan");
        }
        record
    }

    /// `None` = absent, `Some(empty)` = a scan found nothing
    pub fn load(&self) -> Option<Vec<PathBuf>> {
        self.load_record().map(CacheRecord::into_list)
    }

    /// Must only be called with the result of a complete walk
    pub fn store(&mut self, list: &[PathBuf]) -> Result<()> {
        let encoded = CacheRecord::from_list(list).encode()?;
        self.store.set(REPOSITORY_LIST_KEY, &encoded)?;
        log::debug!("Stored {} repositories in cache", list.len());
        Ok(())
    }

    pub fn needs_scan(&self, force_refresh: bool) -> bool {
        force_refresh || self.load().is_none()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(REPOSITORY_LIST_KEY)
    }

    pub fn store_ref(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_missing_record_is_absent() {
        let cache = RepositoryCache::new(MemoryStore::new());
        assert_eq!(cache.load(), None);
        assert!(cache.needs_scan(false));
    }

    #[test]
    fn test_blank_record_is_absent() -> Result<()> {
        let mut store = MemoryStore::new();
        store.set(REPOSITORY_LIST_KEY, "")?;
        let cache = RepositoryCache::new(store);
        assert_eq!(cache.load(), None);
        Ok(())
    }

    #[test]
    fn test_store_then_load_preserves_order() -> Result<()> {
        let mut cache = RepositoryCache::new(MemoryStore::new());
        let list = paths(&["/work", "/work/game/Assets/Tools", "/work/game/Packages/com.b"]);

        cache.store(&list)?;

        assert_eq!(cache.load(), Some(list));
        assert!(!cache.needs_scan(false));
        assert!(cache.needs_scan(true));
        Ok(())
    }

    #[test]
    fn test_empty_list_stores_sentinel() -> Result<()> {
        let mut cache = RepositoryCache::new(MemoryStore::new());
        cache.store(&[])?;

        assert!(matches!(
            cache.load_record(),
            Some(CacheRecord::Empty { .. })
        ));
        assert_eq!(cache.load(), Some(Vec::new()));
        assert!(!cache.needs_scan(false));
        Ok(())
    }

    #[test]
    fn test_corrupt_record_is_absent() -> Result<()> {
        let mut store = MemoryStore::new();
        store.set(REPOSITORY_LIST_KEY, "relative/path;another")?;
        let cache = RepositoryCache::new(store);
        assert_eq!(cache.load(), None);
        assert!(cache.needs_scan(false));
        Ok(())
    }

    #[test]
    fn test_repositories_record_without_paths_is_corrupt() {
        let raw = r#"{"kind":"repositories","scanned_at":"2024-01-01T00:00:00Z","paths":[""]}"#;
        assert_eq!(CacheRecord::decode(raw), None);
    }

    #[test]
    fn test_legacy_delimited_value_is_migrated() -> Result<()> {
        let mut store = MemoryStore::new();
        store.set(REPOSITORY_LIST_KEY, "/work;/work/game/Assets/Tools;")?;
        let cache = RepositoryCache::new(store);
        assert_eq!(
            cache.load(),
            Some(paths(&["/work", "/work/game/Assets/Tools"]))
        );
        Ok(())
    }

    #[test]
    fn test_legacy_sentinel_is_empty() -> Result<()> {
        let mut store = MemoryStore::new();
        store.set(REPOSITORY_LIST_KEY, LEGACY_EMPTY_SENTINEL)?;
        let cache = RepositoryCache::new(store);
        assert_eq!(cache.load(), Some(Vec::new()));
        Ok(())
    }

    #[test]
    fn test_clear_forces_rescan() -> Result<()> {
        let mut cache = RepositoryCache::new(MemoryStore::new());
        cache.store(&paths(&["/work"]))?;
        cache.clear()?;
        assert!(cache.needs_scan(false));
        Ok(())
    }

    #[test]
    fn test_file_store_round_trip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store_path = temp_dir.path().join("nested/dir/store.json");
        let mut cache = RepositoryCache::new(FileStore::new(&store_path));
        let list = paths(&["/a/b c", "/d"]);

        cache.store(&list)?;

        let reopened = RepositoryCache::new(FileStore::new(&store_path));
        assert_eq!(reopened.load(), Some(list));
        assert!(!store_path.with_extension("json.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_file_store_keeps_other_keys() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let mut store = FileStore::new(temp_dir.path().join("store.json"));

        store.set("selection", "{\"selected_index\":2}")?;
        store.set(REPOSITORY_LIST_KEY, "/x;")?;
        store.remove(REPOSITORY_LIST_KEY)?;

        assert_eq!(store.get(REPOSITORY_LIST_KEY)?, None);
        assert_eq!(
            store.get("selection")?,
            Some("{\"selected_index\":2}".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_unparseable_store_file_reads_as_empty() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store_path = temp_dir.path().join("store.json");
        fs::write(&store_path, "{ not json")?;

        let cache = RepositoryCache::new(FileStore::new(&store_path));
        assert_eq!(cache.load(), None);
        Ok(())
    }
}

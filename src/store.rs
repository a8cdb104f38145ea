//! Local persistence: favorites, saved-word snapshots, quiz history,
//! and the dark-mode flag.
//!
//! Everything lives behind the [`StoragePort`] trait so the profile can be
//! tested against an in-memory store. Reads never fail outward: a missing
//! or corrupt value degrades to an empty default.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Local;

use crate::models::{QuizResult, WordEntry};

pub const FAVORITES_KEY: &str = "favorites";
pub const SAVED_WORDS_KEY: &str = "saved-words";
pub const DARK_MODE_KEY: &str = "dark-mode";
pub const QUIZ_RESULTS_KEY: &str = "quiz-results";

/// Minimal key-value port over the client-local store.
pub trait StoragePort {
    /// Raw value for a key, or `None` if absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: one document per key under the data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {:?}", dir))?;
        Ok(Self { dir })
    }

    /// Get default storage location.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexislore")
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StoragePort for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {:?}", path))
    }
}

/// In-memory store for tests. Cloning shares the underlying map, so a
/// second handle sees everything the first one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: Arc<Mutex<HashMap<String, String>>>,
}

impl StoragePort for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut map) = self.map.lock() {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// Today's calendar stamp, matching the stored `date` field.
pub fn today_stamp() -> String {
    Local::now().format("%a %b %d %Y").to_string()
}

fn read_json_or_default<T: Default + serde::de::DeserializeOwned>(
    store: &dyn StoragePort,
    key: &str,
) -> T {
    store
        .read(key)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// The user's persistent profile: favorite ids plus full snapshots of the
/// favorited entries, so the favorites view renders without the catalog.
///
/// Invariant: every favorited id has a snapshot in `saved_words`. The
/// reverse does not hold; removal keeps snapshots around.
pub struct Profile {
    store: Box<dyn StoragePort>,
    favorite_ids: Vec<String>,
    saved_words: HashMap<String, WordEntry>,
}

impl Profile {
    /// Load the profile from a store, defaulting anything missing or
    /// corrupt to empty.
    pub fn load(store: Box<dyn StoragePort>) -> Self {
        let favorite_ids = read_json_or_default(store.as_ref(), FAVORITES_KEY);
        let saved_words = read_json_or_default(store.as_ref(), SAVED_WORDS_KEY);
        Self {
            store,
            favorite_ids,
            saved_words,
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorite_ids.iter().any(|f| f == id)
    }

    /// Flip an entry's favorite status. Adding also snapshots the full
    /// entry; removing leaves the snapshot for cheap re-favoriting.
    pub fn toggle_favorite(&mut self, entry: &WordEntry) -> Result<()> {
        self.saved_words.insert(entry.id.clone(), entry.clone());

        if let Some(pos) = self.favorite_ids.iter().position(|f| *f == entry.id) {
            self.favorite_ids.remove(pos);
        } else {
            self.favorite_ids.push(entry.id.clone());
        }
        self.persist()
    }

    /// Drop an id from the favorites list. Does not purge the snapshot.
    pub fn remove_favorite(&mut self, id: &str) -> Result<()> {
        self.favorite_ids.retain(|f| f != id);
        self.persist()
    }

    /// Favorited entries in insertion order, resolved through the
    /// snapshot cache. Ids with no snapshot are silently dropped.
    pub fn list_favorites(&self) -> Vec<WordEntry> {
        self.favorite_ids
            .iter()
            .filter_map(|id| self.saved_words.get(id))
            .cloned()
            .collect()
    }

    pub fn dark_mode(&self) -> bool {
        self.store
            .read(DARK_MODE_KEY)
            .map(|v| v.trim() == "true")
            .unwrap_or(false)
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.store.write(DARK_MODE_KEY, if enabled { "true" } else { "false" })
    }

    /// Upsert today's quiz outcome; one record per day, last write wins.
    pub fn record_quiz_result(&self, score: usize, total: usize) -> Result<()> {
        let date = today_stamp();
        let mut results: BTreeMap<String, QuizResult> =
            read_json_or_default(self.store.as_ref(), QUIZ_RESULTS_KEY);
        results.insert(date.clone(), QuizResult { score, total, date });
        self.store
            .write(QUIZ_RESULTS_KEY, &serde_json::to_string(&results)?)
    }

    /// Full quiz history, date-keyed.
    pub fn quiz_results(&self) -> BTreeMap<String, QuizResult> {
        read_json_or_default(self.store.as_ref(), QUIZ_RESULTS_KEY)
    }

    fn persist(&self) -> Result<()> {
        self.store
            .write(FAVORITES_KEY, &serde_json::to_string(&self.favorite_ids)?)?;
        self.store
            .write(SAVED_WORDS_KEY, &serde_json::to_string(&self.saved_words)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> WordEntry {
        WordEntry {
            id: id.to_string(),
            word: id.to_string(),
            language: "Arabic".to_string(),
            meaning: "meaning".to_string(),
            story: "story".to_string(),
            pronunciation: "pro".to_string(),
        }
    }

    fn fresh_profile() -> (Profile, MemoryStore) {
        let store = MemoryStore::default();
        (Profile::load(Box::new(store.clone())), store)
    }

    #[test]
    fn test_toggle_parity_determines_membership() {
        let (mut profile, _store) = fresh_profile();
        let a = entry("a");
        let b = entry("b");

        // a toggled 3x (odd), b toggled 2x (even)
        profile.toggle_favorite(&a).unwrap();
        profile.toggle_favorite(&b).unwrap();
        profile.toggle_favorite(&a).unwrap();
        profile.toggle_favorite(&b).unwrap();
        profile.toggle_favorite(&a).unwrap();

        assert!(profile.is_favorite("a"));
        assert!(!profile.is_favorite("b"));
        assert_eq!(profile.list_favorites().len(), 1);
    }

    #[test]
    fn test_favorites_always_have_snapshots() {
        let (mut profile, _store) = fresh_profile();
        for id in ["x", "y", "z"] {
            profile.toggle_favorite(&entry(id)).unwrap();
        }
        profile.remove_favorite("y").unwrap();
        profile.toggle_favorite(&entry("z")).unwrap();

        for word in profile.list_favorites() {
            assert!(profile.saved_words.contains_key(&word.id));
        }
        assert_eq!(profile.list_favorites().len(), 1);
    }

    #[test]
    fn test_double_toggle_is_net_noop_and_keeps_snapshot() {
        let (mut profile, _store) = fresh_profile();
        let najwa = entry("najwa");

        profile.toggle_favorite(&najwa).unwrap();
        profile.toggle_favorite(&najwa).unwrap();

        assert!(!profile.is_favorite("najwa"));
        assert!(profile.saved_words.contains_key("najwa"));
    }

    #[test]
    fn test_remove_favorite_keeps_snapshot() {
        let (mut profile, store) = fresh_profile();
        profile.toggle_favorite(&entry("sabr")).unwrap();
        profile.remove_favorite("sabr").unwrap();

        assert!(!profile.is_favorite("sabr"));
        assert!(profile.saved_words.contains_key("sabr"));

        // The persisted snapshot survives too.
        let reloaded = Profile::load(Box::new(store));
        assert!(reloaded.saved_words.contains_key("sabr"));
    }

    #[test]
    fn test_dangling_id_is_omitted_not_fatal() {
        let store = MemoryStore::default();
        store.write(FAVORITES_KEY, r#"["ghost","najwa"]"#).unwrap();
        store
            .write(
                SAVED_WORDS_KEY,
                &serde_json::to_string(&HashMap::from([("najwa".to_string(), entry("najwa"))]))
                    .unwrap(),
            )
            .unwrap();

        let profile = Profile::load(Box::new(store));
        let favorites = profile.list_favorites();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, "najwa");
    }

    #[test]
    fn test_round_trip_through_fresh_handle() {
        let store = MemoryStore::default();
        let mut profile = Profile::load(Box::new(store.clone()));
        profile.toggle_favorite(&entry("ikigai")).unwrap();
        profile.toggle_favorite(&entry("saudade")).unwrap();
        drop(profile);

        let reloaded = Profile::load(Box::new(store));
        assert_eq!(reloaded.favorite_ids, vec!["ikigai", "saudade"]);
        assert!(reloaded.saved_words.contains_key("ikigai"));
        assert!(reloaded.saved_words.contains_key("saudade"));
    }

    #[test]
    fn test_corrupt_values_degrade_to_empty() {
        let store = MemoryStore::default();
        store.write(FAVORITES_KEY, "not json at all").unwrap();
        store.write(SAVED_WORDS_KEY, "{broken").unwrap();
        store.write(QUIZ_RESULTS_KEY, "[]").unwrap();

        let profile = Profile::load(Box::new(store));
        assert!(profile.list_favorites().is_empty());
        assert!(profile.quiz_results().is_empty());
        assert!(!profile.dark_mode());
    }

    #[test]
    fn test_dark_mode_stored_as_string() {
        let (profile, store) = fresh_profile();
        assert!(!profile.dark_mode());

        profile.set_dark_mode(true).unwrap();
        assert!(profile.dark_mode());
        assert_eq!(store.read(DARK_MODE_KEY).as_deref(), Some("true"));

        profile.set_dark_mode(false).unwrap();
        assert!(!profile.dark_mode());
    }

    #[test]
    fn test_quiz_result_last_write_wins_per_day() {
        let (profile, _store) = fresh_profile();
        profile.record_quiz_result(2, 5).unwrap();
        profile.record_quiz_result(5, 5).unwrap();

        let results = profile.quiz_results();
        assert_eq!(results.len(), 1);
        let today = results.get(&today_stamp()).unwrap();
        assert_eq!(today.score, 5);
        assert_eq!(today.total, 5);
        assert_eq!(today.date, today_stamp());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("lexislore-test-{}", std::process::id()));
        let store = FileStore::new(dir.clone()).unwrap();
        store.write(FAVORITES_KEY, r#"["najwa"]"#).unwrap();
        assert_eq!(store.read(FAVORITES_KEY).as_deref(), Some(r#"["najwa"]"#));
        assert!(store.read("missing-key").is_none());
        let _ = fs::remove_dir_all(dir);
    }
}

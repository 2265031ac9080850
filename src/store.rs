use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::projection::RoundPick;

const STORE_DIR: &str = "table_whatif";
const STORE_FILE: &str = "store.json";
const STORE_VERSION: u32 = 1;

const ROUND_KEY_PREFIX: &str = "prediction_";

/// Keyed JSON persistence. The engine only ever talks to this trait, so
/// callers decide where saved picks and rival choices actually live.
pub trait Store {
    fn load(&self, key: &str) -> Option<Value>;
    fn save(&mut self, key: &str, value: Value);
    fn delete(&mut self, key: &str);
    fn keys(&self) -> Vec<String>;
}

pub fn load_typed<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Option<T> {
    let value = store.load(key)?;
    serde_json::from_value(value).ok()
}

pub fn save_typed<T: Serialize>(store: &mut dyn Store, key: &str, value: &T) {
    match serde_json::to_value(value) {
        Ok(value) => store.save(key, value),
        Err(err) => warn!("could not serialize entry for {key}: {err}"),
    }
}

/// Backing store that forgets everything on drop. Handy in tests and
/// for callers that only want the session.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoreFile {
    version: u32,
    entries: HashMap<String, Value>,
}

/// Store backed by one JSON file. Loading tolerates a missing, garbled
/// or out-of-version file by starting empty; nothing touches the disk
/// until `flush`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: HashMap<String, Value>,
}

impl JsonFileStore {
    /// Opens the store in the user's cache directory, or `None` when no
    /// cache location can be resolved.
    pub fn open_default() -> Option<Self> {
        store_path().map(Self::open)
    }

    pub fn open(path: PathBuf) -> Self {
        let entries = load_store_file(&path)
            .filter(|file| file.version == STORE_VERSION)
            .map(|file| file.entries)
            .unwrap_or_default();
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the store out through a temp file swap, so a crash mid
    /// write leaves the previous file intact.
    pub fn flush(&self) {
        let Some(dir) = self.path.parent() else {
            return;
        };
        let _ = fs::create_dir_all(dir);
        let file = StoreFile {
            version: STORE_VERSION,
            entries: self.entries.clone(),
        };
        let Ok(json) = serde_json::to_string(&file) else {
            return;
        };
        let tmp = self.path.with_extension("json.tmp");
        if fs::write(&tmp, &json).is_err() || fs::rename(&tmp, &self.path).is_err() {
            warn!("could not persist store at {}", self.path.display());
        }
    }
}

impl Store for JsonFileStore {
    fn load(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

fn load_store_file(path: &Path) -> Option<StoreFile> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str::<StoreFile>(&raw).ok()
}

fn store_path() -> Option<PathBuf> {
    // XDG_CACHE_HOME when set, ~/.cache otherwise.
    let base = match std::env::var("XDG_CACHE_HOME") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => {
            let home = std::env::var("HOME").ok()?;
            if home.trim().is_empty() {
                return None;
            }
            PathBuf::from(home).join(".cache")
        }
    };
    Some(base.join(STORE_DIR).join(STORE_FILE))
}

/// One round of hand-picked results, as saved for later comparison with
/// the real results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRound {
    pub league: u32,
    pub season: u32,
    pub round: String,
    pub team_id: u32,
    pub picks: HashMap<u64, RoundPick>,
    pub saved_at: String,
}

pub fn round_key(league: u32, season: u32, round: &str, team_id: u32) -> String {
    format!("{ROUND_KEY_PREFIX}{league}_{season}_{round}_{team_id}")
}

pub fn rival_key(team_id: u32) -> String {
    format!("rival_{team_id}")
}

/// Stamps the round with the current UTC time and writes it under its
/// composite key. Saving the same round again overwrites the earlier
/// picks.
pub fn save_round(store: &mut dyn Store, mut round: SavedRound) {
    round.saved_at = Utc::now().to_rfc3339();
    let key = round_key(round.league, round.season, &round.round, round.team_id);
    save_typed(store, &key, &round);
}

pub fn load_round(
    store: &dyn Store,
    league: u32,
    season: u32,
    round: &str,
    team_id: u32,
) -> Option<SavedRound> {
    load_typed(store, &round_key(league, season, round, team_id))
}

pub fn delete_round(store: &mut dyn Store, league: u32, season: u32, round: &str, team_id: u32) {
    store.delete(&round_key(league, season, round, team_id));
}

/// Every saved round in the store, newest first.
pub fn saved_rounds(store: &dyn Store) -> Vec<SavedRound> {
    let mut rounds: Vec<SavedRound> = store
        .keys()
        .into_iter()
        .filter(|key| key.starts_with(ROUND_KEY_PREFIX))
        .filter_map(|key| load_typed(store, &key))
        .collect();
    rounds.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    rounds
}

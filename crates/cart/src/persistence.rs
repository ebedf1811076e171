//! Best-effort cart persistence.
//!
//! The cart is written to a single named slot of a string key/value store.
//! Failures are logged and swallowed: a broken disk must never take down the
//! cart or corrupt the in-memory state.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::Context;

use crate::state::CartState;

/// Slot the cart is stored under.
pub const CART_STORAGE_KEY: &str = "cart-state-v1";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to serialize cart: {0}")]
    Serialize(String),
    #[error("failed to parse stored cart: {0}")]
    Deserialize(String),
    #[error("storage IO error: {0}")]
    Io(String),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Durable string key/value slots.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let map = self
            .inner
            .read()
            .map_err(|_| PersistenceError::Io("in-memory store poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| PersistenceError::Io("in-memory store poisoned".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| PersistenceError::Io("in-memory store poisoned".to_string()))?;
        map.remove(key);
        Ok(())
    }
}

/// File-backed store: one `{key}.json` file per slot inside `dir`.
///
/// Writes go to a sibling temp file that is then renamed over the slot, so a
/// crash mid-write leaves the previous value in place.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `{app_data_dir}/storefront`.
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(default_data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.slot_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PersistenceError::Io(format!("{}: {err}", path.display()))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.slot_path(key)?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| PersistenceError::Io(format!("{}: {e}", self.dir.display())))?;

        let tmp = path.with_extension("json.tmp");
        let written = std::fs::write(&tmp, value).and_then(|()| std::fs::rename(&tmp, &path));
        if let Err(err) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(PersistenceError::Io(format!("{}: {err}", path.display())));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let path = self.slot_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(PersistenceError::Io(format!("{}: {err}", path.display()))),
        }
    }
}

/// Resolve `{app_data_dir}/storefront`.
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory (no data_dir or home_dir)")?;

    Ok(base.join("storefront"))
}

/// Saves and loads [`CartState`] in one named slot.
#[derive(Clone)]
pub struct CartPersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl core::fmt::Debug for CartPersistence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartPersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl CartPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// In-memory persistence (tests, `--ephemeral` runs).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryKeyValueStore::new()))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write `state` to the slot. Never fails; errors are logged.
    pub fn save(&self, state: &CartState) {
        match self.try_save(state) {
            Ok(()) => tracing::debug!(key = %self.key, lines = state.lines().len(), "saved cart"),
            Err(err) => tracing::error!(key = %self.key, error = %err, "failed to save cart"),
        }
    }

    /// Read the slot. Absent, unreadable or unparsable data all yield `None`.
    pub fn load(&self) -> Option<CartState> {
        match self.try_load() {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "discarding stored cart");
                None
            }
        }
    }

    pub fn try_save(&self, state: &CartState) -> Result<(), PersistenceError> {
        let raw =
            serde_json::to_string(state).map_err(|e| PersistenceError::Serialize(e.to_string()))?;
        self.store.set(&self.key, &raw)
    }

    pub fn try_load(&self) -> Result<Option<CartState>, PersistenceError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let state = serde_json::from_str(&raw)
            .map_err(|e| PersistenceError::Deserialize(e.to_string()))?;
        Ok(Some(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CartIntent;
    use crate::state::fixtures::{add, product};
    use storefront_core::{ProductId, Reducer};

    /// Store whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Io("storage unavailable".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io("storage unavailable".to_string()))
        }
    }

    fn sample_state() -> CartState {
        CartState::empty()
            .reduce(&add(&product(3, 10.0), 2))
            .reduce(&add(&product(1, 5.5), 1))
            .reduce(&CartIntent::SetQuantity {
                product_id: ProductId(1),
                qty: 4,
            })
    }

    #[test]
    fn load_returns_what_save_wrote() {
        let persistence = CartPersistence::in_memory();
        let state = sample_state();

        persistence.save(&state);
        assert_eq!(persistence.load(), Some(state));
    }

    #[test]
    fn load_of_absent_slot_is_none() {
        assert_eq!(CartPersistence::in_memory().load(), None);
    }

    #[test]
    fn malformed_slot_loads_as_none() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let persistence = CartPersistence::new(store.clone());

        for raw in ["{not json", r#"{"lines": []}"#, r#"{"items": [{"qty": 1}]}"#, "null"] {
            store.set(CART_STORAGE_KEY, raw).unwrap();
            assert_eq!(persistence.load(), None, "{raw} should not load");
            assert!(matches!(
                persistence.try_load(),
                Err(PersistenceError::Deserialize(_))
            ));
        }
    }

    #[test]
    fn stored_layout_is_items_with_product_and_qty() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let persistence = CartPersistence::new(store.clone());
        persistence.save(&CartState::empty().reduce(&add(&product(9, 2.5), 3)));

        let raw = store.get(CART_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["items"][0]["qty"], 3);
        assert_eq!(json["items"][0]["product"]["id"], 9);
        assert_eq!(json["items"][0]["product"]["price"], 2.5);
        assert!(json.get("version").is_none());
    }

    #[test]
    fn broken_storage_is_never_fatal() {
        let persistence = CartPersistence::new(Arc::new(BrokenStore));

        persistence.save(&sample_state());
        assert_eq!(persistence.load(), None);
        assert!(matches!(
            persistence.try_save(&sample_state()),
            Err(PersistenceError::Io(_))
        ));
    }

    #[test]
    fn file_store_round_trips_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let state = sample_state();

        CartPersistence::new(Arc::new(FileKeyValueStore::new(dir.path()))).save(&state);
        let reopened = CartPersistence::new(Arc::new(FileKeyValueStore::new(dir.path())));

        assert_eq!(reopened.load(), Some(state));
        assert!(dir.path().join("cart-state-v1.json").exists());
        assert!(!dir.path().join("cart-state-v1.json.tmp").exists());
    }

    #[test]
    fn file_store_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileKeyValueStore::new(&nested);

        assert_eq!(store.get("slot").unwrap(), None);
        store.set("slot", "value").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("value"));

        store.remove("slot").unwrap();
        store.remove("slot").unwrap();
        assert_eq!(store.get("slot").unwrap(), None);
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                store.set(key, "x"),
                Err(PersistenceError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let slot = dir.path().join("slot.json");
        std::fs::create_dir(&slot).unwrap();
        std::fs::write(slot.join("occupied"), "x").unwrap();
        let store = FileKeyValueStore::new(dir.path());

        assert!(matches!(store.set("slot", "value"), Err(PersistenceError::Io(_))));
        assert!(!dir.path().join("slot.json.tmp").exists());
    }

    #[test]
    fn default_data_dir_ends_with_app_name() {
        if let Ok(dir) = default_data_dir() {
            assert!(dir.ends_with("storefront"));
        }
        if let Ok(store) = FileKeyValueStore::open_default() {
            assert!(store.dir().ends_with("storefront"));
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: load(save(s)) == s, order preserved.
            #[test]
            fn save_then_load_round_trips(
                lines in prop::collection::vec((0u64..50, 1i64..20, 0u32..100_000), 0..10)
            ) {
                let state = lines.iter().fold(CartState::empty(), |state, (id, qty, cents)| {
                    state.reduce(&add(&product(*id, f64::from(*cents) / 100.0), *qty))
                });

                let persistence = CartPersistence::in_memory();
                persistence.save(&state);
                prop_assert_eq!(persistence.load(), Some(state));
            }
        }
    }
}

/// Recently opened keys, kept in synced extension storage

use crate::error::StorageError;
use crate::redirect::{go_url, TabNavigator};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storage key holding the list
pub const RECENT_KEYS_STORAGE_KEY: &str = "recentKeys";

/// Awaitable key-value storage scoped to the browser profile.
///
/// Writes are last-write-wins; syncing across browser instances is the
/// host's business.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// Most-recent-first, duplicate-free, bounded list of keys
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RecentKeys {
    keys: Vec<String>,
}

impl RecentKeys {
    pub fn new(keys: Vec<String>) -> Self {
        RecentKeys { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Move `key` to the front, dropping anything past `limit`
    pub fn record(&mut self, key: &str, limit: usize) {
        self.keys.retain(|k| k != key);
        self.keys.insert(0, key.to_string());
        self.keys.truncate(limit);
    }

    pub fn chips(&self) -> Vec<RecentChip> {
        self.keys
            .iter()
            .map(|key| RecentChip {
                label: key.clone(),
                hint: format!("go/{}", key),
            })
            .collect()
    }
}

/// One quick-access shortcut in the popup
#[derive(Debug, Clone, PartialEq)]
pub struct RecentChip {
    pub label: String,
    pub hint: String,
}

pub struct RecentKeysStore<K: KeyValueStore> {
    store: K,
    limit: usize,
}

impl<K: KeyValueStore> RecentKeysStore<K> {
    pub fn new(store: K, limit: usize) -> Self {
        RecentKeysStore { store, limit }
    }

    /// Read the persisted list; missing means empty
    pub async fn load(&self) -> Result<RecentKeys, StorageError> {
        match self.store.get(RECENT_KEYS_STORAGE_KEY).await? {
            None | Some(Value::Null) => Ok(RecentKeys::default()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Like `load`, but a storage failure renders as an empty section
    pub async fn load_or_empty(&self) -> RecentKeys {
        self.load().await.unwrap_or_else(|e| {
            error!("Failed to read recent keys: {}", e);
            RecentKeys::default()
        })
    }

    /// Record a use of `key` and return the list as persisted
    pub async fn save_recent_key(&self, key: &str) -> Result<RecentKeys, StorageError> {
        let mut recent = self.load().await?;
        recent.record(key, self.limit);
        self.store
            .set(RECENT_KEYS_STORAGE_KEY, serde_json::to_value(&recent)?)
            .await?;
        Ok(recent)
    }
}

/// Open a key from the popup: new focused tab, then remember the key.
///
/// Returns the refreshed list, or `None` when the input was blank and
/// nothing happened.
pub async fn open_go_link<N, K>(
    navigator: &N,
    recent: &RecentKeysStore<K>,
    redirect_base: &str,
    raw: &str,
) -> Option<RecentKeys>
where
    N: TabNavigator,
    K: KeyValueStore,
{
    let url = go_url(redirect_base, raw)?;
    let key = raw.trim();

    info!("opening go/{}", key);
    navigator.create_tab(&url, true);

    match recent.save_recent_key(key).await {
        Ok(keys) => Some(keys),
        Err(e) => {
            error!("Failed to save recent key {}: {}", key, e);
            Some(recent.load_or_empty().await)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::KeyValueStore;
    use crate::error::StorageError;
    use serde_json::Value;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    /// In-memory stand-in for synced storage
    #[derive(Default)]
    pub struct MemoryStore {
        pub values: RefCell<HashMap<String, Value>>,
        pub fail_writes: Cell<bool>,
    }

    impl KeyValueStore for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
            Ok(self.values.borrow().get(key).cloned())
        }

        async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::Bridge("quota exceeded".to_string()));
            }
            self.values.borrow_mut().insert(key.to_string(), value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryStore;
    use super::*;
    use crate::redirect::testing::RecordingNavigator;
    use crate::redirect::Navigation;
    use futures::executor::block_on;
    use serde_json::json;

    const BASE: &str = "https://app.tawhid.in/go/";

    fn keys(list: &RecentKeys) -> Vec<&str> {
        list.keys().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_record_is_most_recent_first() {
        let mut recent = RecentKeys::default();
        recent.record("a", 6);
        recent.record("b", 6);
        recent.record("c", 6);

        assert_eq!(keys(&recent), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_record_existing_moves_to_front() {
        let mut recent = RecentKeys::new(vec!["c".into(), "b".into(), "a".into()]);
        recent.record("a", 6);

        assert_eq!(keys(&recent), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_record_is_bounded() {
        let mut recent = RecentKeys::default();
        for key in ["k1", "k2", "k3", "k4", "k5", "k6", "k7", "k8"] {
            recent.record(key, 6);
            assert!(recent.keys().len() <= 6);
        }

        assert_eq!(keys(&recent), vec!["k8", "k7", "k6", "k5", "k4", "k3"]);
    }

    #[test]
    fn test_chips() {
        let recent = RecentKeys::new(vec!["cal".into()]);
        assert_eq!(
            recent.chips(),
            vec![RecentChip { label: "cal".into(), hint: "go/cal".into() }]
        );
    }

    #[test]
    fn test_store_persists_under_recent_keys() {
        let store = RecentKeysStore::new(MemoryStore::default(), 6);

        block_on(store.save_recent_key("docs")).unwrap();
        block_on(store.save_recent_key("cal")).unwrap();
        block_on(store.save_recent_key("docs")).unwrap();

        assert_eq!(
            store.store.values.borrow().get(RECENT_KEYS_STORAGE_KEY),
            Some(&json!(["docs", "cal"]))
        );
        assert_eq!(keys(&block_on(store.load()).unwrap()), vec!["docs", "cal"]);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = RecentKeysStore::new(MemoryStore::default(), 6);
        assert!(block_on(store.load()).unwrap().is_empty());

        store
            .store
            .values
            .borrow_mut()
            .insert(RECENT_KEYS_STORAGE_KEY.to_string(), Value::Null);
        assert!(block_on(store.load()).unwrap().is_empty());
    }

    #[test]
    fn test_load_malformed_is_error() {
        let store = RecentKeysStore::new(MemoryStore::default(), 6);
        store
            .store
            .values
            .borrow_mut()
            .insert(RECENT_KEYS_STORAGE_KEY.to_string(), json!({ "oops": 1 }));

        assert!(matches!(block_on(store.load()), Err(StorageError::Serde(_))));
        assert!(block_on(store.load_or_empty()).is_empty());
    }

    #[test]
    fn test_open_go_link_navigates_and_records() {
        let navigator = RecordingNavigator::default();
        let store = RecentKeysStore::new(MemoryStore::default(), 6);

        let recent = block_on(open_go_link(&navigator, &store, BASE, "  team wiki ")).unwrap();

        assert_eq!(
            *navigator.calls.borrow(),
            vec![Navigation::CreateTab {
                url: "https://app.tawhid.in/go/team%20wiki".to_string(),
                active: true,
            }]
        );
        assert_eq!(keys(&recent), vec!["team wiki"]);
    }

    #[test]
    fn test_open_go_link_blank_is_noop() {
        let navigator = RecordingNavigator::default();
        let store = RecentKeysStore::new(MemoryStore::default(), 6);

        assert_eq!(block_on(open_go_link(&navigator, &store, BASE, "  ")), None);
        assert!(navigator.calls.borrow().is_empty());
        assert!(store.store.values.borrow().is_empty());
    }

    #[test]
    fn test_open_go_link_survives_storage_failure() {
        let navigator = RecordingNavigator::default();
        let store = RecentKeysStore::new(MemoryStore::default(), 6);
        store.store.fail_writes.set(true);

        let recent = block_on(open_go_link(&navigator, &store, BASE, "cal")).unwrap();

        assert_eq!(navigator.calls.borrow().len(), 1);
        assert!(recent.is_empty());
    }
}

//! Session-scoped key-value storage for the wizard position

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Key the current step is persisted under
pub const STEP_STORAGE_KEY: &str = "multiStepFormCurrentStep";

/// String key-value store that lives as long as one browsing session
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: String);
    fn remove_item(&self, key: &str);
}

/// In-process storage. Clones share the same items, so a handle kept
/// by the caller observes what the wizard writes.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one item
    pub fn with_item(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.set_item(key, value.into());
        storage
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave a HashMap half-written
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: String) {
        self.items().insert(key.to_string(), value);
    }

    fn remove_item(&self, key: &str) {
        self.items().remove(key);
    }
}

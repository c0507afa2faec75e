use tempfiles_core::{PreferenceStore, StorageError};
use web_sys::Storage;

use super::dom::js_error_text;

/// `window.localStorage`. Values are stored as raw strings (`dark`), not JSON.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Fails when storage is disabled (private browsing, sandboxed frames).
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::WriteRejected(js_error_text(&err)))
    }
}

//! # Browser `localStorage` backend
//!
//! [`LocalStorage`] is the [`KeyValueStore`] used on the **web platform**. It is a
//! zero-size handle that looks up `window.localStorage` on every call, so it is
//! `Clone` and `'static` and can sit inside a Dioxus signal.
//!
//! ## Error handling
//!
//! Storage can be missing (no `window`), disabled (some private-browsing modes) or
//! full. Every failure is logged and then treated as "nothing stored": reads return
//! `None` and writes are dropped. The worst case is a user who has to log in again
//! after a reload.

use web_sys::Storage;

use crate::session::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<Storage> {
        match web_sys::window()?.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!("localStorage unavailable: {:?}", e);
                None
            }
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.storage()?.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read {} from localStorage: {:?}", key, e);
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else { return };
        if let Err(e) = storage.set_item(key, value) {
            tracing::warn!("Failed to write {} to localStorage: {:?}", key, e);
        }
    }

    fn remove_item(&self, key: &str) {
        let Some(storage) = self.storage() else { return };
        if let Err(e) = storage.remove_item(key) {
            tracing::warn!("Failed to remove {} from localStorage: {:?}", key, e);
        }
    }
}

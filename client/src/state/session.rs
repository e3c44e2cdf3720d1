//! Operator session: bearer token plus the currently selected grant.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is created once at startup and provided via context. The API
//! client reads the token from it on every request, route guards check it on
//! mount, and the grant picker writes the selection that scopes the grant
//! pages.
//!
//! DESIGN
//! ======
//! Values live behind a `KeyValueStore` so the browser build persists them in
//! `localStorage` while tests and SSR use memory. Keys match the storage names
//! used by earlier dashboard builds so existing sign-ins survive an upgrade.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

pub const TOKEN_KEY: &str = "access_token";
pub const GRANT_ID_KEY: &str = "selected_grant_id";
pub const GRANT_TITLE_KEY: &str = "selected_grant_title";

/// Minimal string store backing the session.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`; inert outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Process-local store for tests and server rendering.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// The grant that scopes expense, rule, role, and projection views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedGrant {
    pub id: String,
    pub title: String,
}

/// Shared handle to the operator's persisted session values.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Session persisted in `localStorage`.
    pub fn browser() -> Self {
        Self::new(Arc::new(BrowserStorage))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    /// Stored bearer token; an empty value counts as signed out.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(&self, token: &str) {
        self.store.set(TOKEN_KEY, token);
    }

    /// Forget the token and the grant selection.
    pub fn sign_out(&self) {
        self.store.remove(TOKEN_KEY);
        self.clear_grant();
    }

    pub fn selected_grant(&self) -> Option<SelectedGrant> {
        let id = self.store.get(GRANT_ID_KEY).filter(|id| !id.is_empty())?;
        let title = self.store.get(GRANT_TITLE_KEY).unwrap_or_default();
        Some(SelectedGrant { id, title })
    }

    pub fn select_grant(&self, id: &str, title: &str) {
        self.store.set(GRANT_ID_KEY, id);
        self.store.set(GRANT_TITLE_KEY, title);
    }

    pub fn clear_grant(&self) {
        self.store.remove(GRANT_ID_KEY);
        self.store.remove(GRANT_TITLE_KEY);
    }
}

//! # Session persistence
//!
//! The logged-in username survives page reloads through a single key-value entry
//! ([`SESSION_KEY`]) in a [`KeyValueStore`]. In the browser that store is
//! `localStorage` ([`crate::LocalStorage`]); natively and in tests it is
//! [`crate::MemoryStorage`].
//!
//! [`SessionStore`] is the thin persistence contract (`get` / `set` / `clear`).
//! [`SessionContext`] pairs it with the in-memory [`Session`] and is the only
//! writer of either, so the two cannot drift apart: every mutation writes the store
//! and the in-memory copy in the same call.

/// Storage key holding the logged-in username.
pub const SESSION_KEY: &str = "user";

/// Synchronous string key-value surface, shaped after the Web Storage API.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Identity of the current user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn { username: String },
}

impl Session {
    pub fn username(&self) -> Option<&str> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn { username } => Some(username.as_str()),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }
}

/// Persisted session backed by a [`KeyValueStore`].
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read the persisted session. A missing or empty entry means logged out.
    pub fn get(&self) -> Session {
        match self.storage.get_item(SESSION_KEY) {
            Some(username) if !username.is_empty() => Session::LoggedIn { username },
            _ => Session::LoggedOut,
        }
    }

    pub fn set(&self, username: &str) {
        self.storage.set_item(SESSION_KEY, username);
    }

    pub fn clear(&self) {
        self.storage.remove_item(SESSION_KEY);
    }
}

/// The single writer of the session: persisted store plus in-memory mirror.
#[derive(Clone, Debug)]
pub struct SessionContext<S> {
    store: SessionStore<S>,
    current: Session,
}

impl<S: KeyValueStore> SessionContext<S> {
    /// Initialize the in-memory session from whatever the store holds.
    pub fn restore(store: SessionStore<S>) -> Self {
        let current = store.get();
        Self { store, current }
    }

    pub fn current(&self) -> &Session {
        &self.current
    }

    pub fn username(&self) -> Option<&str> {
        self.current.username()
    }

    pub fn login(&mut self, username: &str) {
        self.store.set(username);
        self.current = Session::LoggedIn {
            username: username.to_string(),
        };
        tracing::info!("Logged in as {}", username);
    }

    pub fn logout(&mut self) {
        self.store.clear();
        self.current = Session::LoggedOut;
        tracing::info!("Logged out");
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }
}

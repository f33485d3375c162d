//! Authenticated session
//!
//! One injected object owns the persisted bearer token: a single read path
//! for request construction (`token`) and a single invalidation path
//! (`expire`) for sign-out and 401 responses.

use leptos::prelude::*;
use shared::CONFIG;

#[derive(Clone, Copy)]
pub struct Session {
    token: RwSignal<Option<String>>,
}

impl Session {
    /// Restore whatever token a previous visit persisted
    pub fn restore() -> Self {
        let token = storage().and_then(|storage| {
            storage
                .get_item(CONFIG.storage.token_key)
                .ok()
                .flatten()
                .or_else(|| storage.get_item(CONFIG.storage.legacy_token_key).ok().flatten())
        });
        Session {
            token: RwSignal::new(token),
        }
    }

    /// Current bearer token, if signed in
    pub fn token(&self) -> Option<String> {
        self.token.get_untracked()
    }

    /// Persist a fresh token after sign-in
    pub fn store(&self, token: String) {
        if let Some(storage) = storage() {
            let _ = storage.set_item(CONFIG.storage.token_key, &token);
        }
        self.token.set(Some(token));
    }

    /// Clear the persisted token and return to the sign-in view
    pub fn expire(&self) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(CONFIG.storage.token_key);
            let _ = storage.remove_item(CONFIG.storage.legacy_token_key);
        }
        self.token.set(None);
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/");
        }
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

/// Session accessor for components and API calls
pub fn use_session() -> Session {
    expect_context::<Session>()
}

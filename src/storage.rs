//! localStorage access. The console persists exactly two values client-side:
//! the opaque bearer token and the theme mode string. Everything else lives in
//! memory and is re-fetched from the backend.

use web_sys::Storage;

use crate::constants::{THEME_STORAGE_KEY, TOKEN_STORAGE_KEY};

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Bearer-token persistence. Callers re-read on every request so a token
/// change takes effect on the next call, not at client construction.
pub struct TokenStore;

impl TokenStore {
    pub fn get() -> Option<String> {
        local_storage()
            .and_then(|s| s.get_item(TOKEN_STORAGE_KEY).ok().flatten())
            .filter(|t| !t.is_empty())
    }

    pub fn set(token: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
                log::warn!("failed to persist auth token");
            }
        }
    }

    pub fn clear() {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}

/// Read the persisted theme mode string, if any.
pub fn load_theme_mode() -> Option<String> {
    local_storage().and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten())
}

/// Persist the theme mode string (`"light"`, `"dark"`, `"system"`).
pub fn save_theme_mode(mode: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(THEME_STORAGE_KEY, mode).is_err() {
            log::warn!("failed to persist theme mode");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn token_round_trip_and_clear() {
        TokenStore::set("abc123");
        assert_eq!(TokenStore::get().as_deref(), Some("abc123"));

        TokenStore::clear();
        assert_eq!(TokenStore::get(), None);

        // Clearing twice is harmless.
        TokenStore::clear();
        assert_eq!(TokenStore::get(), None);
    }

    #[wasm_bindgen_test]
    fn empty_token_reads_as_absent() {
        TokenStore::set("");
        assert_eq!(TokenStore::get(), None);
        TokenStore::clear();
    }

    #[wasm_bindgen_test]
    fn theme_mode_round_trip() {
        save_theme_mode("system");
        assert_eq!(load_theme_mode().as_deref(), Some("system"));
    }
}

//! Tri-state color theme (light / dark / system) with OS-preference fallback.
//!
//! The selected mode is persisted; the effective theme is derived and applied
//! by setting `data-theme` on the document root, which the stylesheet keys on.
//! While the mode is System we subscribe to the `prefers-color-scheme` media
//! query; leaving System mode detaches the listener.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MediaQueryList, MediaQueryListEvent};

use crate::storage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectiveTheme {
    Light,
    Dark,
}

impl EffectiveTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveTheme::Light => "light",
            EffectiveTheme::Dark => "dark",
        }
    }
}

/// Derive the effective theme from the selected mode and the OS preference.
pub fn effective_theme(mode: ThemeMode, os_prefers_dark: bool) -> EffectiveTheme {
    match mode {
        ThemeMode::Light => EffectiveTheme::Light,
        ThemeMode::Dark => EffectiveTheme::Dark,
        ThemeMode::System => {
            if os_prefers_dark {
                EffectiveTheme::Dark
            } else {
                EffectiveTheme::Light
            }
        }
    }
}

/// Theme portion of the application state. Holds the media-query subscription
/// so it can be detached when leaving System mode.
pub struct ThemeState {
    pub mode: ThemeMode,
    pub effective: EffectiveTheme,
    media_query: Option<MediaQueryList>,
    listener: Option<Closure<dyn FnMut(MediaQueryListEvent)>>,
}

impl ThemeState {
    /// Restore the persisted mode (default System) and apply the derived
    /// effective theme to the document root.
    pub fn init() -> Self {
        let mode = storage::load_theme_mode()
            .as_deref()
            .and_then(ThemeMode::parse)
            .unwrap_or(ThemeMode::System);

        let mut state = Self {
            mode,
            effective: effective_theme(mode, os_prefers_dark()),
            media_query: None,
            listener: None,
        };
        state.apply();
        state.sync_subscription();
        state
    }

    /// Select a new mode. Persists the *mode* (not the derived theme),
    /// recomputes the effective theme, and updates the subscription.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
        storage::save_theme_mode(mode.as_str());
        self.effective = effective_theme(mode, os_prefers_dark());
        self.apply();
        self.sync_subscription();
    }

    /// Called from the media-query listener when the OS preference flips.
    pub fn os_preference_changed(&mut self, prefers_dark: bool) {
        if self.mode == ThemeMode::System {
            self.effective = effective_theme(self.mode, prefers_dark);
            self.apply();
        }
    }

    fn apply(&self) {
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.set_attribute("data-theme", self.effective.as_str());
        }
    }

    /// Attach the `prefers-color-scheme` listener while in System mode and
    /// detach it otherwise.
    fn sync_subscription(&mut self) {
        if self.mode == ThemeMode::System {
            if self.media_query.is_none() {
                self.subscribe();
            }
        } else {
            self.unsubscribe();
        }
    }

    fn subscribe(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(Some(mql)) = window.match_media("(prefers-color-scheme: dark)") else {
            return;
        };

        let callback = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
            crate::state::dispatch_global_message(crate::messages::Message::OsPreferenceChanged {
                prefers_dark: event.matches(),
            });
        }) as Box<dyn FnMut(MediaQueryListEvent)>);

        if mql
            .add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
            .is_ok()
        {
            self.media_query = Some(mql);
            self.listener = Some(callback);
        }
    }

    fn unsubscribe(&mut self) {
        if let (Some(mql), Some(callback)) = (self.media_query.take(), self.listener.take()) {
            let _ = mql.remove_event_listener_with_callback(
                "change",
                callback.as_ref().unchecked_ref(),
            );
        }
    }
}

fn os_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_modes_ignore_os_preference() {
        assert_eq!(effective_theme(ThemeMode::Light, true), EffectiveTheme::Light);
        assert_eq!(effective_theme(ThemeMode::Dark, false), EffectiveTheme::Dark);
    }

    #[test]
    fn system_mode_follows_os_preference() {
        assert_eq!(effective_theme(ThemeMode::System, true), EffectiveTheme::Dark);
        assert_eq!(effective_theme(ThemeMode::System, false), EffectiveTheme::Light);
    }

    #[test]
    fn mode_strings_round_trip() {
        for mode in [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System] {
            assert_eq!(ThemeMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(ThemeMode::parse("solarized"), None);
    }
}

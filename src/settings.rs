//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web. Physics tuning rides along so a tweaked
//! feel survives reloads.

use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;
use crate::tuning::PhysicsTuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keyboard layout for the three commands
    pub bindings: KeyBindings,

    // === Overlay ===
    /// Control hints and jump counter
    pub show_hud: bool,
    /// Red band marking where falling respawns you
    pub show_death_zone: bool,
    /// Glowing marker at the spawn point
    pub show_spawn_marker: bool,

    // === Accessibility ===
    /// Freeze decorative animation (spawn marker spin)
    pub reduced_motion: bool,

    /// Physics constants for the player
    pub tuning: PhysicsTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            show_hud: true,
            show_death_zone: true,
            show_spawn_marker: true,
            reduced_motion: false,
            tuning: PhysicsTuning::default(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "canvas_platformer_settings";

    /// Parse stored settings. Invalid tuning is replaced by the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        if let Err(e) = settings.tuning.validate() {
            log::warn!("Ignoring stored tuning: {}", e);
            settings.tuning = PhysicsTuning::default();
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Settings for what storage held, and whether storage should be rewritten.
    /// A missing or unreadable entry is replaced by the defaults.
    fn from_stored(stored: Option<&str>) -> (Self, bool) {
        match stored.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                (settings, false)
            }
            Some(Err(e)) => {
                log::warn!("Stored settings unreadable: {}", e);
                (Self::default(), true)
            }
            None => {
                log::info!("Using default settings");
                (Self::default(), true)
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        let stored = storage
            .as_ref()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());

        let (settings, rewrite) = Self::from_stored(stored.as_deref());
        if rewrite {
            settings.save();
        }
        settings
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        else {
            return;
        };

        match self.to_json() {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Settings not saved: {:?}", e),
            },
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_stored(None).0
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Command;

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.show_death_zone = false;
        settings.bindings.rebind(Command::Jump, "KeyK");
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{ "reduced_motion": true }"#).unwrap();
        assert!(settings.reduced_motion);
        assert!(settings.show_hud);
        assert_eq!(settings.bindings, KeyBindings::default());
        assert_eq!(settings.tuning, PhysicsTuning::default());
    }

    #[test]
    fn test_invalid_tuning_falls_back() {
        let settings = Settings::from_json(r#"{ "tuning": { "friction": 2.0 } }"#).unwrap();
        assert_eq!(settings.tuning, PhysicsTuning::default());
    }

    #[test]
    fn test_stored_settings_are_kept() {
        let mut saved = Settings::default();
        saved.bindings.rebind(Command::MoveLeft, "KeyJ");
        let json = saved.to_json().unwrap();

        let (settings, rewrite) = Settings::from_stored(Some(&json));
        assert_eq!(settings, saved);
        assert!(!rewrite);
    }

    #[test]
    fn test_missing_or_unreadable_storage_is_rewritten() {
        let (settings, rewrite) = Settings::from_stored(None);
        assert_eq!(settings, Settings::default());
        assert!(rewrite);

        let (settings, rewrite) = Settings::from_stored(Some("{"));
        assert_eq!(settings, Settings::default());
        assert!(rewrite);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(Settings::from_json("{").is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_load_is_default() {
        assert_eq!(Settings::load(), Settings::default());
    }
}

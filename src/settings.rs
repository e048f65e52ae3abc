//! Player preferences
//!
//! Persisted as individual LocalStorage keys so each control survives a
//! reload on its own. Values are JSON-encoded; enums are stored by name.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::audio::AudioTheme;
use crate::error::PreferenceError;
use crate::platform::PreferenceStore;
use crate::theme::Theme;

/// Player preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Background theme
    pub theme: Theme,
    /// Oscillator voice for effects and music
    pub audio_theme: AudioTheme,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    pub muted: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Grass,
            audio_theme: AudioTheme::Default,
            volume: 0.5,
            muted: false,
        }
    }
}

impl Preferences {
    pub const THEME_KEY: &'static str = "snakeGameTheme";
    pub const AUDIO_THEME_KEY: &'static str = "snakeGameAudioTheme";
    pub const VOLUME_KEY: &'static str = "snakeGameVolume";
    pub const MUTED_KEY: &'static str = "snakeGameMuted";

    /// Read preferences key by key. A missing key keeps its default; a bad
    /// one is logged and also keeps its default, without affecting the others.
    pub fn load_from(store: &impl PreferenceStore) -> Self {
        let mut prefs = Self::default();

        if let Some(theme) = keep_valid(read_named(store, Self::THEME_KEY, Theme::from_str)) {
            prefs.theme = theme;
        }
        if let Some(audio_theme) =
            keep_valid(read_named(store, Self::AUDIO_THEME_KEY, AudioTheme::from_str))
        {
            prefs.audio_theme = audio_theme;
        }
        if let Some(volume) = keep_valid(read_json::<f32>(store, Self::VOLUME_KEY)) {
            prefs.volume = volume.clamp(0.0, 1.0);
        }
        if let Some(muted) = keep_valid(read_json(store, Self::MUTED_KEY)) {
            prefs.muted = muted;
        }

        log::info!("Loaded preferences: {:?}", prefs);
        prefs
    }

    pub fn save_to(&self, store: &mut impl PreferenceStore) -> Result<(), PreferenceError> {
        store.set(Self::THEME_KEY, self.theme.as_str())?;
        store.set(Self::AUDIO_THEME_KEY, self.audio_theme.as_str())?;
        write_json(store, Self::VOLUME_KEY, &self.volume)?;
        write_json(store, Self::MUTED_KEY, &self.muted)?;
        Ok(())
    }
}

fn keep_valid<T>(read: Result<Option<T>, PreferenceError>) -> Option<T> {
    match read {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring stored preference: {}", e);
            None
        }
    }
}

/// Enum stored by name
fn read_named<T>(
    store: &impl PreferenceStore,
    key: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, PreferenceError> {
    store
        .get(key)?
        .map(|value| parse(&value).ok_or(PreferenceError::UnknownValue { key, value }))
        .transpose()
}

fn read_json<T: DeserializeOwned>(
    store: &impl PreferenceStore,
    key: &'static str,
) -> Result<Option<T>, PreferenceError> {
    store
        .get(key)?
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| PreferenceError::Malformed { key, source })
        })
        .transpose()
}

fn write_json<T: Serialize>(
    store: &mut impl PreferenceStore,
    key: &'static str,
    value: &T,
) -> Result<(), PreferenceError> {
    let json =
        serde_json::to_string(value).map_err(|source| PreferenceError::Malformed { key, source })?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        let prefs = Preferences::load_from(&store);
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.volume, 0.5);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let prefs = Preferences {
            theme: Theme::Ocean,
            audio_theme: AudioTheme::Arcade,
            volume: 0.25,
            muted: true,
        };
        prefs.save_to(&mut store).expect("save");

        assert_eq!(
            store.get(Preferences::THEME_KEY).expect("get").as_deref(),
            Some("ocean")
        );
        assert_eq!(Preferences::load_from(&store), prefs);
    }

    #[test]
    fn test_malformed_volume_keeps_other_keys() {
        let mut store = MemoryStore::new();
        store.set(Preferences::VOLUME_KEY, "loud").expect("set");
        store.set(Preferences::THEME_KEY, "desert").expect("set");
        store.set(Preferences::MUTED_KEY, "true").expect("set");

        let err = read_json::<f32>(&store, Preferences::VOLUME_KEY).unwrap_err();
        assert!(matches!(err, PreferenceError::Malformed { key: "snakeGameVolume", .. }));

        let prefs = Preferences::load_from(&store);
        assert_eq!(prefs.volume, 0.5);
        assert_eq!(prefs.theme, Theme::Desert);
        assert!(prefs.muted);
    }

    #[test]
    fn test_unknown_theme_keeps_other_keys() {
        let mut store = MemoryStore::new();
        store.set(Preferences::THEME_KEY, "neon").expect("set");
        store.set(Preferences::AUDIO_THEME_KEY, "arcade").expect("set");
        store.set(Preferences::VOLUME_KEY, "0.2").expect("set");

        assert!(matches!(
            read_named(&store, Preferences::THEME_KEY, Theme::from_str),
            Err(PreferenceError::UnknownValue { .. })
        ));

        let prefs = Preferences::load_from(&store);
        assert_eq!(prefs.theme, Theme::Grass);
        assert_eq!(prefs.audio_theme, AudioTheme::Arcade);
        assert_eq!(prefs.volume, 0.2);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut store = MemoryStore::new();
        store.set(Preferences::VOLUME_KEY, "3.5").expect("set");
        assert_eq!(Preferences::load_from(&store).volume, 1.0);
    }
}

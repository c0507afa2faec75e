use std::{collections::HashMap, fmt, str::FromStr};

use tracing::{info, warn};

use crate::{StorageError, THEME_STORAGE_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Dark => "dark",
            ThemePreference::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
        }
    }

    /// Toggle icon: offers the sun while dark, the moon while light.
    pub fn icon(self) -> &'static str {
        match self {
            ThemePreference::Dark => "☀️",
            ThemePreference::Light => "🌙",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme {:?}", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for ThemePreference {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(ThemePreference::Dark),
            "light" => Ok(ThemePreference::Light),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

/// Durable key-value storage for user preferences.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store, used when the browser refuses durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeView {
    pub data_theme: &'static str,
    pub icon: &'static str,
}

#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    current: ThemePreference,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Reads the saved preference once; anything missing or unreadable means dark.
    pub fn load(store: S) -> Self {
        let current = match store.load(THEME_STORAGE_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|err: UnknownTheme| {
                warn!("ignoring saved theme: {err}");
                ThemePreference::default()
            }),
            None => ThemePreference::default(),
        };
        Self { store, current }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    /// Flips the theme and persists it. A failed write still flips the page.
    pub fn toggle(&mut self) -> ThemePreference {
        self.current = self.current.toggled();
        if let Err(err) = self.store.save(THEME_STORAGE_KEY, self.current.as_str()) {
            warn!(theme = %self.current, "theme not persisted: {err}");
        } else {
            info!(theme = %self.current, "theme changed");
        }
        self.current
    }

    pub fn view(&self) -> ThemeView {
        ThemeView {
            data_theme: self.current.as_str(),
            icon: self.current.icon(),
        }
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStore;

    impl PreferenceStore for ReadOnlyStore {
        fn load(&self, _key: &str) -> Option<String> {
            Some("light".to_owned())
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteRejected("quota exceeded".to_owned()))
        }
    }

    #[test]
    fn defaults_to_dark() {
        let theme = ThemeController::load(MemoryStore::default());
        assert_eq!(theme.current(), ThemePreference::Dark);
        assert_eq!(
            theme.view(),
            ThemeView {
                data_theme: "dark",
                icon: "☀️"
            }
        );
    }

    #[test]
    fn unknown_saved_value_falls_back_to_dark() {
        let mut store = MemoryStore::default();
        store.save(THEME_STORAGE_KEY, "sepia").unwrap();
        let theme = ThemeController::load(store);
        assert_eq!(theme.current(), ThemePreference::Dark);
    }

    #[test]
    fn failed_write_still_toggles() {
        let mut theme = ThemeController::load(ReadOnlyStore);
        assert_eq!(theme.current(), ThemePreference::Light);
        assert_eq!(theme.toggle(), ThemePreference::Dark);
        assert_eq!(theme.view().icon, "☀️");
    }

    #[test]
    fn storage_values_parse_back() {
        for theme in [ThemePreference::Dark, ThemePreference::Light] {
            assert_eq!(theme.to_string().parse::<ThemePreference>(), Ok(theme));
        }
        assert_eq!(
            "Dark".parse::<ThemePreference>(),
            Err(UnknownTheme("Dark".to_owned()))
        );
    }

    #[test]
    fn unavailable_storage_still_toggles() {
        struct NoStorage;

        impl PreferenceStore for NoStorage {
            fn load(&self, _key: &str) -> Option<String> {
                None
            }

            fn save(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Unavailable)
            }
        }

        let mut theme = ThemeController::load(NoStorage);
        assert_eq!(theme.toggle(), ThemePreference::Light);
        assert_eq!(theme.view().data_theme, "light");
    }
}

//! The light/dark display theme, remembered across runs

use std::error::Error;

use crate::storage::{Storage, DARK_MODE_KEY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Read the theme from the storage. Anything but `"enabled"` means the light theme
    pub fn load<S: Storage>(storage: &S) -> Self {
        match storage.get(DARK_MODE_KEY) {
            Ok(Some(flag)) if flag == "enabled" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(err) => {
                log::warn!("Unable to read the theme: {}", err);
                Theme::Light
            },
        }
    }

    /// Switch to the other theme, persist it, and return it
    pub fn toggle<S: Storage>(storage: &mut S) -> Result<Self, Box<dyn Error>> {
        let new_theme = match Self::load(&*storage) {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        storage.set(DARK_MODE_KEY, new_theme.flag())?;
        log::info!("Switched to the {:?} theme", new_theme);
        Ok(new_theme)
    }

    /// The value stored under the dark mode key
    pub fn flag(&self) -> &'static str {
        match self {
            Theme::Light => "disabled",
            Theme::Dark => "enabled",
        }
    }

    /// The label of the button that switches away from this theme
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "🌙 Dark Mode",
            Theme::Dark => "☀ Light Mode",
        }
    }
}

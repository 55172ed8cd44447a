use log::warn;

use crate::cache::{KeyValueStore, THEME_KEY};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// ANSI escape used for headings and scores.
    pub fn accent(self) -> &'static str {
        match self {
            Theme::Light => "\x1b[31m",
            Theme::Dark => "\x1b[91m",
        }
    }
}

/// Unknown or unreadable values fall back to the light theme.
pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(value)) => Theme::parse(&value).unwrap_or_default(),
        Ok(None) => Theme::default(),
        Err(e) => {
            warn!("Error loading theme: {:#}", e);
            Theme::default()
        }
    }
}

pub fn save_theme(store: &dyn KeyValueStore, theme: Theme) {
    if let Err(e) = store.set(THEME_KEY, theme.as_str()) {
        warn!("Error saving theme: {:#}", e);
    }
}

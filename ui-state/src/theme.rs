//! Light/dark theme preference.

use common::errors::AppResult;
use serde::{Deserialize, Serialize};

use crate::storage::PreferenceStore;
use crate::toast::Toaster;

/// Storage key holding the theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value of the document's `data-theme` attribute and of the stored preference.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Icon class of the toggle button.
    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Light => "bx bxs-sun",
            Theme::Dark => "bx bxs-moon",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme toggle button and the document theme it controls.
pub struct ThemeToggle {
    store: Box<dyn PreferenceStore>,
    theme: Theme,
    icon: &'static str,
}

impl ThemeToggle {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        let theme = Theme::default();
        Self {
            store,
            theme,
            icon: theme.icon_class(),
        }
    }

    /// Applies the stored preference, defaulting to dark.
    pub fn load(&mut self) -> AppResult<Theme> {
        let theme = match self.store.get(THEME_STORAGE_KEY)? {
            Some(value) => Theme::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "unknown stored theme, using default");
                Theme::default()
            }),
            None => Theme::default(),
        };
        self.apply(theme);
        Ok(theme)
    }

    /// Current document theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Current icon class.
    pub fn icon(&self) -> &'static str {
        self.icon
    }

    /// Switches to the opposite theme, persists it and confirms with a toast.
    ///
    /// The preference is written before the document changes, so a failed
    /// write leaves everything as it was.
    pub fn toggle(&mut self, toaster: &Toaster) -> AppResult<Theme> {
        let next = self.theme.toggled();
        self.store.set(THEME_STORAGE_KEY, next.as_str())?;
        self.apply(next);

        toaster.success(format!("Switched to {} Mode", next.label()));
        tracing::info!(theme = %next, "theme switched");
        Ok(next)
    }

    fn apply(&mut self, theme: Theme) {
        self.theme = theme;
        self.icon = theme.icon_class();
    }
}

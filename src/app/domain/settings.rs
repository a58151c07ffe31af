use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::Result;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "CGIT_FILTER_CONFIG";

/// Syntax highlighting themes bundled with syntect
/// Each theme has a config name and the internal syntect theme key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyntaxTheme {
    Base16OceanDark,
    Base16OceanLight,
    Base16EightiesDark,
    Base16MochaDark,
    SolarizedDark,
    SolarizedLight,
    InspiredGitHub,
}

impl SyntaxTheme {
    /// Get the syntect theme key for this theme
    pub fn theme_key(&self) -> &'static str {
        match self {
            Self::Base16OceanDark => "base16-ocean.dark",
            Self::Base16OceanLight => "base16-ocean.light",
            Self::Base16EightiesDark => "base16-eighties.dark",
            Self::Base16MochaDark => "base16-mocha.dark",
            Self::SolarizedDark => "Solarized (dark)",
            Self::SolarizedLight => "Solarized (light)",
            Self::InspiredGitHub => "InspiredGitHub",
        }
    }

    /// Get all available themes
    pub fn all() -> &'static [SyntaxTheme] {
        &[
            Self::Base16OceanDark,
            Self::Base16OceanLight,
            Self::Base16EightiesDark,
            Self::Base16MochaDark,
            Self::SolarizedDark,
            Self::SolarizedLight,
            Self::InspiredGitHub,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// When false every file is emitted as escaped plain text
    #[serde(default = "default_highlighting")]
    pub highlighting_enabled: bool,

    /// Syntax theme behind the light stylesheet
    #[serde(default = "default_syntax_theme_light")]
    pub syntax_theme_light: SyntaxTheme,

    /// Syntax theme behind the dark stylesheet
    #[serde(default = "default_syntax_theme_dark")]
    pub syntax_theme_dark: SyntaxTheme,

    /// Prefix for token span classes and their CSS selectors
    #[serde(default = "default_class_prefix")]
    pub class_prefix: String,

    #[serde(default = "default_avatar_base_url")]
    pub avatar_base_url: String,

    /// Avatar edge length in pixels
    #[serde(default = "default_avatar_size")]
    pub avatar_size: u32,
}

fn default_highlighting() -> bool {
    true
}

fn default_syntax_theme_light() -> SyntaxTheme {
    SyntaxTheme::InspiredGitHub
}

fn default_syntax_theme_dark() -> SyntaxTheme {
    SyntaxTheme::Base16OceanDark
}

fn default_class_prefix() -> String {
    "hl-".to_string()
}

fn default_avatar_base_url() -> String {
    "//www.gravatar.com/avatar/".to_string()
}

fn default_avatar_size() -> u32 {
    13
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            highlighting_enabled: default_highlighting(),
            syntax_theme_light: default_syntax_theme_light(),
            syntax_theme_dark: default_syntax_theme_dark(),
            class_prefix: default_class_prefix(),
            avatar_base_url: default_avatar_base_url(),
            avatar_size: default_avatar_size(),
        }
    }
}

impl FilterSettings {
    /// Load settings from disk, or use defaults if missing or unreadable.
    ///
    /// Filters run once per page view, so a broken config must never take
    /// the page down; problems are logged and defaults used instead.
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        match Self::load_from(&config_path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), "Failed to load settings: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Read settings from `path`. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let settings = toml::from_str(&contents)?;
        Ok(Some(settings))
    }

    /// Get config file path: `$CGIT_FILTER_CONFIG`, else the user config dir
    pub fn get_config_path() -> PathBuf {
        if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("cgit-filters");
        path.push("settings.toml");
        path
    }
}

//! The main config loading module for nicels.
//!
//! Handles loading and deserializing settings from `nicels.toml`.
//!
//! Provides the [Config] struct, as well as the internal [RawConfig] used for parsing.
//!
//! Also implements default config generation for `nls --init`.

use crate::config::{General, Theme};
use crate::error::ConfigError;
use crate::utils::get_home;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "NICELS_CONFIG";

/// Raw configuration as read from the toml file
/// This struct is deserialized directly from the toml file.
/// It is then converted into the main [Config] struct.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RawConfig {
    general: General,
    theme: Theme,
}

/// Main configuration struct for nicels
#[derive(Debug, Default, Clone)]
pub struct Config {
    general: General,
    theme: Theme,
    /// The `[theme]` table exactly as written, before any scheme is applied.
    user_theme: Theme,
}

/// Conversion from RawConfig to Config
/// Applies the theme scheme and user overrides.
impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general,
            theme: raw.theme.clone().with_overrides(),
            user_theme: raw.theme,
        }
    }
}

/// Public methods for loading and accessing the configuration
impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file silently yields the defaults. A file that cannot be read or
    /// parsed is reported with a warning and also yields the defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load from an explicit path, with the same fallbacks as [Config::load].
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Read and parse `path`, surfacing every failure.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(raw.into())
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn user_theme(&self) -> &Theme {
        &self.user_theme
    }

    /// Determine the default configuration file path.
    /// Checks the NICELS_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/nicels/nicels.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("nicels/nicels.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/nicels/nicels.toml");
        }
        PathBuf::from("nicels.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        Ok(())
    }
}

/// Read a standalone theme file (`--theme PATH`): the same keys as `[theme]`.
///
/// The result is unresolved; call [Theme::with_overrides] or [Theme::with_scheme] on it.
pub fn load_theme_file(path: &Path) -> Result<Theme, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let theme: Theme = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(theme)
}

const DEFAULT_TOML: &str = r##"# nicels.toml - default configuration for nicels

# Note:
# Commented values are the internal defaults of nicels.
# Command line flags always win over these values.
# Use hex codes (eg. "#RRGGBB"), 256-color indexes ("208") or terminal colors ("cyan").

[general]
# format = "vertical"        # long, single-column, vertical, across, comma, tree
# sort = "name"              # name, time, size, extension, none
# dirs_first = false
# dots_first = false
icons = true
# color = true               # unset: color when writing to a terminal
# git_status = false
# hyperlink = false
# quoting_style = "literal"
# indicator_style = "slash"
# time_style = "locale"      # locale, long-iso, full-iso, iso, +FORMAT
# tab_size = 8

[theme]
name = "dark"                # dark, light

# [theme.entry]
# directory = "blue"
# hidden_dir = "blue"
# symlink = "cyan"
# dead_link = "red"
# executable = "green"
# recognized_file = "white"
# unrecognized_file = "white"
# hidden = "white"
# socket = "green"
# block_device = "green"
# char_device = "green"
# fifo = "yellow"

# [theme.git]
# addition = "green"
# modification = "yellow"
# deletion = "red"
# untracked = "magenta"
# conflict = "red"

# [theme.perms]
# read = "green"
# write = "red"
# exec = "yellow"
# dir = "blue"
# link = "cyan"
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutMode;
    use tempfile::TempDir;

    #[test]
    fn generated_default_parses() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("nested/nicels.toml");
        Config::generate_default(&path)?;

        let config = Config::try_load(&path)?;
        assert_eq!(config.theme().name(), Some("dark"));

        let again = Config::generate_default(&path);
        assert!(matches!(again, Err(ConfigError::AlreadyExists(_))));
        Ok(())
    }

    #[test]
    fn invalid_file_falls_back() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("nicels.toml");
        fs::write(&path, "[general\nformat = ")?;

        assert!(matches!(Config::try_load(&path), Err(ConfigError::Parse { .. })));
        let config = Config::load_from(&path);
        assert_eq!(config.general(), &General::default());
        Ok(())
    }

    #[test]
    fn sections_are_read() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("nicels.toml");
        fs::write(
            &path,
            "[general]\nformat = \"tree\"\n[theme]\nname = \"light\"\n",
        )?;
        let config = Config::try_load(&path)?;
        let mut opts = crate::config::RenderOptions::default();
        config.general().apply(&mut opts);
        assert_eq!(opts.layout, LayoutMode::Tree);
        assert_eq!(config.theme().name(), Some("light"));
        Ok(())
    }

    #[test]
    fn theme_file_keeps_user_fields() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("mono.toml");
        fs::write(&path, "name = \"light\"\n")?;
        let theme = load_theme_file(&path)?;
        assert_eq!(theme.name(), Some("light"));
        assert_eq!(theme.with_scheme("dark").name(), Some("dark"));
        Ok(())
    }

    #[test]
    fn missing_file_is_silent_default() {
        let config = Config::load_from(Path::new("/definitely/not/here/nicels.toml"));
        assert_eq!(config.general(), &General::default());
    }
}

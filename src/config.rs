//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/outliner/outliner.toml`
//! 3. Local config: `<dir>/.outliner.toml` (`-C <dir>`, default cwd)
//! 4. Environment variables: `OUTLINER_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::classifier::{CJK_ENUMERATION, CJK_PARENTHESIZED, DIGIT_PERIOD};
use crate::domain::{
    DomainResult, HeadingPattern, HeadingPatterns, KeySeparators, CONTENT_KEY_SEPARATOR,
    DEFAULT_INDENT, NUMBER_KEY_SEPARATOR,
};

/// One heading level: regex with numeral and title groups, plus the
/// punctuation that rebuilds the numbering token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HeadingPatternConfig {
    pub pattern: String,
    pub prefix: String,
    pub suffix: String,
}

impl HeadingPatternConfig {
    pub fn new(pattern: &str, prefix: &str, suffix: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub headings: Option<Vec<HeadingPatternConfig>>,
    pub number_separator: Option<String>,
    pub content_separator: Option<String>,
    pub indent: Option<String>,
}

/// Unified configuration for outliner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Heading patterns, level 1 first
    pub headings: Vec<HeadingPatternConfig>,
    /// Joins numbering tokens in full number keys (default: "/")
    pub number_separator: String,
    /// Joins titles in content keys (default: "-")
    pub content_separator: String,
    /// Indent unit for extracted sections (default: four spaces)
    pub indent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            headings: vec![
                HeadingPatternConfig::new(CJK_ENUMERATION, "", "、"),
                HeadingPatternConfig::new(CJK_PARENTHESIZED, "（", "）"),
                HeadingPatternConfig::new(DIGIT_PERIOD, "", "."),
            ],
            number_separator: NUMBER_KEY_SEPARATOR.to_string(),
            content_separator: CONTENT_KEY_SEPARATOR.to_string(),
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

/// Get the XDG config directory for outliner.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "outliner").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("outliner.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".outliner.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base).
    ///
    /// Every field, the heading list included, is replaced when the overlay
    /// specifies it. The heading list is one unit: levels are positional, so
    /// merging two lists element-wise would renumber levels.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            headings: overlay
                .headings
                .clone()
                .unwrap_or_else(|| self.headings.clone()),
            number_separator: overlay
                .number_separator
                .clone()
                .unwrap_or_else(|| self.number_separator.clone()),
            content_separator: overlay
                .content_separator
                .clone()
                .unwrap_or_else(|| self.content_separator.clone()),
            indent: overlay.indent.clone().unwrap_or_else(|| self.indent.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.outliner.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local_dir)
    }

    /// Load settings from an explicit global config file.
    ///
    /// Missing files are skipped; unreadable or malformed files are errors.
    pub fn load_from(global: Option<&Path>, local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply OUTLINER_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("OUTLINER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("number_separator") {
            settings.number_separator = val;
        }
        if let Ok(val) = config.get_string("content_separator") {
            settings.content_separator = val;
        }
        if let Ok(val) = config.get_string("indent") {
            settings.indent = val;
        }

        Ok(settings)
    }

    /// Compile the configured heading patterns, level 1 first.
    pub fn heading_patterns(&self) -> DomainResult<HeadingPatterns> {
        let patterns = self
            .headings
            .iter()
            .enumerate()
            .map(|(i, h)| HeadingPattern::new(i + 1, &h.pattern, h.prefix.as_str(), h.suffix.as_str()))
            .collect::<DomainResult<Vec<_>>>()?;
        HeadingPatterns::new(patterns)
    }

    pub fn key_separators(&self) -> DomainResult<KeySeparators> {
        KeySeparators::new(self.number_separator.as_str(), self.content_separator.as_str())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# outliner configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/outliner/outliner.toml
#   Local:  <dir>/.outliner.toml          (dir from -C, default cwd)
#   Env:    OUTLINER_NUMBER_SEPARATOR, OUTLINER_CONTENT_SEPARATOR, OUTLINER_INDENT
#
# A headings list REPLACES the inherited list as a whole.

# Separator between numbering tokens in full number keys
# number_separator = "/"

# Separator between titles in content keys
# content_separator = "-"

# Indent unit for extracted sections
# indent = "    "

# Heading levels, level 1 first. Group 1 captures the numeral,
# group 2 the title; prefix/suffix rebuild the numbering token.
#
# [[headings]]
# pattern = '^([一二三四五六七八九十]+)、\s*(\S.*)$'
# suffix = "、"
#
# [[headings]]
# pattern = '^（([一二三四五六七八九十]+)）\s*(\S.*)$'
# prefix = "（"
# suffix = "）"
#
# [[headings]]
# pattern = '^([0-9]+)\.\s*(\S.*)$'
# suffix = "."
#
# [[headings]]
# pattern = '^（([0-9]+)）\s*(\S.*)$'
# prefix = "（"
# suffix = "）"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_compiling_then_three_levels() {
        let settings = Settings::default();
        let patterns = settings.heading_patterns().expect("default patterns");
        assert_eq!(patterns.len(), 3);
        assert_eq!(settings.key_separators().unwrap(), KeySeparators::default());
    }

    #[test]
    fn given_overlay_with_separator_when_merging_then_only_that_field_changes() {
        let base = Settings::default();
        let overlay = RawSettings {
            content_separator: Some(" > ".to_string()),
            ..RawSettings::default()
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.content_separator, " > ");
        assert_eq!(result.number_separator, "/");
        assert_eq!(result.headings, base.headings);
    }

    #[test]
    fn given_overlay_with_headings_when_merging_then_replaces_whole_list() {
        let base = Settings::default();
        let overlay = RawSettings {
            headings: Some(vec![HeadingPatternConfig::new(DIGIT_PERIOD, "", ".")]),
            ..RawSettings::default()
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.headings.len(), 1);
        assert_eq!(result.heading_patterns().unwrap().len(), 1);
    }

    #[test]
    fn given_invalid_pattern_when_compiling_then_errors() {
        let settings = Settings {
            headings: vec![HeadingPatternConfig::new("^(unclosed", "", "")],
            ..Settings::default()
        };
        assert!(settings.heading_patterns().is_err());
    }

    #[test]
    fn given_empty_headings_when_compiling_then_errors() {
        let settings = Settings {
            headings: vec![],
            ..Settings::default()
        };
        assert!(settings.heading_patterns().is_err());
    }

    #[test]
    fn given_settings_when_serializing_then_round_trips_through_toml() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&text).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }

    #[test]
    fn given_template_when_parsing_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.headings.is_none());
    }
}

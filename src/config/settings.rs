//! Settings structures and their `config.toml` deserialization.

use crate::book::DEFAULT_TIMEOUT_SECS;
use crate::errors::Result;
use crate::pagination::{DEFAULT_MAX_CHARACTERS, DEFAULT_MAX_LINES, PaginationConfig};
use serde::Deserialize;
use std::time::Duration;

/// The whole `config.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// `[pagination]` section: page-size defaults.
    pub pagination: PaginationSettings,
    /// `[booklet]` section: interaction-loop defaults.
    pub booklet: BookletSettings,
}

impl AppConfig {
    /// Checks that the configured pagination defaults can actually lay out
    /// pages.
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::errors::Error::Config) when they
    /// cannot.
    pub fn validate(&self) -> Result<()> {
        self.pagination.to_pagination_config().map(|_| ())
    }
}

/// Page-size defaults applied when a command does not override them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationSettings {
    /// Per-page character budget.
    pub max_characters: usize,
    /// Per-page line budget. `0` disables the line budget entirely.
    pub max_lines: usize,
    /// Decoration placed at the top of every page.
    pub prefix: String,
    /// Decoration placed at the bottom of every page.
    pub suffix: String,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            max_characters: DEFAULT_MAX_CHARACTERS,
            max_lines: DEFAULT_MAX_LINES,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl PaginationSettings {
    /// The line budget, with `0` mapped to "unlimited".
    #[must_use]
    pub fn effective_max_lines(&self) -> Option<usize> {
        (self.max_lines > 0).then_some(self.max_lines)
    }

    /// Converts these settings into a validated [`PaginationConfig`].
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::errors::Error::Config) when the
    /// limits leave no room for content.
    pub fn to_pagination_config(&self) -> Result<PaginationConfig> {
        PaginationConfig::new(
            self.max_characters,
            self.effective_max_lines(),
            self.prefix.clone(),
            self.suffix.clone(),
        )
    }
}

/// Interaction-loop defaults for booklets launched by commands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookletSettings {
    /// Inactivity timeout in seconds. `0` means booklets never time out.
    pub timeout_secs: u64,
    /// Whether only the requesting user may drive a booklet.
    pub owner_only: bool,
}

impl Default for BookletSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            owner_only: true,
        }
    }
}

impl BookletSettings {
    /// The inactivity timeout, with `0` mapped to "never".
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [pagination]
            max_characters = 1500
            max_lines = 15
            prefix = "```"
            suffix = "```"

            [booklet]
            timeout_secs = 300
            owner_only = false
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pagination.max_characters, 1500);
        assert_eq!(config.pagination.effective_max_lines(), Some(15));
        assert_eq!(config.pagination.prefix, "```");
        assert_eq!(config.booklet.timeout(), Some(Duration::from_secs(300)));
        assert!(!config.booklet.owner_only);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.pagination.max_characters, DEFAULT_MAX_CHARACTERS);
        assert_eq!(
            config.booklet.timeout(),
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        );
        assert!(config.booklet.owner_only);
    }

    #[test]
    fn test_zero_disables_line_budget_and_timeout() {
        let toml_str = r#"
            [pagination]
            max_lines = 0

            [booklet]
            timeout_secs = 0
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pagination.effective_max_lines(), None);
        assert_eq!(config.booklet.timeout(), None);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let toml_str = r#"
            [pagination]
            max_caracters = 1500
        "#;
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_decoration() {
        let toml_str = r#"
            [pagination]
            max_characters = 6
            prefix = "```"
            suffix = "```"
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_settings_produce_equivalent_pagination_config() {
        let settings = PaginationSettings {
            max_characters: 800,
            max_lines: 12,
            prefix: ">".to_owned(),
            suffix: "<".to_owned(),
        };
        let config = settings.to_pagination_config().unwrap();
        assert_eq!(
            config,
            PaginationConfig::new(800, Some(12), ">", "<").unwrap()
        );
    }
}

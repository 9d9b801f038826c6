//! Page-size constraints for the paginator.

use crate::errors::{Error, Result};

/// Default per-page character budget, matching Discord's message limit.
pub const DEFAULT_MAX_CHARACTERS: usize = 2000;

/// Default per-page line budget.
pub const DEFAULT_MAX_LINES: usize = 20;

/// Characters reserved on top of the prefix/suffix lengths when computing the
/// effective body limit. This covers the two newlines that join the prefix and
/// suffix onto the page body.
const DECORATION_MARGIN: usize = 2;

/// Size constraints applied to every produced page.
///
/// Lengths are counted in characters, not bytes, so multi-byte text is
/// budgeted the same way the displaying chat service counts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Maximum length of a finished page, prefix and suffix included.
    pub max_characters: usize,
    /// Maximum number of physical lines per page, if any.
    pub max_lines: Option<usize>,
    /// Decoration placed at the top of every page (e.g. ` ```rust `).
    pub prefix: String,
    /// Decoration placed at the bottom of every page (e.g. ` ``` `).
    pub suffix: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_characters: DEFAULT_MAX_CHARACTERS,
            max_lines: Some(DEFAULT_MAX_LINES),
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl PaginationConfig {
    /// Builds a validated configuration.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the limits leave no room for content;
    /// see [`PaginationConfig::validate`].
    pub fn new(
        max_characters: usize,
        max_lines: Option<usize>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Result<Self> {
        let config = Self {
            max_characters,
            max_lines,
            prefix: prefix.into(),
            suffix: suffix.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Effective per-page body budget: `max_characters` minus the prefix and
    /// suffix lengths and the joining-newline margin.
    #[must_use]
    pub fn body_limit(&self) -> usize {
        self.max_characters.saturating_sub(
            self.prefix.chars().count() + self.suffix.chars().count() + DECORATION_MARGIN,
        )
    }

    /// Checks the configuration invariants.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the body limit is zero (the prefix and
    /// suffix eat the whole character budget) or when `max_lines` is zero or
    /// exceeds `max_characters`.
    pub fn validate(&self) -> Result<()> {
        if self.body_limit() == 0 {
            return Err(Error::config(format!(
                "prefix and suffix leave no room for page content \
                 (max_characters = {})",
                self.max_characters
            )));
        }
        if let Some(max_lines) = self.max_lines {
            if max_lines == 0 || max_lines > self.max_characters {
                return Err(Error::config(format!(
                    "max_lines must be between 1 and max_characters, got {max_lines}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PaginationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.body_limit(), DEFAULT_MAX_CHARACTERS - 2);
    }

    #[test]
    fn test_body_limit_accounts_for_decoration() {
        let config = PaginationConfig::new(100, None, "```rust\n", "```").unwrap();
        // 100 - 8 (prefix) - 3 (suffix) - 2 (margin)
        assert_eq!(config.body_limit(), 87);
    }

    #[test]
    fn test_body_limit_counts_characters_not_bytes() {
        let config = PaginationConfig::new(100, None, "émoji→", "").unwrap();
        // Prefix is 6 characters even though it is more than 6 bytes.
        assert_eq!(config.body_limit(), 92);
    }

    #[test]
    fn test_oversized_decoration_is_rejected() {
        let result = PaginationConfig::new(10, None, "x".repeat(6), "y".repeat(4));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_zero_max_lines_is_rejected() {
        let result = PaginationConfig::new(2000, Some(0), "", "");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_max_lines_above_max_characters_is_rejected() {
        let result = PaginationConfig::new(100, Some(101), "", "");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_max_lines_equal_to_max_characters_is_allowed() {
        let result = PaginationConfig::new(100, Some(100), "", "");
        assert!(result.is_ok());
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Formatter configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{QuotePolicy, Transformation, DEFAULT_MAX_WIDTH};

fn default_max_width() -> usize {
    DEFAULT_MAX_WIDTH
}

fn enabled() -> bool {
    true
}

/// Errors from reading a formatter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid format configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("max-width must be positive")]
    ZeroWidth,
}

/// Which transformations run, and their options.
///
/// ```toml
/// remove-header = true
/// max-width = 100
///
/// [quoting]
/// never = ["pkgdesc"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FormatConfig {
    #[serde(default)]
    pub remove_header: bool,
    #[serde(default)]
    pub remove_duplicates: bool,
    #[serde(default = "enabled")]
    pub remove_blank_lines: bool,
    /// Keep a blank line opening the document (with `remove-blank-lines`)
    #[serde(default)]
    pub keep_first_blank: bool,
    #[serde(default = "enabled")]
    pub remove_comments: bool,
    #[serde(default = "enabled")]
    pub remove_trailing_comments: bool,
    #[serde(default = "enabled")]
    pub collapse_spaces: bool,
    /// Array wrapping width (default 80)
    #[serde(default = "default_max_width")]
    pub max_width: usize,
    #[serde(default = "enabled")]
    pub format_quotes: bool,
    #[serde(default = "enabled")]
    pub reorder: bool,
    #[serde(default = "enabled")]
    pub separate_functions: bool,
    #[serde(default)]
    pub quoting: QuotePolicy,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            remove_header: false,
            remove_duplicates: false,
            remove_blank_lines: true,
            keep_first_blank: false,
            remove_comments: true,
            remove_trailing_comments: true,
            collapse_spaces: true,
            max_width: DEFAULT_MAX_WIDTH,
            format_quotes: true,
            reorder: true,
            separate_functions: true,
            quoting: QuotePolicy::default(),
        }
    }
}

impl FormatConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        if config.max_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        Ok(config)
    }

    /// The enabled transformations, in pipeline order.
    pub fn pipeline(&self) -> Vec<Transformation> {
        let steps = [
            (self.remove_header, Transformation::RemoveHeader),
            (self.remove_duplicates, Transformation::RemoveDuplicates),
            (self.remove_blank_lines, Transformation::RemoveBlankLines { keep_first: self.keep_first_blank }),
            (self.remove_comments, Transformation::RemoveComments),
            (self.remove_trailing_comments, Transformation::RemoveTrailingComments),
            (self.format_quotes, Transformation::FormatQuotes(self.quoting.clone())),
            (self.collapse_spaces, Transformation::CollapseSpaces { max_width: self.max_width }),
            (self.reorder, Transformation::Reorder),
            (self.separate_functions, Transformation::SeparateFunctions),
        ];
        steps.into_iter().filter(|(on, _)| *on).map(|(_, step)| step).collect()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

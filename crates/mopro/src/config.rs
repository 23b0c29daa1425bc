//! Configuration types for profile compilation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML application config file. Every section and field is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`SelectionConfig`] - How the profile package is chosen when the model holds several.
//! - [`ClassificationConfig`] - Budgets for the classification engine.
//!
//! # Example
//!
//! ```
//! # use mopro::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(!config.selection().non_interactive());
//! assert_eq!(config.classification().ancestor_search_timeout().as_secs(), 5);
//! ```

use std::time::Duration;

use serde::Deserialize;

/// Default wall-clock budget for the most-distant-ancestor search.
pub const DEFAULT_ANCESTOR_SEARCH_TIMEOUT_MS: u64 = 5000;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Profile selection section.
    #[serde(default)]
    selection: SelectionConfig,

    /// Classification section.
    #[serde(default)]
    classification: ClassificationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(selection: SelectionConfig, classification: ClassificationConfig) -> Self {
        Self {
            selection,
            classification,
        }
    }

    /// Returns the selection configuration.
    pub fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    /// Returns the classification configuration.
    pub fn classification(&self) -> &ClassificationConfig {
        &self.classification
    }

    /// Returns the selection configuration for modification.
    pub fn selection_mut(&mut self) -> &mut SelectionConfig {
        &mut self.selection
    }
}

/// Profile package selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionConfig {
    /// Name of the profile package to use when several exist.
    #[serde(default)]
    profile_package: Option<String>,

    /// Never prompt; fail instead when the choice is ambiguous.
    #[serde(default)]
    non_interactive: bool,
}

impl SelectionConfig {
    pub fn new(profile_package: Option<String>, non_interactive: bool) -> Self {
        Self {
            profile_package,
            non_interactive,
        }
    }

    pub fn profile_package(&self) -> Option<&str> {
        self.profile_package.as_deref()
    }

    pub fn non_interactive(&self) -> bool {
        self.non_interactive
    }

    pub fn set_profile_package(&mut self, name: impl Into<String>) {
        self.profile_package = Some(name.into());
    }

    pub fn set_non_interactive(&mut self, non_interactive: bool) {
        self.non_interactive = non_interactive;
    }
}

/// Classification engine budgets.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationConfig {
    /// Wall-clock budget in milliseconds for one ancestor search.
    #[serde(default = "default_ancestor_search_timeout_ms")]
    ancestor_search_timeout_ms: u64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            ancestor_search_timeout_ms: DEFAULT_ANCESTOR_SEARCH_TIMEOUT_MS,
        }
    }
}

impl ClassificationConfig {
    pub fn new(ancestor_search_timeout: Duration) -> Self {
        Self {
            ancestor_search_timeout_ms: ancestor_search_timeout.as_millis() as u64,
        }
    }

    /// Returns the ancestor search budget.
    pub fn ancestor_search_timeout(&self) -> Duration {
        Duration::from_millis(self.ancestor_search_timeout_ms)
    }
}

fn default_ancestor_search_timeout_ms() -> u64 {
    DEFAULT_ANCESTOR_SEARCH_TIMEOUT_MS
}

//! Category filter: which action tags are currently enabled.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::action::Action;

/// Categories enabled in a fresh game.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["drinks", "personal", "physical", "group", "intimate"];

/// Mapping of category name to enabled flag.
///
/// A name missing from the map counts as disabled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryFilter {
    enabled: OrdMap<String, bool>,
}

impl CategoryFilter {
    /// Empty filter: only untagged actions are admitted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The default category map, every entry enabled.
    #[must_use]
    pub fn defaults() -> Self {
        DEFAULT_CATEGORIES.iter().fold(Self::new(), |f, name| f.with(*name, true))
    }

    /// A filter that enables exactly one category.
    ///
    /// ```
    /// use party_board::actions::CategoryFilter;
    ///
    /// let filter = CategoryFilter::only("wild");
    /// assert!(filter.is_enabled("wild"));
    /// assert!(!filter.is_enabled("drinks"));
    /// ```
    #[must_use]
    pub fn only(name: impl Into<String>) -> Self {
        Self::new().with(name, true)
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.set(name, enabled);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.enabled.insert(name.into(), enabled);
    }

    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.get(name).copied().unwrap_or(false)
    }

    /// Names present in the map, enabled or not, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.enabled.keys().map(String::as_str)
    }

    pub fn enabled_names(&self) -> impl Iterator<Item = &str> {
        self.enabled
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    /// Whether an action may be drawn under this filter.
    ///
    /// Untagged actions always pass; tagged ones need at least one
    /// enabled tag.
    #[must_use]
    pub fn admits(&self, action: &Action) -> bool {
        action.is_untagged() || action.categories.iter().any(|c| self.is_enabled(c))
    }
}

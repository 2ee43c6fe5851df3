//! Aggregated outcome of one validation call.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Rendered messages for one field, keyed by rule message key.
pub type FieldMessages = IndexMap<String, String>;

/// Overall validation outcome.
///
/// Fields with no failing rule are absent from `messages`; `success` is true
/// exactly when `messages` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub success: bool,
    pub messages: IndexMap<String, FieldMessages>,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            success: true,
            messages: IndexMap::new(),
        }
    }

    /// Record a failing rule. A second failure with the same key on the same field
    /// replaces the first message.
    pub(crate) fn fail(&mut self, field: &str, key: String, message: String) {
        self.success = false;
        self.messages
            .entry(field.to_string())
            .or_default()
            .insert(key, message);
    }

    /// Messages for one field, if it failed anything.
    pub fn field(&self, field: &str) -> Option<&FieldMessages> {
        self.messages.get(field)
    }

    pub fn has_errors(&self, field: &str) -> bool {
        self.messages.contains_key(field)
    }

    /// Rendered message for `field` and rule message `key`.
    pub fn message(&self, field: &str, key: &str) -> Option<&str> {
        self.messages
            .get(field)
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// Total number of failing (field, rule) pairs.
    pub fn failure_count(&self) -> usize {
        self.messages.values().map(IndexMap::len).sum()
    }
}

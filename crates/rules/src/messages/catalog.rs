//! Message templates keyed by the legacy rule message key.
//!
//! Templates use `$1`, `$2`, ... for positional substitutions. A placeholder without
//! a matching substitution is left as written; a key with no template renders as the
//! key itself with substitutions applied.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("required", "$1 is required."),
    ("integer", "$1 must be an integer."),
    ("dateBefore:$1:$2:$3:$4", "$1 must less than $2."),
    ("dateAfter:$1:$2:$3:$4", "$1 must greater than $2."),
];

/// Message key to template mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl MessageCatalog {
    /// A catalog with no templates at all.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Override (or add) a single template.
    pub fn with_template(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(key.into(), template.into());
        self
    }

    /// Layer `other` on top of this catalog.
    pub fn merge(mut self, other: MessageCatalog) -> Self {
        self.templates.extend(other.templates);
        self
    }

    /// Default templates overridden by a YAML map of `key: template`.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let overrides: MessageCatalog = serde_yaml::from_str(yaml)?;
        Ok(Self::default().merge(overrides))
    }

    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Render the template for `key`.
    pub fn render(&self, key: &str, substitutions: &[String]) -> String {
        substitute(self.template(key).unwrap_or(key), substitutions)
    }
}

/// Replace `$n` (1-based) with `substitutions[n - 1]`.
pub fn substitute(template: &str, substitutions: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }

        let mut end = start + 1;
        while let Some(&(i, c)) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            end = i + 1;
            chars.next();
        }

        let replacement = template[start + 1..end]
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| substitutions.get(i));
        match replacement {
            Some(s) => out.push_str(s),
            None => out.push_str(&template[start..end]),
        }
    }
    out
}

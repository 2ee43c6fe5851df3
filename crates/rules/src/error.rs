//! Configuration-tier errors raised while parsing rule definitions.
//!
//! Data failures (a value that breaks a rule) never show up here; they are
//! folded into [`crate::ValidationResult`].

/// Errors that can occur while parsing and compiling rule strings.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Rule string was empty or whitespace.
    #[error("empty rule string")]
    EmptyRule,

    /// Rule name is not one the engine knows.
    #[error(
        "unknown rule '{rule}'{}",
        .suggestion.as_deref().map(|s| format!(", did you mean '{s}'?")).unwrap_or_default()
    )]
    UnknownRule {
        rule: String,
        suggestion: Option<String>,
    },

    /// Wrong number of colon-delimited parameters.
    #[error("rule '{rule}' expects {expected} parameter(s), got {got}")]
    Arity {
        rule: String,
        expected: usize,
        got: usize,
    },

    /// Date format pattern is unusable.
    #[error("invalid date format '{format}': {reason}")]
    InvalidFormat { format: String, reason: String },

    /// Literal anchor does not parse against its own declared format.
    #[error("anchor '{anchor}' does not match date format '{format}'")]
    InvalidAnchor { anchor: String, format: String },

    /// Offset amount is not a signed base-10 integer.
    #[error("invalid offset amount '{value}', expected a signed integer")]
    InvalidOffset { value: String },

    /// Offset unit is not days, months or years.
    #[error("invalid offset unit '{unit}', expected days, months or years")]
    InvalidUnit { unit: String },

    /// Any of the above, attributed to the field whose rule list contained it.
    #[error("field '{field}': {source}")]
    Field {
        field: String,
        source: Box<RuleError>,
    },

    /// YAML rule table failed to deserialize.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON rule table failed to deserialize.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RuleError {
    /// Attach the owning field name.
    pub(crate) fn in_field(self, field: &str) -> Self {
        RuleError::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;

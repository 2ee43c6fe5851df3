//! Rule names known to the engine.

use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;

use super::fuzzy::fuzzy_match;

/// Supported rule names and their fixed parameter counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    Integer,
    DateBefore,
    DateAfter,
}

impl RuleKind {
    pub const ALL: [RuleKind; 4] = [
        RuleKind::Required,
        RuleKind::Integer,
        RuleKind::DateBefore,
        RuleKind::DateAfter,
    ];

    /// Name as written in rule strings.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Integer => "integer",
            RuleKind::DateBefore => "dateBefore",
            RuleKind::DateAfter => "dateAfter",
        }
    }

    /// Number of colon-delimited parameters after the name.
    pub fn arity(&self) -> usize {
        match self {
            RuleKind::Required | RuleKind::Integer => 0,
            RuleKind::DateBefore | RuleKind::DateAfter => 4,
        }
    }

    /// Legacy message-catalog key: the rule name followed by one positional
    /// placeholder per parameter (`dateBefore:$1:$2:$3:$4`).
    pub fn message_key(&self) -> String {
        let mut key = self.name().to_string();
        for i in 1..=self.arity() {
            key.push_str(&format!(":${i}"));
        }
        key
    }

    /// Whether a nil value passes without evaluation.
    pub fn skips_nil(&self) -> bool {
        !matches!(self, RuleKind::Required)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = RuleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = RuleKind::ALL.iter().map(|k| k.name()).collect();
                RuleError::UnknownRule {
                    rule: s.to_string(),
                    suggestion: fuzzy_match(s, &names).map(str::to_string),
                }
            })
    }
}

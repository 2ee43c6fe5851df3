//! Parsed, typed rule specifications.

use std::fmt;
use std::str::FromStr;

use fieldcheck_core::config::DEFAULT_REFERENCE_YEAR;

use crate::dates::{Anchor, DateFormat, Offset, OffsetUnit};
use crate::error::{Result, RuleError};

use super::RuleKind;

/// Separator between a rule name and its parameters.
pub const RULE_DELIMITER: char = ':';

/// One rule applied to one field, validated once at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSpec {
    Required,
    Integer,
    DateBefore(DateComparison),
    DateAfter(DateComparison),
}

/// Parameters shared by `dateBefore` and `dateAfter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateComparison {
    pub format: DateFormat,
    pub anchor: Anchor,
    pub offset: Offset,
}

impl DateComparison {
    /// Parse `(format, anchor, offsetAmount, offsetUnit)`.
    pub fn from_params(params: &[&str]) -> Result<Self> {
        let [format, anchor, amount, unit] = params else {
            return Err(RuleError::Arity {
                rule: "date comparison".to_string(),
                expected: 4,
                got: params.len(),
            });
        };

        let format = DateFormat::compile(format).map_err(|reason| RuleError::InvalidFormat {
            format: format.to_string(),
            reason,
        })?;

        let anchor = Anchor::parse(anchor, &format).map_err(|_| RuleError::InvalidAnchor {
            anchor: anchor.to_string(),
            format: format.to_string(),
        })?;

        let amount: i32 = amount.parse().map_err(|_| RuleError::InvalidOffset {
            value: amount.to_string(),
        })?;
        let unit: OffsetUnit = unit.parse().map_err(|_| RuleError::InvalidUnit {
            unit: unit.to_string(),
        })?;

        let comparison = Self {
            format,
            anchor,
            offset: Offset::new(amount, unit),
        };
        comparison.check_anchor(DEFAULT_REFERENCE_YEAR)?;
        Ok(comparison)
    }

    /// Check that a literal anchor is a calendar date once `reference_year` fills
    /// in a missing year. `31-02` never is; `29-02` only in leap years.
    pub fn check_anchor(&self, reference_year: i32) -> Result<()> {
        match &self.anchor {
            Anchor::Literal { raw, parts } if parts.to_date(reference_year).is_err() => {
                Err(RuleError::InvalidAnchor {
                    anchor: raw.clone(),
                    format: self.format.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Human-readable comparison target used in failure messages:
    /// `now`, `now minus 365 days`, `12-09 plus 3 months`, `04-06-2015`, ...
    pub fn describe_target(&self) -> String {
        let anchor = self.anchor.to_string();
        if self.offset.is_zero() {
            return anchor;
        }
        let Offset { amount, unit } = self.offset;
        if amount < 0 {
            format!("{anchor} minus {} {unit}", amount.unsigned_abs())
        } else {
            format!("{anchor} plus {amount} {unit}")
        }
    }
}

impl fmt::Display for DateComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}{d}{}",
            self.format,
            self.anchor,
            self.offset.amount,
            self.offset.unit,
            d = RULE_DELIMITER
        )
    }
}

impl RuleSpec {
    /// Parse one colon-delimited rule string, e.g. `dateBefore:DD/MM/YYYY:now:-365:days`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(RuleError::EmptyRule);
        }

        let mut parts = raw.split(RULE_DELIMITER);
        let name = parts.next().unwrap_or_default();
        let params: Vec<&str> = parts.collect();

        let kind: RuleKind = name.parse()?;
        if params.len() != kind.arity() {
            return Err(RuleError::Arity {
                rule: kind.name().to_string(),
                expected: kind.arity(),
                got: params.len(),
            });
        }

        Ok(match kind {
            RuleKind::Required => RuleSpec::Required,
            RuleKind::Integer => RuleSpec::Integer,
            RuleKind::DateBefore => RuleSpec::DateBefore(DateComparison::from_params(&params)?),
            RuleKind::DateAfter => RuleSpec::DateAfter(DateComparison::from_params(&params)?),
        })
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            RuleSpec::Required => RuleKind::Required,
            RuleSpec::Integer => RuleKind::Integer,
            RuleSpec::DateBefore(_) => RuleKind::DateBefore,
            RuleSpec::DateAfter(_) => RuleKind::DateAfter,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn message_key(&self) -> String {
        self.kind().message_key()
    }

    /// Re-check literal anchors against a validator's reference year.
    pub fn check_reference_year(&self, reference_year: i32) -> Result<()> {
        match self {
            RuleSpec::DateBefore(cmp) | RuleSpec::DateAfter(cmp) => cmp.check_anchor(reference_year),
            RuleSpec::Required | RuleSpec::Integer => Ok(()),
        }
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSpec::Required | RuleSpec::Integer => f.write_str(self.name()),
            RuleSpec::DateBefore(cmp) | RuleSpec::DateAfter(cmp) => {
                write!(f, "{}{}{}", self.name(), RULE_DELIMITER, cmp)
            }
        }
    }
}

impl FromStr for RuleSpec {
    type Err = RuleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RuleSpec::parse(s)
    }
}

//! Comparison anchors and signed calendar offsets.
//!
//! Month and year offsets use chrono's `Months` arithmetic: when the resulting
//! month is shorter than the starting day-of-month, the day clamps to the last day
//! of that month (Jan 31 + 1 month = Feb 28/29, Feb 29 + 1 year = Feb 28). A year
//! is exactly 12 months. Day offsets are plain calendar days.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};

use super::{Clock, DateFormat, DateParseError, NormalizedDate, PartialDate};

/// Literal token that anchors a comparison at the current date.
pub const NOW: &str = "now";

/// Reference point of a date comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// The current date, sampled from the clock at evaluation time.
    Now,
    /// A date written in the rule's own format.
    Literal { raw: String, parts: PartialDate },
}

impl Anchor {
    /// Read an anchor token against `format`.
    pub fn parse(token: &str, format: &DateFormat) -> Result<Self, DateParseError> {
        if token == NOW {
            return Ok(Anchor::Now);
        }
        let parts = format.parse_components(token)?;
        Ok(Anchor::Literal {
            raw: token.to_string(),
            parts,
        })
    }

    pub fn is_now(&self) -> bool {
        matches!(self, Anchor::Now)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Now => f.write_str(NOW),
            Anchor::Literal { raw, .. } => f.write_str(raw),
        }
    }
}

/// Calendar unit of an [`Offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetUnit {
    Days,
    Months,
    Years,
}

impl fmt::Display for OffsetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetUnit::Days => write!(f, "days"),
            OffsetUnit::Months => write!(f, "months"),
            OffsetUnit::Years => write!(f, "years"),
        }
    }
}

impl FromStr for OffsetUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "days" | "day" => Ok(OffsetUnit::Days),
            "months" | "month" => Ok(OffsetUnit::Months),
            "years" | "year" => Ok(OffsetUnit::Years),
            other => Err(format!("unknown offset unit: '{}'", other)),
        }
    }
}

/// Signed shift applied to an anchor. Zero is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub amount: i32,
    pub unit: OffsetUnit,
}

impl Offset {
    pub fn new(amount: i32, unit: OffsetUnit) -> Self {
        Self { amount, unit }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Shift `date`, or None if the result leaves chrono's date range.
    pub fn apply(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self.unit {
            OffsetUnit::Days => date.checked_add_signed(Duration::days(i64::from(self.amount))),
            OffsetUnit::Months => shift_months(date, self.amount),
            OffsetUnit::Years => shift_months(date, self.amount.checked_mul(12)?),
        }
    }
}

fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let n = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(n)
    } else {
        date.checked_sub_months(n)
    }
}

/// Resolve the instant a value is compared against.
///
/// `now` is read from `clock` on every call and projected through `format`, so a
/// year-less format compares today's day and month inside the reference year (Feb 29
/// becomes Feb 28 when the reference year is not a leap year).
/// The offset is applied afterwards and the result truncated to the format's
/// granularity. The year is not re-projected after shifting: `25-12` plus 10 days
/// lands in the year after the reference year.
pub fn resolve_comparison_instant(
    anchor: &Anchor,
    format: &DateFormat,
    offset: Offset,
    clock: &dyn Clock,
    reference_year: i32,
) -> Result<NormalizedDate, DateParseError> {
    let base = match anchor {
        Anchor::Now => format.project(clock.today(), reference_year)?,
        Anchor::Literal { parts, .. } => {
            NormalizedDate::new(parts.to_date(reference_year)?, format.granularity())
        }
    };
    let shifted = offset.apply(base.date()).ok_or(DateParseError::OutOfRange)?;
    Ok(NormalizedDate::new(shifted, format.granularity()))
}

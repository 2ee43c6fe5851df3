//! Date format patterns (`DD`, `MM`, `YYYY` plus literal separators).

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use fieldcheck_core::InputValue;

use super::DateParseError;

/// Precision a date format encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl Granularity {
    /// Drop everything finer than this granularity.
    pub fn truncate(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Month => date.with_day(1).unwrap_or(date),
            Granularity::Year => date.with_ordinal(1).unwrap_or(date),
        }
    }

    /// The coarser of two granularities.
    pub fn coarsest(self, other: Granularity) -> Granularity {
        self.max(other)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Month => write!(f, "month"),
            Granularity::Year => write!(f, "year"),
        }
    }
}

/// One element of a compiled date format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatToken {
    Day,
    Month,
    Year,
    Literal(String),
}

impl FormatToken {
    fn pattern(&self) -> &str {
        match self {
            FormatToken::Day => "DD",
            FormatToken::Month => "MM",
            FormatToken::Year => "YYYY",
            FormatToken::Literal(s) => s,
        }
    }
}

/// A compiled date format such as `DD/MM/YYYY` or `MM-YYYY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    raw: String,
    tokens: Vec<FormatToken>,
}

/// Date components read from a string. Components the format does not carry stay `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartialDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl PartialDate {
    /// Fill absent components (year from `reference_year`, month and day with 1)
    /// and build the calendar date.
    pub fn to_date(self, reference_year: i32) -> Result<NaiveDate, DateParseError> {
        let year = self.year.unwrap_or(reference_year);
        let month = self.month.unwrap_or(1);
        let day = self.day.unwrap_or(1);
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DateParseError::NotACalendarDate(format!("{year:04}-{month:02}-{day:02}")))
    }
}

impl DateFormat {
    /// Compile a format pattern.
    ///
    /// The pattern needs at least one of `DD`, `MM`, `YYYY`, each at most once, and
    /// `DD` only together with `MM`.
    pub fn compile(pattern: &str) -> Result<Self, String> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;

        while !rest.is_empty() {
            let token = if rest.starts_with("YYYY") {
                Some((FormatToken::Year, 4))
            } else if rest.starts_with("DD") {
                Some((FormatToken::Day, 2))
            } else if rest.starts_with("MM") {
                Some((FormatToken::Month, 2))
            } else {
                None
            };

            match token {
                Some((token, len)) => {
                    if !literal.is_empty() {
                        tokens.push(FormatToken::Literal(std::mem::take(&mut literal)));
                    }
                    if tokens.contains(&token) {
                        return Err(format!("token {} appears more than once", token.pattern()));
                    }
                    tokens.push(token);
                    rest = &rest[len..];
                }
                None => {
                    let mut chars = rest.chars();
                    if let Some(ch) = chars.next() {
                        literal.push(ch);
                    }
                    rest = chars.as_str();
                }
            }
        }
        if !literal.is_empty() {
            tokens.push(FormatToken::Literal(literal));
        }

        let has = |t: &FormatToken| tokens.contains(t);
        if !has(&FormatToken::Day) && !has(&FormatToken::Month) && !has(&FormatToken::Year) {
            return Err("no DD, MM or YYYY token".to_string());
        }
        if has(&FormatToken::Day) && !has(&FormatToken::Month) {
            return Err("DD requires MM".to_string());
        }

        Ok(Self {
            raw: pattern.to_string(),
            tokens,
        })
    }

    /// The pattern as written in the rule.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> &[FormatToken] {
        &self.tokens
    }

    pub fn has_year(&self) -> bool {
        self.tokens.contains(&FormatToken::Year)
    }

    /// Finest precision this format encodes.
    pub fn granularity(&self) -> Granularity {
        if self.tokens.contains(&FormatToken::Day) {
            Granularity::Day
        } else if self.tokens.contains(&FormatToken::Month) {
            Granularity::Month
        } else {
            Granularity::Year
        }
    }

    /// Strictly parse `input` into its components: exact digit counts, exact literals,
    /// no leftover characters.
    pub fn parse_components(&self, input: &str) -> Result<PartialDate, DateParseError> {
        let mut parts = PartialDate::default();
        let mut rest = input;

        for token in &self.tokens {
            let position = input.len() - rest.len();
            match token {
                FormatToken::Literal(lit) => {
                    rest = rest
                        .strip_prefix(lit.as_str())
                        .ok_or_else(|| DateParseError::Literal {
                            expected: lit.clone(),
                            position,
                        })?;
                }
                FormatToken::Day => {
                    let (value, tail) = take_digits(rest, 2, "DD", position)?;
                    parts.day = Some(value);
                    rest = tail;
                }
                FormatToken::Month => {
                    let (value, tail) = take_digits(rest, 2, "MM", position)?;
                    parts.month = Some(value);
                    rest = tail;
                }
                FormatToken::Year => {
                    let (value, tail) = take_digits(rest, 4, "YYYY", position)?;
                    // Four ASCII digits always fit in i32.
                    parts.year = Some(value as i32);
                    rest = tail;
                }
            }
        }

        if !rest.is_empty() {
            return Err(DateParseError::Trailing(rest.to_string()));
        }
        Ok(parts)
    }

    /// Parse a date string and normalize it against this format.
    pub fn parse_str(&self, input: &str, reference_year: i32) -> Result<NormalizedDate, DateParseError> {
        let date = self.parse_components(input)?.to_date(reference_year)?;
        Ok(NormalizedDate::new(date, self.granularity()))
    }

    /// Re-express an already-parsed date in this format's terms: components the format
    /// lacks are replaced exactly as if the date had been read from a string.
    ///
    /// A real Feb 29 projected into a year-less format with a common reference year
    /// clamps to Feb 28, the same month-end rule month offsets follow.
    pub fn project(&self, date: NaiveDate, reference_year: i32) -> Result<NormalizedDate, DateParseError> {
        let mut parts = PartialDate {
            year: self.has_year().then(|| date.year()),
            month: self.tokens.contains(&FormatToken::Month).then(|| date.month()),
            day: self.tokens.contains(&FormatToken::Day).then(|| date.day()),
        };
        if parts.year.is_none()
            && parts.month == Some(2)
            && parts.day == Some(29)
            && NaiveDate::from_ymd_opt(reference_year, 2, 29).is_none()
        {
            parts.day = Some(28);
        }
        Ok(NormalizedDate::new(parts.to_date(reference_year)?, self.granularity()))
    }

    /// Normalize an input value: pre-parsed dates are projected, everything else is
    /// read through its lexical form.
    pub fn parse_value(&self, value: &InputValue, reference_year: i32) -> Result<NormalizedDate, DateParseError> {
        match value {
            InputValue::Date(d) => self.project(*d, reference_year),
            InputValue::DateTime(dt) => self.project(dt.date(), reference_year),
            InputValue::Text(s) => self.parse_str(s, reference_year),
            InputValue::Integer(_) | InputValue::Float(_) => match value.to_lexical() {
                Some(s) => self.parse_str(&s, reference_year),
                None => Err(DateParseError::NotDateLike("number")),
            },
            InputValue::Boolean(_) => Err(DateParseError::NotDateLike("boolean")),
            InputValue::Null => Err(DateParseError::NotDateLike("null")),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn take_digits<'a>(
    s: &'a str,
    width: usize,
    token: &'static str,
    position: usize,
) -> Result<(u32, &'a str), DateParseError> {
    let err = || DateParseError::Digits {
        token,
        width,
        position,
    };
    let digits = s.get(..width).ok_or_else(err)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    let value = digits.parse().map_err(|_| err())?;
    Ok((value, &s[width..]))
}

/// A calendar date truncated to the granularity of the format it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedDate {
    date: NaiveDate,
    granularity: Granularity,
}

impl NormalizedDate {
    pub fn new(date: NaiveDate, granularity: Granularity) -> Self {
        Self {
            date: granularity.truncate(date),
            granularity,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Compare at the coarser of the two granularities, so neither side gains
    /// precision its format never encoded.
    pub fn compare(&self, other: &NormalizedDate) -> Ordering {
        let g = self.granularity.coarsest(other.granularity);
        g.truncate(self.date).cmp(&g.truncate(other.date))
    }
}

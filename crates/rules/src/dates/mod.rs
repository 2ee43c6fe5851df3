//! Date handling for the comparison rules.
//!
//! - [`DateFormat`]: compiled `DD` / `MM` / `YYYY` patterns and strict parsing
//! - [`NormalizedDate`]: a calendar date tagged with the granularity its format encodes
//! - [`Anchor`] / [`Offset`]: the comparison target of `dateBefore` / `dateAfter`
//! - [`Clock`]: injected source of "today" for the `now` anchor

mod anchor;
mod clock;
mod format;

pub use anchor::*;
pub use clock::*;
pub use format::*;

/// Reasons a value could not be turned into a comparable date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("expected '{expected}' at position {position}")]
    Literal { expected: String, position: usize },

    #[error("expected {width} digits for {token} at position {position}")]
    Digits {
        token: &'static str,
        width: usize,
        position: usize,
    },

    #[error("unexpected trailing input '{0}'")]
    Trailing(String),

    #[error("{0} is not a calendar date")]
    NotACalendarDate(String),

    #[error("value of type {0} cannot be read as a date")]
    NotDateLike(&'static str),

    #[error("date arithmetic left the representable range")]
    OutOfRange,
}

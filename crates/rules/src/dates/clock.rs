//! Injected "today" for `now`-anchored rules.

use std::fmt;

use chrono::{Local, NaiveDate, Utc};
use fieldcheck_core::ClockKind;

/// Source of the current calendar date.
///
/// Evaluators call [`Clock::today`] once per rule evaluation; nothing caches the
/// answer between calls.
pub trait Clock: Send + Sync + fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in the local timezone or in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemClock {
    #[default]
    Local,
    Utc,
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self {
            SystemClock::Local => Local::now().date_naive(),
            SystemClock::Utc => Utc::now().date_naive(),
        }
    }
}

impl From<ClockKind> for SystemClock {
    fn from(kind: ClockKind) -> Self {
        match kind {
            ClockKind::Local => SystemClock::Local,
            ClockKind::Utc => SystemClock::Utc,
        }
    }
}

/// A clock frozen at one date. Used to make `now` deterministic in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

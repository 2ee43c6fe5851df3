use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

/// Parse a profiled env var, falling back to `default` (with a warning) when the
/// value is present but malformed.
fn profiled_env_parse<T>(profile: &str, key: &str, default: T) -> T
where
    T: FromStr + fmt::Display + Copy,
{
    match profiled_env_opt(profile, key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, fallback = %default, "invalid config value, using default");
            default
        }),
        None => default,
    }
}

/// Year substituted when a date format has no `YYYY` token. 2000 is a leap year,
/// so `29-02` stays parseable in year-less formats.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2000;

/// Which wall clock resolves the `now` anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockKind {
    #[default]
    Local,
    Utc,
}

impl fmt::Display for ClockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockKind::Local => write!(f, "local"),
            ClockKind::Utc => write!(f, "utc"),
        }
    }
}

impl FromStr for ClockKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(ClockKind::Local),
            "utc" => Ok(ClockKind::Utc),
            other => Err(format!("unknown clock kind: '{}'", other)),
        }
    }
}

// ── Top-level config ──────────────────────────────────────────

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub reference_year: i32,
    pub clock: ClockKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: String::new(),
            reference_year: DEFAULT_REFERENCE_YEAR,
            clock: ClockKind::Local,
        }
    }
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `FIELDCHECK_PROFILE`. When set (e.g. `TEST`), every key is
    /// first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("FIELDCHECK_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let clock = match profiled_env_opt(&p, "FIELDCHECK_CLOCK") {
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!(error = %e, "invalid FIELDCHECK_CLOCK, using local clock");
                ClockKind::Local
            }),
            None => ClockKind::Local,
        };
        Self {
            reference_year: profiled_env_parse(
                &p,
                "FIELDCHECK_REFERENCE_YEAR",
                DEFAULT_REFERENCE_YEAR,
            ),
            clock,
            profile: p,
        }
    }

    /// Load `.env`, read the environment and log the result.
    pub fn load() -> Self {
        load_dotenv();
        let config = Self::from_env();
        config.log_summary();
        config
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!(
            profile = self.profile_label(),
            reference_year = self.reference_year,
            clock = %self.clock,
            "fieldcheck config loaded"
        );
    }
}

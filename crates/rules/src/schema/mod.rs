//! Rule grammar: colon-delimited rule strings parsed into typed [`RuleSpec`]s.
//!
//! ```text
//! integer
//! required
//! dateBefore:<format>:<anchor>:<offsetAmount>:<offsetUnit>
//! dateAfter:<format>:<anchor>:<offsetAmount>:<offsetUnit>
//! ```
//!
//! Malformed rule strings are configuration errors, reported as [`crate::RuleError`].

pub(crate) mod fuzzy;
mod kind;
mod spec;

pub use kind::*;
pub use spec::*;

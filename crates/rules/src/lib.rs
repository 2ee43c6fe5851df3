//! Declarative field validation with a colon-delimited rule DSL.
//!
//! This crate provides:
//! - Rule grammar: `integer`, `required`, `dateBefore:<format>:<anchor>:<amount>:<unit>`,
//!   `dateAfter:...`, parsed once into typed [`RuleSpec`]s
//! - Strict `DD` / `MM` / `YYYY` date parsing with granularity-aware comparison
//! - Relative anchors (`now` or a literal date) shifted by signed day/month/year offsets
//! - A validation orchestrator producing per-field, per-rule messages
//!
//! ```ignore
//! use fieldcheck_rules::{validate, FieldRules};
//! use fieldcheck_core::InputRecord;
//!
//! let rules = FieldRules::new().with("pastVacationDate", ["dateBefore:DD/MM/YYYY:now:0:days"]);
//! let input = InputRecord::new().with("pastVacationDate", "01/02/2015");
//! let result = validate(&rules, &input)?;
//! assert!(result.success);
//! ```

pub mod dates;
pub mod error;
pub mod evaluators;
pub mod messages;
pub mod schema;
pub mod validation;

pub use dates::{Clock, FixedClock, SystemClock};
pub use error::{Result, RuleError};
pub use evaluators::EvaluationOutcome;
pub use messages::{LabelOverrides, Labeler, MessageCatalog, TitleCaseLabeler};
pub use schema::{RuleKind, RuleSpec};
pub use validation::{validate, FieldRules, RuleSet, ValidationResult, Validator};

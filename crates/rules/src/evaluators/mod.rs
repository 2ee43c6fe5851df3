//! Rule evaluators.
//!
//! Each evaluator is a pure function of the field value and the parsed rule. The
//! result is an [`Evaluation`]: skipped (nil value on a skip-on-nil rule), passed,
//! or failed with a structured [`Failure`]. The legacy message key and positional
//! substitutions are only produced at the boundary, in [`EvaluationOutcome`].

mod dates;
mod integer;
mod required;

pub use dates::evaluate_date_comparison;
pub use integer::{evaluate_integer, is_integer_lexeme};
pub use required::evaluate_required;

use fieldcheck_core::InputValue;
use serde::Serialize;

use crate::dates::Clock;
use crate::schema::{RuleKind, RuleSpec};

/// Direction of a date comparison rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Before,
    After,
}

impl Direction {
    pub fn kind(&self) -> RuleKind {
        match self {
            Direction::Before => RuleKind::DateBefore,
            Direction::After => RuleKind::DateAfter,
        }
    }
}

/// Why a rule failed, with the data needed to render its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Required,
    NotInteger,
    Date { direction: Direction, target: String },
}

impl Failure {
    pub fn kind(&self) -> RuleKind {
        match self {
            Failure::Required => RuleKind::Required,
            Failure::NotInteger => RuleKind::Integer,
            Failure::Date { direction, .. } => direction.kind(),
        }
    }

    /// Message-catalog key, e.g. `integer` or `dateBefore:$1:$2:$3:$4`.
    pub fn message_key(&self) -> String {
        self.kind().message_key()
    }

    /// Positional template substitutions: the field label, then rule-specific values.
    pub fn substitutions(&self, label: &str) -> Vec<String> {
        match self {
            Failure::Required | Failure::NotInteger => vec![label.to_string()],
            Failure::Date { target, .. } => vec![label.to_string(), target.clone()],
        }
    }
}

/// Result of applying one rule to one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    Skipped,
    Passed,
    Failed(Failure),
}

impl Evaluation {
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Evaluation::Failed(f) => Some(f),
            _ => None,
        }
    }
}

/// Boundary form of an evaluation: pass/fail plus the legacy key and substitutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOutcome {
    pub passed: bool,
    pub message_key: String,
    pub substitutions: Vec<String>,
}

impl EvaluationOutcome {
    /// None for skipped evaluations.
    pub fn from_evaluation(spec: &RuleSpec, evaluation: &Evaluation, label: &str) -> Option<Self> {
        match evaluation {
            Evaluation::Skipped => None,
            Evaluation::Passed => Some(Self {
                passed: true,
                message_key: spec.message_key(),
                substitutions: Vec::new(),
            }),
            Evaluation::Failed(failure) => Some(Self {
                passed: false,
                message_key: failure.message_key(),
                substitutions: failure.substitutions(label),
            }),
        }
    }
}

/// Per-call inputs shared by all evaluators.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub clock: &'a dyn Clock,
    pub reference_year: i32,
}

/// Dispatch evaluation to the evaluator for `spec`.
pub fn evaluate(spec: &RuleSpec, value: &InputValue, ctx: EvalContext<'_>) -> Evaluation {
    if value.is_nil() && spec.kind().skips_nil() {
        return Evaluation::Skipped;
    }
    match spec {
        RuleSpec::Required => evaluate_required(value),
        RuleSpec::Integer => evaluate_integer(value),
        RuleSpec::DateBefore(cmp) => evaluate_date_comparison(cmp, Direction::Before, value, ctx),
        RuleSpec::DateAfter(cmp) => evaluate_date_comparison(cmp, Direction::After, value, ctx),
    }
}

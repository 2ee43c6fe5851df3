//! `integer`: value's decimal string form must be an optional `-` followed by digits.

use fieldcheck_core::InputValue;

use super::{Evaluation, Failure};

/// Optional leading `-`, then one or more ASCII digits. Nothing else.
pub fn is_integer_lexeme(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Floats are judged by their shortest decimal form, so `123.4` fails while a
/// float holding exactly `123` passes. Empty strings fail.
pub fn evaluate_integer(value: &InputValue) -> Evaluation {
    match value.to_lexical() {
        None => Evaluation::Skipped,
        Some(s) if is_integer_lexeme(&s) => Evaluation::Passed,
        Some(_) => Evaluation::Failed(Failure::NotInteger),
    }
}

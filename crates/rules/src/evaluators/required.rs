//! `required`: the value must be present and, for strings, non-blank.

use fieldcheck_core::InputValue;

use super::{Evaluation, Failure};

pub fn evaluate_required(value: &InputValue) -> Evaluation {
    let missing = match value {
        InputValue::Null => true,
        InputValue::Text(s) => s.trim().is_empty(),
        _ => false,
    };
    if missing {
        Evaluation::Failed(Failure::Required)
    } else {
        Evaluation::Passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_nil_fail() {
        assert_eq!(evaluate_required(&InputValue::Null), Evaluation::Failed(Failure::Required));
        assert_eq!(evaluate_required(&InputValue::from("  ")), Evaluation::Failed(Failure::Required));
        assert_eq!(evaluate_required(&InputValue::from("x")), Evaluation::Passed);
        assert_eq!(evaluate_required(&InputValue::Integer(0)), Evaluation::Passed);
        assert_eq!(evaluate_required(&InputValue::Boolean(false)), Evaluation::Passed);
    }
}

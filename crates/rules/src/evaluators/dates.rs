//! `dateBefore` / `dateAfter`: strict comparison against a resolved anchor.

use std::cmp::Ordering;

use fieldcheck_core::InputValue;
use tracing::trace;

use crate::dates::{resolve_comparison_instant, DateParseError};
use crate::schema::DateComparison;

use super::{Direction, EvalContext, Evaluation, Failure};

/// Compare `value` against the rule's anchor at the format's granularity.
///
/// The comparison instant is resolved on every call. A value or anchor that does
/// not resolve to a date fails the rule rather than raising an error.
pub fn evaluate_date_comparison(
    cmp: &DateComparison,
    direction: Direction,
    value: &InputValue,
    ctx: EvalContext<'_>,
) -> Evaluation {
    if value.is_nil() {
        return Evaluation::Skipped;
    }

    let passed = match compare(cmp, value, ctx) {
        Ok(Ordering::Less) => direction == Direction::Before,
        Ok(Ordering::Greater) => direction == Direction::After,
        Ok(Ordering::Equal) => false,
        Err(e) => {
            trace!(error = %e, format = %cmp.format, "date did not resolve");
            false
        }
    };

    if passed {
        Evaluation::Passed
    } else {
        Evaluation::Failed(Failure::Date {
            direction,
            target: cmp.describe_target(),
        })
    }
}

fn compare(cmp: &DateComparison, value: &InputValue, ctx: EvalContext<'_>) -> Result<Ordering, DateParseError> {
    let target = resolve_comparison_instant(
        &cmp.anchor,
        &cmp.format,
        cmp.offset,
        ctx.clock,
        ctx.reference_year,
    )?;
    let input = cmp.format.parse_value(value, ctx.reference_year)?;
    Ok(input.compare(&target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::FixedClock;
    use crate::schema::RuleSpec;
    use chrono::NaiveDate;

    fn comparison(raw: &str) -> DateComparison {
        match RuleSpec::parse(raw).unwrap() {
            RuleSpec::DateBefore(c) | RuleSpec::DateAfter(c) => c,
            other => panic!("not a date rule: {other}"),
        }
    }

    fn run(raw: &str, direction: Direction, value: impl Into<InputValue>, today: NaiveDate) -> Evaluation {
        let clock = FixedClock(today);
        let ctx = EvalContext {
            clock: &clock,
            reference_year: 2000,
        };
        evaluate_date_comparison(&comparison(raw), direction, &value.into(), ctx)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn before_now_is_strict() {
        let today = ymd(2026, 10, 15);
        let rule = "dateBefore:DD/MM/YYYY:now:0:days";
        assert_eq!(run(rule, Direction::Before, "14/10/2026", today), Evaluation::Passed);
        assert_eq!(
            run(rule, Direction::Before, "15/10/2026", today),
            Evaluation::Failed(Failure::Date {
                direction: Direction::Before,
                target: "now".into()
            })
        );
    }

    #[test]
    fn after_is_symmetric() {
        let today = ymd(2026, 10, 15);
        let rule = "dateAfter:DD/MM/YYYY:now:0:days";
        assert_eq!(run(rule, Direction::After, "16/10/2026", today), Evaluation::Passed);
        assert!(run(rule, Direction::After, "15/10/2026", today).failure().is_some());
        assert!(run(rule, Direction::After, "14/10/2026", today).failure().is_some());
    }

    #[test]
    fn unparsable_value_fails() {
        let today = ymd(2026, 10, 15);
        let rule = "dateBefore:DD/MM/YYYY:now:0:days";
        assert!(run(rule, Direction::Before, "2026-10-14", today).failure().is_some());
        assert!(run(rule, Direction::Before, "", today).failure().is_some());
        assert!(run(rule, Direction::Before, true, today).failure().is_some());
    }

    #[test]
    fn pre_parsed_dates_use_format_granularity() {
        let today = ymd(2026, 10, 15);
        let rule = "dateBefore:MM-YYYY:01-2014:0:days";
        assert_eq!(run(rule, Direction::Before, ymd(2013, 12, 31), today), Evaluation::Passed);
        assert!(run(rule, Direction::Before, ymd(2014, 1, 31), today).failure().is_some());
    }

    #[test]
    fn yearless_comparison_ignores_todays_year() {
        // Evaluated on two different days, a year-less literal rule gives the same answer.
        let rule = "dateBefore:DD-MM:12-09:10:days";
        for today in [ymd(2019, 1, 1), ymd(2026, 10, 15)] {
            assert_eq!(run(rule, Direction::Before, "21-09", today), Evaluation::Passed);
            assert!(run(rule, Direction::Before, "22-09", today).failure().is_some());
        }
    }
}

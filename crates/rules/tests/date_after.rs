//! `dateAfter` mirrors `dateBefore` with the comparison flipped.

use chrono::{Duration, NaiveDate};
use fieldcheck_core::{InputRecord, InputValue};
use fieldcheck_rules::{FieldRules, FixedClock, ValidationResult, Validator};

const FIELD: &str = "contractEnd";
const KEY: &str = "dateAfter:$1:$2:$3:$4";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
}

fn run(rule: &str, value: impl Into<InputValue>) -> ValidationResult {
    let rules = FieldRules::new().with(FIELD, [rule]);
    Validator::new()
        .with_clock(FixedClock(today()))
        .validate(&rules, &InputRecord::new().with(FIELD, value))
        .unwrap()
}

#[test]
fn now_rejects_today_and_accepts_tomorrow() {
    let rule = "dateAfter:DD/MM/YYYY:now:0:days";
    let tomorrow = (today() + Duration::days(1)).format("%d/%m/%Y").to_string();
    assert!(run(rule, tomorrow).success);

    let result = run(rule, "31/01/2024");
    assert!(!result.success);
    assert_eq!(
        result.message(FIELD, KEY),
        Some("Contract End must greater than now.")
    );
}

#[test]
fn month_offset_clamps_to_month_end() {
    // 31 Jan 2024 + 1 month clamps to 29 Feb 2024.
    let rule = "dateAfter:DD/MM/YYYY:now:1:months";
    assert!(run(rule, "01/03/2024").success);

    let result = run(rule, "29/02/2024");
    assert_eq!(
        result.message(FIELD, KEY),
        Some("Contract End must greater than now plus 1 months.")
    );
}

#[test]
fn year_granularity() {
    let rule = "dateAfter:YYYY:2020:-2:years";
    assert!(run(rule, "2019").success);
    assert!(run(rule, 2019).success);

    let result = run(rule, "2018");
    assert_eq!(
        result.message(FIELD, KEY),
        Some("Contract End must greater than 2020 minus 2 years.")
    );
}

#[test]
fn nil_is_skipped() {
    assert!(run("dateAfter:DD/MM/YYYY:now:0:days", InputValue::Null).success);
}

//! Validation orchestrator: fields × rules → [`ValidationResult`].
//!
//! Every rule of every field is evaluated in declared order; an early failure does
//! not stop later rules on the same field. Skipped evaluations contribute nothing.

mod result;
mod rules;

pub use result::*;
pub use rules::*;

use std::sync::Arc;

use fieldcheck_core::{Config, InputRecord, InputValue};
use fieldcheck_core::config::DEFAULT_REFERENCE_YEAR;
use tracing::{debug, trace};

use crate::dates::{Clock, SystemClock};
use crate::error::Result;
use crate::evaluators::{evaluate, EvalContext, Evaluation, EvaluationOutcome};
use crate::messages::{Labeler, MessageCatalog, TitleCaseLabeler};
use crate::schema::RuleSpec;

/// Evaluates rule tables against input records.
///
/// Holds only immutable collaborators, so one validator can serve concurrent
/// callers; every call builds its own result.
#[derive(Debug, Clone)]
pub struct Validator {
    clock: Arc<dyn Clock>,
    labeler: Arc<dyn Labeler>,
    catalog: MessageCatalog,
    reference_year: i32,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock::Local),
            labeler: Arc::new(TitleCaseLabeler),
            catalog: MessageCatalog::default(),
            reference_year: DEFAULT_REFERENCE_YEAR,
        }
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `.env` and process environment. See [`Config::load`].
    pub fn from_env() -> Self {
        Self::from_config(&Config::load())
    }

    /// Build from engine configuration (clock kind and reference year).
    pub fn from_config(config: &Config) -> Self {
        Self::default()
            .with_clock(SystemClock::from(config.clock))
            .with_reference_year(config.reference_year)
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_labeler(mut self, labeler: impl Labeler + 'static) -> Self {
        self.labeler = Arc::new(labeler);
        self
    }

    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Compile `rules` and validate `input` against them.
    ///
    /// Malformed rules are returned as `Err` before any value is looked at.
    pub fn validate(&self, rules: &FieldRules, input: &InputRecord) -> Result<ValidationResult> {
        let compiled = RuleSet::compile(rules)?;
        self.validate_compiled(&compiled, input)
    }

    /// Validate `input` against an already compiled rule set.
    ///
    /// Literal anchors are re-checked against this validator's reference year first,
    /// so a year-less anchor such as `29-02` is a rule error outside leap years.
    pub fn validate_compiled(&self, rules: &RuleSet, input: &InputRecord) -> Result<ValidationResult> {
        rules.check_reference_year(self.reference_year)?;
        let mut result = ValidationResult::new();

        for (field, specs) in rules.iter() {
            let value = input.get(field);
            for spec in specs {
                let evaluation = evaluate(spec, value, self.context());
                match evaluation {
                    Evaluation::Skipped => {
                        trace!(field, rule = %spec, "skipped nil value");
                    }
                    Evaluation::Passed => {}
                    Evaluation::Failed(failure) => {
                        let key = failure.message_key();
                        let label = self.labeler.label(field);
                        let message = self.catalog.render(&key, &failure.substitutions(&label));
                        debug!(field, rule = %spec, key = %key, "rule failed");
                        result.fail(field, key, message);
                    }
                }
            }
        }

        debug!(
            fields = rules.len(),
            failures = result.failure_count(),
            success = result.success,
            "validation finished"
        );
        Ok(result)
    }

    /// Evaluate one rule against one value. `Ok(None)` when the rule skipped the value.
    pub fn evaluate_rule(&self, spec: &RuleSpec, field: &str, value: &InputValue) -> Result<Option<EvaluationOutcome>> {
        spec.check_reference_year(self.reference_year)
            .map_err(|e| e.in_field(field))?;
        let evaluation = evaluate(spec, value, self.context());
        Ok(EvaluationOutcome::from_evaluation(spec, &evaluation, &self.labeler.label(field)))
    }

    /// Render the message an outcome would produce.
    pub fn render(&self, outcome: &EvaluationOutcome) -> String {
        self.catalog.render(&outcome.message_key, &outcome.substitutions)
    }

    fn context(&self) -> EvalContext<'_> {
        EvalContext {
            clock: self.clock.as_ref(),
            reference_year: self.reference_year,
        }
    }
}

/// Validate with default collaborators: local clock, title-case labels, built-in
/// English messages.
pub fn validate(rules: &FieldRules, input: &InputRecord) -> Result<ValidationResult> {
    Validator::default().validate(rules, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::FixedClock;
    use crate::error::RuleError;
    use crate::messages::LabelOverrides;
    use chrono::NaiveDate;

    fn validator() -> Validator {
        Validator::new().with_clock(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()))
    }

    #[test]
    fn all_rules_run_after_a_failure() {
        let rules = FieldRules::new().with(
            "when",
            ["integer", "dateBefore:DD/MM/YYYY:now:0:days", "dateAfter:DD/MM/YYYY:now:0:days"],
        );
        let input = InputRecord::new().with("when", "15/10/2026");
        let result = validator().validate(&rules, &input).unwrap();

        let messages = result.field("when").unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages["integer"], "When must be an integer.");
        assert_eq!(messages["dateBefore:$1:$2:$3:$4"], "When must less than now.");
        assert_eq!(messages["dateAfter:$1:$2:$3:$4"], "When must greater than now.");
    }

    #[test]
    fn passing_fields_are_absent() {
        let rules = FieldRules::new()
            .with("count", ["integer"])
            .with("name", ["required"]);
        let input = InputRecord::new().with("count", 4).with("name", "");
        let result = validator().validate(&rules, &input).unwrap();

        assert!(!result.success);
        assert!(!result.has_errors("count"));
        assert_eq!(result.message("name", "required"), Some("Name is required."));
    }

    #[test]
    fn absent_field_is_nil() {
        let rules = FieldRules::new().with("count", ["integer"]);
        let result = validator().validate(&rules, &InputRecord::new()).unwrap();
        assert!(result.success);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn config_errors_are_not_folded_into_results() {
        let rules = FieldRules::new().with("count", ["integr"]);
        let err = validator().validate(&rules, &InputRecord::new()).unwrap_err();
        assert!(matches!(err, RuleError::Field { .. }));
    }

    #[test]
    fn label_overrides_and_custom_catalog() {
        let v = validator()
            .with_labeler(LabelOverrides::new().with("count", "Item count"))
            .with_catalog(MessageCatalog::default().with_template("integer", "$1: whole numbers only"));
        let rules = FieldRules::new().with("count", ["integer"]);
        let result = v.validate(&rules, &InputRecord::new().with("count", "1.5")).unwrap();
        assert_eq!(result.message("count", "integer"), Some("Item count: whole numbers only"));
    }

    #[test]
    fn evaluate_rule_boundary() {
        let v = validator();
        let spec = RuleSpec::parse("dateBefore:DD/MM/YYYY:now:-365:days").unwrap();
        let outcome = v
            .evaluate_rule(&spec, "pastVacationDate", &InputValue::from("15/10/2025"))
            .unwrap()
            .unwrap();
        assert!(!outcome.passed);
        assert_eq!(v.render(&outcome), "Past Vacation Date must less than now minus 365 days.");
        assert!(v.evaluate_rule(&spec, "pastVacationDate", &InputValue::Null).unwrap().is_none());
    }

    #[test]
    fn from_config_applies_reference_year() {
        let config = Config {
            reference_year: 2001,
            ..Config::default()
        };
        let v = Validator::from_config(&config);
        let rules = FieldRules::new().with("d", ["dateBefore:DD-MM:01-03:0:days"]);
        // 29-02 does not exist in 2001.
        let result = v.validate(&rules, &InputRecord::new().with("d", "29-02")).unwrap();
        assert!(result.has_errors("d"));
        let result = v.validate(&rules, &InputRecord::new().with("d", "28-02")).unwrap();
        assert!(result.success);
    }

    #[test]
    fn leap_day_anchor_is_a_rule_error_in_common_years() {
        let rules = FieldRules::new().with("d", ["dateBefore:DD-MM:29-02:0:days"]);
        let input = InputRecord::new().with("d", "01-01");

        let err = validator().with_reference_year(2001).validate(&rules, &input).unwrap_err();
        assert!(matches!(err, RuleError::Field { ref field, .. } if field == "d"));
        assert!(err.to_string().contains("29-02"));

        let spec = RuleSpec::parse("dateBefore:DD-MM:29-02:0:days").unwrap();
        let v = validator().with_reference_year(2001);
        assert!(v.evaluate_rule(&spec, "d", input.get("d")).is_err());

        let result = validator().with_reference_year(2004).validate(&rules, &input).unwrap();
        assert!(result.success);
    }

    #[test]
    fn leap_day_today_clamps_in_common_reference_year() {
        let v = Validator::new()
            .with_clock(FixedClock(NaiveDate::from_ymd_opt(2028, 2, 29).unwrap()))
            .with_reference_year(2001);
        let rules = FieldRules::new().with("d", ["dateBefore:DD-MM:now:0:days"]);

        let result = v.validate(&rules, &InputRecord::new().with("d", "01-01")).unwrap();
        assert!(result.success);
        // Today reads as 28-02, so the same day is not strictly before it.
        let result = v.validate(&rules, &InputRecord::new().with("d", "28-02")).unwrap();
        assert!(result.has_errors("d"));
    }

    #[test]
    fn from_env_uses_environment_config() {
        let v = Validator::from_env();
        assert_eq!(v.reference_year, Config::from_env().reference_year);
    }
}

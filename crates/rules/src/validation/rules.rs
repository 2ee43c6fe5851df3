//! Caller-supplied rule tables and their compiled form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::RuleSpec;

/// Field name to ordered raw rule strings, as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRules {
    fields: IndexMap<String, Vec<String>>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; replaces any existing rules for `field`.
    pub fn with<I, S>(mut self, field: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(field.into(), rules.into_iter().map(Into::into).collect());
        self
    }

    /// Parse a YAML mapping of `field: [rule, ...]`.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON object of `"field": ["rule", ...]`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, I, S> FromIterator<(K, I)> for FieldRules
where
    K: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(FieldRules::new(), |rules, (field, list)| rules.with(field, list))
    }
}

/// Rules compiled once, ready to evaluate against any number of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    fields: Vec<(String, Vec<RuleSpec>)>,
}

impl RuleSet {
    /// Parse every rule string. The first malformed rule aborts compilation with an
    /// error naming its field.
    pub fn compile(rules: &FieldRules) -> Result<Self> {
        let fields = rules
            .iter()
            .map(|(field, raw_rules)| -> Result<(String, Vec<RuleSpec>)> {
                let specs = raw_rules
                    .iter()
                    .map(|raw| RuleSpec::parse(raw).map_err(|e| e.in_field(field)))
                    .collect::<Result<Vec<_>>>()?;
                Ok((field.to_string(), specs))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fields })
    }

    /// Fail on the first literal anchor that is not a date in `reference_year`.
    /// [`compile`](Self::compile) only checks against the default year.
    pub fn check_reference_year(&self, reference_year: i32) -> Result<()> {
        for (field, specs) in &self.fields {
            for spec in specs {
                spec.check_reference_year(reference_year)
                    .map_err(|e| e.in_field(field))?;
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleSpec])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn field(&self, name: &str) -> Option<&[RuleSpec]> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

//! Field display labels.

use std::collections::HashMap;
use std::fmt;

/// Turns a field name into the label used in messages.
pub trait Labeler: Send + Sync + fmt::Debug {
    fn label(&self, field: &str) -> String;
}

/// `pastVacationDate`, `past_vacation_date` and `past-vacation-date` all become
/// `Past Vacation Date`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleCaseLabeler;

impl Labeler for TitleCaseLabeler {
    fn label(&self, field: &str) -> String {
        title_case(field)
    }
}

/// Explicit labels for some fields, title case for the rest.
#[derive(Debug, Clone, Default)]
pub struct LabelOverrides {
    labels: HashMap<String, String>,
}

impl LabelOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(field.into(), label.into());
        self
    }
}

impl Labeler for LabelOverrides {
    fn label(&self, field: &str) -> String {
        self.labels
            .get(field)
            .cloned()
            .unwrap_or_else(|| title_case(field))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Split on `_`, `-`, whitespace and lower-to-upper case boundaries, then capitalize
/// each word.
pub fn title_case(field: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in field.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_variants() {
        assert_eq!(title_case("pastVacationDate"), "Past Vacation Date");
        assert_eq!(title_case("count"), "Count");
        assert_eq!(title_case("first_name"), "First Name");
        assert_eq!(title_case("start-date"), "Start Date");
        assert_eq!(title_case("address2Line"), "Address2 Line");
        assert_eq!(title_case("HTTPStatus"), "HTTPStatus");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn overrides_fall_back_to_title_case() {
        let labels: LabelOverrides = [("dob", "Date of birth")].into_iter().collect();
        assert_eq!(labels.label("dob"), "Date of birth");
        assert_eq!(labels.label("pastVacationDate"), "Past Vacation Date");
    }
}

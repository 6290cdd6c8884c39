//! Single-filter predicates: does one item field satisfy one filter value?

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::models::{FieldValue, FilterKind, FilterSpec, FilterValue, Scalar};

/// A filter value prepared for repeated matching
///
/// Building a predicate lowercases the filter value and compiles keyword
/// patterns once, so a whole item set can be tested without redoing that work.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Case-insensitive equality
    Exact(String),
    /// Case-insensitive substring
    Contains(String),
    /// Regular expression tested against the lowercased field
    Pattern(Regex),
    /// Membership in a set of accepted values; an empty set accepts everything
    AnyOf(Vec<String>),
    /// Matches nothing (invalid keyword pattern)
    Never,
}

impl Predicate {
    /// Build a predicate for a filter value of the given kind
    pub fn new(value: &FilterValue, kind: FilterKind, regex: bool) -> Self {
        match (kind, value) {
            (FilterKind::Toggle, FilterValue::Set(values)) => Predicate::AnyOf(values.clone()),
            (FilterKind::Toggle, FilterValue::Text(s)) if s.is_empty() => {
                Predicate::AnyOf(Vec::new())
            }
            (FilterKind::Toggle, FilterValue::Text(s)) => Predicate::AnyOf(vec![s.clone()]),
            (FilterKind::Toggle, FilterValue::Unset) => Predicate::AnyOf(Vec::new()),
            (FilterKind::Dropdown, _) => Predicate::Exact(joined(value).to_lowercase()),
            (FilterKind::Keyword, _) if regex => compile_pattern(&joined(value)),
            (FilterKind::Keyword, _) => Predicate::Contains(joined(value).to_lowercase()),
        }
    }

    pub fn for_filter(filter: &FilterSpec) -> Self {
        Self::new(&filter.value, filter.kind, filter.regex)
    }

    /// Test a field value; tag sequences match when any tag matches
    pub fn matches(&self, field: &FieldValue<'_>) -> bool {
        match field {
            FieldValue::Scalar(scalar) => self.matches_scalar(scalar),
            FieldValue::Tags(tags) => tags.iter().any(|tag| self.matches_text(tag.value)),
        }
    }

    fn matches_scalar(&self, scalar: &Scalar<'_>) -> bool {
        self.matches_text(&scalar.as_text())
    }

    fn matches_text(&self, text: &str) -> bool {
        match self {
            Predicate::Exact(expected) => text.to_lowercase() == *expected,
            Predicate::Contains(needle) => text.to_lowercase().contains(needle.as_str()),
            Predicate::Pattern(re) => re.is_match(&text.to_lowercase()),
            Predicate::AnyOf(accepted) => {
                accepted.is_empty() || accepted.iter().any(|value| value == text)
            }
            Predicate::Never => false,
        }
    }
}

/// Test one field value against one filter value
///
/// Convenience wrapper around [`Predicate`]; prefer building the predicate
/// once when testing many items.
pub fn matches(
    field: &FieldValue<'_>,
    value: &FilterValue,
    kind: FilterKind,
    regex: bool,
) -> bool {
    Predicate::new(value, kind, regex).matches(field)
}

fn joined(value: &FilterValue) -> String {
    match value {
        FilterValue::Unset => String::new(),
        FilterValue::Text(s) => s.clone(),
        FilterValue::Set(values) => values.join(","),
    }
}

fn compile_pattern(pattern: &str) -> Predicate {
    match RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(1 << 20)
        .build()
    {
        Ok(re) => Predicate::Pattern(re),
        Err(err) => {
            warn!(pattern, error = %err, "invalid keyword pattern, filter matches nothing");
            Predicate::Never
        }
    }
}

use crate::models::{FieldType, FieldValue, Item, Scalar};
use chrono::{DateTime, NaiveDate};
use std::cmp::Ordering;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

/// Field that sorts as a date unless declared otherwise
pub const PUBLISHED_FIELD: &str = "published";

/// Declared comparison types for sortable fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldTypes {
    declared: HashMap<String, FieldType>,
}

impl FieldTypes {
    pub fn new(declared: HashMap<String, FieldType>) -> Self {
        Self { declared }
    }

    /// Declared type of a field; `published` defaults to a date
    ///
    /// None means the type is taken from each value: JSON numbers compare
    /// numerically, everything else as text.
    pub fn get(&self, field: &str) -> Option<FieldType> {
        match self.declared.get(field) {
            Some(field_type) => Some(*field_type),
            None if field == PUBLISHED_FIELD => Some(FieldType::Date),
            None => None,
        }
    }
}

/// Comparison key extracted from one item
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
}

impl SortValue {
    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            // numbers before text if a field mixes both
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Extract the comparison key of `field` for an item
///
/// Tag sequences use the first tag's value. Returns None when the field is
/// absent, the sequence is empty, or a number/date does not parse. Dates are
/// epoch numbers, numeric strings, RFC 3339 timestamps or `YYYY-MM-DD`.
/// Without a declared type, native JSON numbers compare as numbers and
/// everything else as text.
pub fn sort_key(item: &Item, field: &str, field_type: Option<FieldType>) -> Option<SortValue> {
    let scalar_text;
    let scalar_number;
    let native_number;
    match item.field(field)? {
        FieldValue::Tags(tags) => {
            let first = tags.first()?.value;
            scalar_text = first.to_string();
            scalar_number = first.trim().parse::<f64>().ok();
            native_number = false;
        }
        FieldValue::Scalar(scalar) => {
            scalar_text = scalar.as_text().into_owned();
            scalar_number = scalar.as_f64();
            native_number = matches!(scalar, Scalar::Number(_));
        }
    }

    let field_type = field_type.unwrap_or(if native_number {
        FieldType::Number
    } else {
        FieldType::Text
    });

    match field_type {
        FieldType::Text => Some(SortValue::Text(normalize_for_sorting(&scalar_text))),
        FieldType::Number => scalar_number
            .filter(|n| !n.is_nan())
            .map(SortValue::Number),
        FieldType::Date => scalar_number
            .or_else(|| parse_date(&scalar_text))
            .filter(|n| !n.is_nan())
            .map(SortValue::Number),
    }
}

/// Seconds since the epoch for an ISO-8601 date or timestamp
fn parse_date(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp() as f64);
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp() as f64)
}

/// Compare two optional keys; an absent key ranks below any present one
pub fn compare_keys(a: Option<&SortValue>, b: Option<&SortValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

/// Reorder `order` (positions into `items`) by `field`
///
/// Dates sort newest first; text and numbers sort ascending. The sort is
/// stable, so ties keep their filtered order. An empty field leaves the order
/// untouched.
pub fn sort_indices(items: &[Item], order: &mut [usize], field: &str, types: &FieldTypes) {
    if field.is_empty() {
        return;
    }

    let field_type = types.get(field);
    let mut keyed: Vec<(Option<SortValue>, usize)> = order
        .iter()
        .map(|&idx| (sort_key(&items[idx], field, field_type), idx))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_keys(a.as_ref(), b.as_ref());
        match field_type {
            Some(FieldType::Date) => ordering.reverse(),
            _ => ordering,
        }
    });

    for (slot, (_, idx)) in order.iter_mut().zip(keyed) {
        *slot = idx;
    }
}

/// Normalize string for case-insensitive sorting
/// - Normalize unicode (NFD then lowercase)
/// - Collapse whitespace
pub fn normalize_for_sorting(s: &str) -> String {
    let normalized: String = s.nfd().collect::<String>().to_lowercase();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

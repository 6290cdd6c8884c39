use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A `{label, value}` pair: one tag on an item, or one selectable option in a
/// filter or sort control
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacetOption {
    pub label: String,
    pub value: String,
}

impl FacetOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A content record (e.g. a blog post) with named fields
///
/// Items are read-only from the engine's point of view. Field values are kept
/// as raw JSON and interpreted on access through [`Item::field`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Item {
    pub fn new(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { fields }
    }

    /// Get a field as a scalar or tag sequence
    /// Returns None when the field is missing or holds an empty/falsy value
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        FieldValue::from_json(self.fields.get(name)?)
    }

    /// Get a field rendered as text, joining tag labels with ", "
    pub fn get_field_as_string(&self, name: &str) -> Option<String> {
        match self.field(name)? {
            FieldValue::Scalar(scalar) => Some(scalar.as_text().into_owned()),
            FieldValue::Tags(tags) => Some(
                tags.iter()
                    .map(|tag| tag.label)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Item {
    fn from(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::new(fields)
    }
}

/// A single non-sequence field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Text(&'a str),
    Number(&'a serde_json::Number),
    Bool(bool),
}

impl<'a> Scalar<'a> {
    pub fn as_text(&self) -> Cow<'a, str> {
        match *self {
            Scalar::Text(s) => Cow::Borrowed(s),
            Scalar::Number(n) => Cow::Owned(n.to_string()),
            Scalar::Bool(b) => Cow::Borrowed(if b { "true" } else { "false" }),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Bool(_) => None,
        }
    }
}

/// One tag of a tag-sequence field, borrowed from the item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub label: &'a str,
    pub value: &'a str,
}

impl Tag<'_> {
    pub fn to_option(&self) -> FacetOption {
        FacetOption::new(self.label, self.value)
    }
}

/// Interpreted view of an item field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Scalar(Scalar<'a>),
    Tags(Vec<Tag<'a>>),
}

impl<'a> FieldValue<'a> {
    /// Interpret a raw JSON value
    ///
    /// `null`, `false`, `""` and `0` count as absent, as do objects. Arrays
    /// become tag sequences; object elements contribute `{label, value}`
    /// (label falls back to value) and string elements contribute themselves.
    pub fn from_json(value: &'a serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::String(s) if !s.is_empty() => Some(FieldValue::Scalar(Scalar::Text(s))),
            Value::Number(n) if n.as_f64() != Some(0.0) => {
                Some(FieldValue::Scalar(Scalar::Number(n)))
            }
            Value::Bool(true) => Some(FieldValue::Scalar(Scalar::Bool(true))),
            Value::Array(elements) => Some(FieldValue::Tags(
                elements.iter().filter_map(tag_from_json).collect(),
            )),
            _ => None,
        }
    }
}

fn tag_from_json(element: &serde_json::Value) -> Option<Tag<'_>> {
    match element {
        serde_json::Value::String(s) => Some(Tag { label: s, value: s }),
        serde_json::Value::Object(obj) => {
            let value = obj.get("value")?.as_str()?;
            let label = obj.get("label").and_then(|l| l.as_str()).unwrap_or(value);
            Some(Tag { label, value })
        }
        _ => None,
    }
}

/// How a filter compares its value against item fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Dropdown,
    Keyword,
    Toggle,
}

impl FilterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::Dropdown => "dropdown",
            FilterKind::Keyword => "keyword",
            FilterKind::Toggle => "toggle",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The field (or candidate fields) a filter inspects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Property {
    Single(String),
    AnyOf(Vec<String>),
}

impl Property {
    pub fn names(&self) -> &[String] {
        match self {
            Property::Single(name) => std::slice::from_ref(name),
            Property::AnyOf(names) => names,
        }
    }

    pub fn first(&self) -> Option<&str> {
        self.names().first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names().iter().all(|name| name.trim().is_empty())
    }
}

/// Current selection of a filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    #[default]
    Unset,
    Text(String),
    Set(Vec<String>),
}

impl FilterValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Unset => true,
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::Set(values) => values.is_empty(),
        }
    }
}

/// One configured filter and its live value
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub property: Property,
    pub kind: FilterKind,
    pub url_param: String,
    pub default_label: String,
    /// Keyword filters only: treat the value as a regular expression
    pub regex: bool,
    pub value: FilterValue,
}

impl FilterSpec {
    pub fn new(property: Property, kind: FilterKind) -> Self {
        let url_param = property.first().unwrap_or_default().to_string();
        Self {
            property,
            kind,
            url_param,
            default_label: "All".to_string(),
            regex: false,
            value: FilterValue::Unset,
        }
    }

    pub fn with_value(mut self, value: FilterValue) -> Self {
        self.value = value;
        self
    }

    pub fn with_regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }

    /// A filter with an empty value takes no part in matching
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Declared comparison type of a sortable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
}

/// One configured sort control and its live value
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub url_param: String,
    pub default_label: String,
    pub options: Vec<FacetOption>,
    /// Field name to sort by; empty means no explicit sort
    pub value: String,
}

impl SortSpec {
    pub fn new(options: Vec<FacetOption>) -> Self {
        Self {
            url_param: "sort".to_string(),
            default_label: "All".to_string(),
            options,
            value: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }
}

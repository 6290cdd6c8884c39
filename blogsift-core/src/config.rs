use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::models::{FacetOption, FieldType, FilterKind, FilterSpec, Property, SortSpec};
use crate::pagination::{NavOptions, PagingMode};
use crate::sorting::FieldTypes;

pub const DEFAULT_LABEL: &str = "All";
pub const DEFAULT_SORT_PARAM: &str = "sort";

/// Widget options as written by the page author
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Items per page; 0 shows every item on one page
    #[serde(default)]
    pub post_length: usize,
    #[serde(default)]
    pub paging: PagingMode,
    pub prev_arrow: Option<String>,
    pub next_arrow: Option<String>,
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
    #[serde(default)]
    pub sorts: Vec<SortConfig>,
    #[serde(default)]
    pub field_types: HashMap<String, FieldType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    #[serde(default, deserialize_with = "lenient")]
    pub property: Option<Property>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<FilterKind>,
    pub url_param: Option<String>,
    pub default_text: Option<String>,
    #[serde(default)]
    pub regex: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    pub url_param: Option<String>,
    pub default_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub options: Option<Vec<FacetOption>>,
}

/// Configuration with defaults applied and unusable entries removed
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedConfig {
    pub page_size: usize,
    pub paging: PagingMode,
    pub nav: NavOptions,
    pub filters: Vec<FilterSpec>,
    pub sorts: Vec<SortSpec>,
    pub field_types: FieldTypes,
}

impl WidgetConfig {
    /// Apply defaults and drop incomplete filters and sorts
    ///
    /// `item_count` is the page size used when `post_length` is unset. Dropped
    /// entries are logged, never reported as errors.
    pub fn normalize(&self, item_count: usize) -> NormalizedConfig {
        let filters = self
            .filters
            .iter()
            .enumerate()
            .filter_map(|(idx, filter)| {
                let spec = filter.to_spec();
                if spec.is_none() {
                    debug!(index = idx, "dropping filter without property or type");
                }
                spec
            })
            .collect();

        let sorts = self
            .sorts
            .iter()
            .enumerate()
            .filter_map(|(idx, sort)| {
                let spec = sort.to_spec();
                if spec.is_none() {
                    debug!(index = idx, "dropping sort without options");
                }
                spec
            })
            .collect();

        let page_size = if self.post_length > 0 {
            self.post_length
        } else {
            item_count.max(1)
        };

        NormalizedConfig {
            page_size,
            paging: self.paging,
            nav: NavOptions {
                prev: self.prev_arrow.is_some(),
                next: self.next_arrow.is_some(),
            },
            filters,
            sorts,
            field_types: FieldTypes::new(self.field_types.clone()),
        }
    }
}

impl FilterConfig {
    pub fn to_spec(&self) -> Option<FilterSpec> {
        let property = self.property.clone().filter(|p| !p.is_empty())?;
        let kind = self.kind?;

        let mut spec = FilterSpec::new(property, kind).with_regex(self.regex);
        if let Some(param) = non_empty(&self.url_param) {
            spec.url_param = param.to_string();
        }
        spec.default_label = non_empty(&self.default_text)
            .unwrap_or(DEFAULT_LABEL)
            .to_string();
        Some(spec)
    }
}

impl SortConfig {
    pub fn to_spec(&self) -> Option<SortSpec> {
        let options = self.options.clone().filter(|o| !o.is_empty())?;

        let mut spec = SortSpec::new(options);
        spec.url_param = non_empty(&self.url_param)
            .unwrap_or(DEFAULT_SORT_PARAM)
            .to_string();
        spec.default_label = non_empty(&self.default_text)
            .unwrap_or(DEFAULT_LABEL)
            .to_string();
        Some(spec)
    }
}

/// Read a field that may be malformed; anything unreadable becomes None so the
/// entry is dropped during normalization instead of failing the whole config
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

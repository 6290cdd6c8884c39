use crate::matching::Predicate;
use crate::models::{FilterSpec, FilterValue, Item, Property};

/// A filter prepared for matching against many items
#[derive(Debug, Clone)]
pub struct ActiveFilter<'a> {
    pub property: &'a Property,
    pub predicate: Predicate,
}

/// Prepare the active filters, skipping any whose value is empty
pub fn active_filters(filters: &[FilterSpec]) -> Vec<ActiveFilter<'_>> {
    filters
        .iter()
        .filter(|filter| filter.is_active())
        .map(|filter| ActiveFilter {
            property: &filter.property,
            predicate: Predicate::for_filter(filter),
        })
        .collect()
}

/// Apply filters to a list of items, returning only those that match
/// Input order is preserved
pub fn apply_filters<'a>(items: &'a [Item], filters: &[FilterSpec]) -> Vec<&'a Item> {
    let active = active_filters(filters);
    items
        .iter()
        .filter(|item| matches_filters(item, &active))
        .collect()
}

/// Same as [`apply_filters`] but returns positions into `items`
pub fn filter_indices(items: &[Item], filters: &[FilterSpec]) -> Vec<usize> {
    let active = active_filters(filters);
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches_filters(item, &active))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if an item matches every active filter
/// AND logic between filters, OR between the candidate properties of one filter
pub fn matches_filters(item: &Item, filters: &[ActiveFilter<'_>]) -> bool {
    filters.iter().all(|filter| matches_filter(item, filter))
}

/// Check one filter; an item lacking every candidate property does not match
pub fn matches_filter(item: &Item, filter: &ActiveFilter<'_>) -> bool {
    filter.property.names().iter().any(|name| {
        item.field(name)
            .is_some_and(|value| filter.predicate.matches(&value))
    })
}

/// Check if any filter currently has a value
pub fn has_filters(filters: &[FilterSpec]) -> bool {
    filters.iter().any(FilterSpec::is_active)
}

/// Parse a toggle selection as stored in the URL: a JSON array of strings
/// A bare non-JSON string is taken as a single selected value
pub fn parse_toggle_value(raw: &str) -> Result<FilterValue, serde_json::Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(FilterValue::Set(Vec::new()));
    }
    if !raw.starts_with('[') {
        return Ok(FilterValue::Set(vec![raw.to_string()]));
    }
    let values: Vec<String> = serde_json::from_str(raw)?;
    Ok(FilterValue::Set(values))
}

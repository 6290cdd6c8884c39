use crate::models::{FacetOption, FieldValue, Item};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Collect the distinct options found under `properties` across all items
///
/// Tags contribute themselves; scalar fields contribute `{label: v, value: v}`.
/// Options are unique by value (the first label seen wins) and sorted by
/// label, case-insensitively, in descending order.
pub fn collect_options(items: &[Item], properties: &[String]) -> Vec<FacetOption> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut options = Vec::new();

    for item in items {
        for property in properties {
            let Some(field) = item.field(property) else {
                continue;
            };

            match field {
                FieldValue::Tags(tags) => {
                    for tag in tags {
                        if seen.insert(tag.value.to_string()) {
                            options.push(tag.to_option());
                        }
                    }
                }
                FieldValue::Scalar(scalar) => {
                    let text = scalar.as_text();
                    if seen.insert(text.to_string()) {
                        options.push(FacetOption::new(text.as_ref(), text.as_ref()));
                    }
                }
            }
        }
    }

    options.sort_by(compare_labels_desc);
    options
}

/// Descending, case-insensitive label order used for facet lists
pub fn compare_labels_desc(a: &FacetOption, b: &FacetOption) -> Ordering {
    b.label.to_lowercase().cmp(&a.label.to_lowercase())
}

//! Property-based tests for the filter, sort and paging engine using proptest.

use blogsift_core::pagination::page_window;
use blogsift_core::{
    collect_options, filter_indices, plan, recompute, sort_indices, EngineState, FieldTypes,
    FilterKind, FilterSpec, FilterValue, Item, NavOptions, Property, WidgetConfig,
};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Test helpers
// ============================================================================

const CATEGORIES: &[&str] = &["news", "tech", "culture", "events"];
const TYPES: &[&str] = &["article", "video", "podcast"];

fn post(title: String, categories: Vec<usize>, kind: Option<usize>, published: u32) -> Item {
    let categories: Vec<_> = categories
        .into_iter()
        .map(|idx| json!({"label": CATEGORIES[idx].to_uppercase(), "value": CATEGORIES[idx]}))
        .collect();
    let mut value = json!({
        "title": title,
        "categories": categories,
        "published": published
    });
    if let Some(kind) = kind {
        value["type"] = json!([{"label": TYPES[kind], "value": TYPES[kind]}]);
    }
    serde_json::from_value(value).unwrap()
}

// Strategy to generate posts
fn post_strategy() -> impl Strategy<Value = Item> {
    (
        "[a-zA-Z ]{1,12}",
        prop::collection::vec(0..CATEGORIES.len(), 0..3),
        prop::option::of(0..TYPES.len()),
        1u32..10_000,
    )
        .prop_map(|(title, categories, kind, published)| post(title, categories, kind, published))
}

fn posts_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(post_strategy(), 0..40)
}

fn category_filter(value: &str) -> FilterSpec {
    FilterSpec::new(Property::Single("categories".into()), FilterKind::Dropdown)
        .with_value(FilterValue::Text(value.into()))
}

fn type_filter(values: Vec<String>) -> FilterSpec {
    FilterSpec::new(Property::Single("type".into()), FilterKind::Toggle)
        .with_value(FilterValue::Set(values))
}

fn keyword_filter(value: &str) -> FilterSpec {
    FilterSpec::new(Property::Single("title".into()), FilterKind::Keyword)
        .with_value(FilterValue::Text(value.into()))
}

fn active_filters_strategy() -> impl Strategy<Value = Vec<FilterSpec>> {
    (
        prop::sample::select(CATEGORIES),
        prop::sample::subsequence(TYPES, 1..=TYPES.len()),
        "[a-z]{1,2}",
    )
        .prop_map(|(category, types, keyword)| {
            vec![
                category_filter(category),
                type_filter(types.iter().map(|t| t.to_string()).collect()),
                keyword_filter(&keyword),
            ]
        })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// An inactive filter never excludes anything.
    #[test]
    fn inactive_filter_is_a_no_op(items in posts_strategy()) {
        let filters = vec![
            category_filter(""),
            type_filter(vec![]),
            FilterSpec::new(Property::Single("missing".into()), FilterKind::Keyword),
        ];
        let all: Vec<usize> = (0..items.len()).collect();
        prop_assert_eq!(filter_indices(&items, &filters), all);
    }

    /// Removing an active filter can only grow the result.
    #[test]
    fn removing_a_filter_never_shrinks(
        items in posts_strategy(),
        filters in active_filters_strategy(),
        removed in 0usize..3,
    ) {
        let with_all = filter_indices(&items, &filters);
        let mut fewer = filters.clone();
        fewer.remove(removed);
        let with_fewer = filter_indices(&items, &fewer);

        prop_assert!(with_all.len() <= with_fewer.len());
        prop_assert!(with_all.iter().all(|idx| with_fewer.contains(idx)));
    }

    /// The result is the conjunction of each filter applied alone, in input order.
    #[test]
    fn filtering_is_conjunction(
        items in posts_strategy(),
        filters in active_filters_strategy(),
    ) {
        let combined = filter_indices(&items, &filters);
        let expected: Vec<usize> = (0..items.len())
            .filter(|idx| {
                filters
                    .iter()
                    .all(|f| filter_indices(&items, std::slice::from_ref(f)).contains(idx))
            })
            .collect();
        prop_assert_eq!(combined, expected);
    }

    /// A toggle with exactly {A} keeps exactly the items tagged A.
    #[test]
    fn toggle_single_selection(items in posts_strategy(), kind in 0..TYPES.len()) {
        let selected = TYPES[kind];
        let result = filter_indices(&items, &[type_filter(vec![selected.to_string()])]);
        let expected: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.get_field_as_string("type").as_deref() == Some(selected))
            .map(|(idx, _)| idx)
            .collect();
        prop_assert_eq!(result, expected);
    }

    /// Sorting is a permutation, and dates come out newest first.
    #[test]
    fn published_sort_is_descending_permutation(items in posts_strategy()) {
        let mut order: Vec<usize> = (0..items.len()).collect();
        sort_indices(&items, &mut order, "published", &FieldTypes::default());

        let mut sorted = order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..items.len()).collect::<Vec<_>>());

        let dates: Vec<u64> = order
            .iter()
            .map(|&idx| items[idx].fields["published"].as_u64().unwrap())
            .collect();
        prop_assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    }

    /// Visible ranges tile the filtered set without gaps or overlap.
    #[test]
    fn pages_cover_every_item_once(total in 0usize..200, page_size in 1usize..25) {
        let pages = plan(total, page_size, 1, NavOptions::default()).total_pages;
        let mut next = 0;
        for page in 1..=pages {
            let p = plan(total, page_size, page, NavOptions::default());
            prop_assert_eq!(p.visible.start, next);
            prop_assert!(!p.visible.is_empty());
            prop_assert!(p.visible.len() <= page_size);
            next = p.visible.end;
        }
        prop_assert_eq!(next, total);
        prop_assert!(plan(total, page_size, pages + 1, NavOptions::default()).visible.is_empty());
    }

    /// The page window stays within 1..=total, holds the current page and is
    /// exactly 5 wide whenever there are at least 5 pages.
    #[test]
    fn page_window_is_bounded(
        (total, current) in (1usize..60).prop_flat_map(|total| (Just(total), 1..=total)),
    ) {
        let window = page_window(current, total);
        prop_assert!(window.len() <= 5);
        if total >= 5 {
            prop_assert_eq!(window.len(), 5);
        }
        prop_assert!(window.contains(&current));
        prop_assert!(window.iter().all(|&p| p >= 1 && p <= total));
        prop_assert!(window.windows(2).all(|w| w[1] == w[0] + 1));
    }

    /// Recomputing unchanged state gives the same view.
    #[test]
    fn recompute_is_idempotent(
        items in posts_strategy(),
        filters in active_filters_strategy(),
        page in 1usize..4,
    ) {
        let config: WidgetConfig = serde_json::from_value(json!({"postLength": 5})).unwrap();
        let mut state = EngineState::from_config(config.normalize(items.len()));
        state.filters = filters;
        state.current_page = page;
        state.sorts = vec![];

        prop_assert_eq!(recompute(&items, &state), recompute(&items, &state));
    }

    /// Facet options are unique by value and cover every tag in use.
    #[test]
    fn facet_options_are_unique(items in posts_strategy()) {
        let options = collect_options(&items, &["categories".to_string()]);
        let mut values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        let count = values.len();
        values.sort_unstable();
        values.dedup();
        prop_assert_eq!(values.len(), count);

        for item in &items {
            if let Some(tags) = item.fields["categories"].as_array() {
                for tag in tags {
                    let value = tag["value"].as_str().unwrap();
                    prop_assert!(options.iter().any(|o| o.value == value));
                }
            }
        }
    }
}

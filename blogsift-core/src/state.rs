//! Engine state and the pure transitions applied to it.
//!
//! Every user action maps to one transition on [`EngineState`]. A transition
//! only edits state and reports which URL parameter changed; recomputing the
//! view is a separate, pure step ([`recompute`]).

use tracing::{debug, trace};

use crate::config::NormalizedConfig;
use crate::filtering::filter_indices;
use crate::models::{FilterKind, FilterSpec, FilterValue, Item, SortSpec};
use crate::pagination::{plan, NavOptions, PagePlan, PagingMode};
use crate::sorting::{sort_indices, FieldTypes};

/// URL parameter carrying the current page
pub const PAGE_PARAM: &str = "page";

/// A URL parameter to write after a transition; an empty value removes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlChange {
    pub param: String,
    pub value: String,
}

impl UrlChange {
    pub fn new(param: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            value: value.into(),
        }
    }
}

/// Page navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    Number(usize),
    Prev,
    Next,
}

/// Session state of one widget
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// 1-based
    pub current_page: usize,
    pub page_size: usize,
    pub paging: PagingMode,
    pub nav: NavOptions,
    pub filters: Vec<FilterSpec>,
    pub sorts: Vec<SortSpec>,
    pub field_types: FieldTypes,
}

impl EngineState {
    pub fn from_config(config: NormalizedConfig) -> Self {
        Self {
            current_page: 1,
            page_size: config.page_size.max(1),
            paging: config.paging,
            nav: config.nav,
            filters: config.filters,
            sorts: config.sorts,
            field_types: config.field_types,
        }
    }

    pub fn filter(&self, param: &str) -> Option<&FilterSpec> {
        self.filters.iter().find(|f| f.url_param == param)
    }

    fn filter_of_kind(&mut self, param: &str, kind: FilterKind) -> Option<&mut FilterSpec> {
        let filter = self.filters.iter_mut().find(|f| f.url_param == param);
        match filter {
            Some(filter) if filter.kind == kind => Some(filter),
            Some(filter) => {
                debug!(param, expected = %kind, actual = %filter.kind, "filter kind mismatch");
                None
            }
            None => {
                debug!(param, "no such filter");
                None
            }
        }
    }

    /// The field of the first sort with a selection
    pub fn active_sort(&self) -> Option<&str> {
        self.sorts
            .iter()
            .find(|s| s.is_active())
            .map(|s| s.value.as_str())
    }

    /// Choose a dropdown option; an empty value clears the filter
    pub fn select_dropdown(&mut self, param: &str, value: &str) -> Option<UrlChange> {
        let filter = self.filter_of_kind(param, FilterKind::Dropdown)?;
        filter.value = FilterValue::Text(value.to_string());
        trace!(param, value, "dropdown selected");
        Some(UrlChange::new(param, value))
    }

    /// Add `value` to a toggle selection, or remove it if already selected
    pub fn toggle_option(&mut self, param: &str, value: &str) -> Option<UrlChange> {
        let filter = self.filter_of_kind(param, FilterKind::Toggle)?;
        let mut selected = match std::mem::take(&mut filter.value) {
            FilterValue::Set(values) => values,
            FilterValue::Text(s) if !s.is_empty() => vec![s],
            _ => Vec::new(),
        };

        if !value.is_empty() && !selected.iter().any(|v| v == value) {
            selected.push(value.to_string());
        } else {
            selected.retain(|v| v != value);
        }
        trace!(param, value, selected = ?selected, "toggle changed");

        let url_value = if selected.is_empty() {
            String::new()
        } else {
            serde_json::to_string(&selected).unwrap_or_default()
        };
        filter.value = FilterValue::Set(selected);
        Some(UrlChange::new(param, url_value))
    }

    /// Replace a keyword filter's text
    pub fn set_keyword(&mut self, param: &str, text: &str) -> Option<UrlChange> {
        let filter = self.filter_of_kind(param, FilterKind::Keyword)?;
        filter.value = FilterValue::Text(text.to_string());
        trace!(param, text, "keyword set");
        Some(UrlChange::new(param, text))
    }

    /// Choose the field to sort by; an empty field restores filtered order
    pub fn select_sort(&mut self, param: &str, field: &str) -> Option<UrlChange> {
        let Some(sort) = self.sorts.iter_mut().find(|s| s.url_param == param) else {
            debug!(param, "no such sort");
            return None;
        };
        sort.value = field.to_string();
        trace!(param, field, "sort selected");
        Some(UrlChange::new(param, field))
    }

    /// Move to another page; a disabled prev/next is a no-op
    pub fn goto_page(&mut self, target: PageTarget, total_pages: usize) -> Option<UrlChange> {
        let page = match target {
            PageTarget::Prev if self.current_page <= 1 => return None,
            PageTarget::Prev => self.current_page - 1,
            PageTarget::Next if self.current_page >= total_pages => return None,
            PageTarget::Next => self.current_page + 1,
            PageTarget::Number(0) => return None,
            PageTarget::Number(n) => n,
        };
        self.current_page = page;
        trace!(page, "page changed");
        Some(UrlChange::new(PAGE_PARAM, page.to_string()))
    }

    /// Advance one page in load-more mode
    pub fn load_more(&mut self) {
        self.current_page += 1;
    }

    /// Back to the first page after the result set changed
    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }
}

/// The derived result of one recompute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    /// Positions into the item set, filtered and ordered
    pub filtered: Vec<usize>,
    pub plan: PagePlan,
}

impl WidgetView {
    /// Positions of the items the list should show
    ///
    /// The current page in pagination mode; everything loaded so far in
    /// load-more mode.
    pub fn shown(&self, paging: PagingMode) -> &[usize] {
        let range = match paging {
            PagingMode::Pagination => self.plan.visible.clone(),
            PagingMode::LoadMore => self.plan.cumulative(),
        };
        &self.filtered[range]
    }

    /// Positions of the current page only
    pub fn page(&self) -> &[usize] {
        &self.filtered[self.plan.visible.clone()]
    }
}

/// Filter, sort and paginate `items` for the given state
pub fn recompute(items: &[Item], state: &EngineState) -> WidgetView {
    let mut filtered = filter_indices(items, &state.filters);
    if let Some(field) = state.active_sort() {
        sort_indices(items, &mut filtered, field, &state.field_types);
    }
    let plan = plan(filtered.len(), state.page_size, state.current_page, state.nav);

    debug!(
        total = items.len(),
        matched = filtered.len(),
        page = plan.current_page,
        pages = plan.total_pages,
        "recomputed view"
    );

    WidgetView { filtered, plan }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetConfig;
    use serde_json::json;

    fn state(config: serde_json::Value, item_count: usize) -> EngineState {
        let config: WidgetConfig = serde_json::from_value(config).unwrap();
        EngineState::from_config(config.normalize(item_count))
    }

    fn blog_state() -> EngineState {
        state(
            json!({
                "postLength": 2,
                "filters": [
                    {"property": "categories", "type": "dropdown", "urlParam": "category"},
                    {"property": "type", "type": "toggle"},
                    {"property": ["title", "summary"], "type": "keyword", "urlParam": "q"}
                ],
                "sorts": [
                    {"options": [{"label": "Title", "value": "title"}]}
                ]
            }),
            5,
        )
    }

    fn posts() -> Vec<Item> {
        serde_json::from_value(json!([
            {
                "title": "Delta",
                "categories": [{"label": "News", "value": "news"}],
                "type": ["video"]
            },
            {
                "title": "alpha",
                "categories": [{"label": "Tech", "value": "tech"}],
                "type": ["article"]
            },
            {
                "title": "Charlie",
                "categories": [{"label": "News", "value": "news"}],
                "type": ["article"]
            },
            {"title": "bravo", "categories": [{"label": "News", "value": "news"}]},
            {"title": "Echo", "summary": "rust news"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut s = blog_state();

        let change = s.toggle_option("type", "video").unwrap();
        assert_eq!(change, UrlChange::new("type", r#"["video"]"#));

        let change = s.toggle_option("type", "article").unwrap();
        assert_eq!(change.value, r#"["video","article"]"#);

        s.toggle_option("type", "video");
        let change = s.toggle_option("type", "article").unwrap();
        assert_eq!(change, UrlChange::new("type", ""));
        assert!(!s.filter("type").unwrap().is_active());
    }

    #[test]
    fn test_transition_on_wrong_kind_is_ignored() {
        let mut s = blog_state();
        assert_eq!(s.select_dropdown("type", "video"), None);
        assert_eq!(s.set_keyword("category", "news"), None);
        assert_eq!(s.toggle_option("nope", "x"), None);
        assert_eq!(s, blog_state());
    }

    #[test]
    fn test_page_navigation_limits() {
        let mut s = blog_state();
        assert_eq!(s.goto_page(PageTarget::Prev, 3), None);
        assert_eq!(
            s.goto_page(PageTarget::Next, 3),
            Some(UrlChange::new("page", "2"))
        );
        assert_eq!(
            s.goto_page(PageTarget::Number(3), 3),
            Some(UrlChange::new("page", "3"))
        );
        assert_eq!(s.goto_page(PageTarget::Next, 3), None);
        assert_eq!(s.goto_page(PageTarget::Number(0), 3), None);
        assert_eq!(s.current_page, 3);
    }

    #[test]
    fn test_recompute_filters_sorts_and_pages() {
        let items = posts();
        let mut s = blog_state();
        s.select_dropdown("category", "news");
        s.select_sort("sort", "title");

        let view = recompute(&items, &s);
        // news posts: Delta, Charlie, bravo -> sorted bravo, Charlie, Delta
        assert_eq!(view.filtered, vec![3, 2, 0]);
        assert_eq!(view.plan.total_pages, 2);
        assert_eq!(view.page(), &[3, 2]);

        s.goto_page(PageTarget::Next, view.plan.total_pages);
        let view = recompute(&items, &s);
        assert_eq!(view.page(), &[0]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let items = posts();
        let mut s = blog_state();
        s.set_keyword("q", "rust");
        assert_eq!(recompute(&items, &s), recompute(&items, &s));
    }

    #[test]
    fn test_shown_in_load_more_mode_is_cumulative() {
        let items = posts();
        let mut s = blog_state();
        s.paging = PagingMode::LoadMore;
        s.load_more();

        let view = recompute(&items, &s);
        assert_eq!(view.page(), &[2, 3]);
        assert_eq!(view.shown(PagingMode::LoadMore), &[0, 1, 2, 3]);
        assert_eq!(view.shown(PagingMode::Pagination), &[2, 3]);
    }
}

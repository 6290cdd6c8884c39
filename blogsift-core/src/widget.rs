//! The controller that owns a widget's state and drives its collaborators.
//!
//! [`FilterWidget`] sequences every user action the same way: apply the
//! transition, write the URL, recompute the view, render.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::WidgetConfig;
use crate::debounce::Debouncer;
use crate::facets::collect_options;
use crate::filtering::parse_toggle_value;
use crate::models::{FacetOption, FilterKind, FilterSpec, FilterValue, Item, SortSpec};
use crate::pagination::{PagePlan, PagingMode};
use crate::state::{recompute, EngineState, PageTarget, UrlChange, WidgetView, PAGE_PARAM};
use crate::url_state::UrlStateStore;

/// Whether rendered items replace the list or extend it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderUpdate {
    Replace,
    Append,
}

/// Receives the items to display after each recompute
pub trait RenderSink {
    fn render_items(&mut self, items: &[&Item], update: RenderUpdate);

    fn render_pagination(&mut self, _plan: &PagePlan, _paging: PagingMode) {}
}

/// Receives option lists for filter and sort controls, once per item set
pub trait FacetSink {
    fn render_facets(&mut self, filter: &FilterSpec, options: &[FacetOption]);

    fn render_sort_options(&mut self, _sort: &SortSpec) {}
}

/// A filterable, sortable, paginated list over a fixed item set
pub struct FilterWidget<U, R> {
    items: Vec<Item>,
    state: EngineState,
    view: WidgetView,
    facets: HashMap<String, Vec<FacetOption>>,
    /// One debouncer per keyword filter, in filter order
    keyword_input: Vec<(String, Debouncer<String>)>,
    url: U,
    sink: R,
}

impl<U, R> FilterWidget<U, R>
where
    U: UrlStateStore,
    R: RenderSink + FacetSink,
{
    /// Build the widget, seed its state from the URL and render the first view
    pub fn new(items: Vec<Item>, config: &WidgetConfig, url: U, sink: R) -> Self {
        let state = EngineState::from_config(config.normalize(items.len()));
        let view = recompute(&items, &state);

        let mut widget = Self {
            items,
            state,
            view,
            facets: HashMap::new(),
            keyword_input: Vec::new(),
            url,
            sink,
        };

        widget.seed_from_url();
        widget.build_facets();
        widget.keyword_input = widget
            .state
            .filters
            .iter()
            .filter(|f| f.kind == FilterKind::Keyword)
            .map(|f| (f.url_param.clone(), Debouncer::default()))
            .collect();
        widget.reset();
        widget
    }

    fn seed_from_url(&mut self) {
        self.state.current_page = self
            .url
            .get(PAGE_PARAM)
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|page| *page >= 1)
            .unwrap_or(1);

        for filter in &mut self.state.filters {
            let raw = self.url.get(&filter.url_param);
            if raw.is_empty() {
                continue;
            }
            filter.value = match filter.kind {
                FilterKind::Toggle => match parse_toggle_value(&raw) {
                    Ok(value) => value,
                    Err(err) => {
                        warn!(
                            param = %filter.url_param,
                            raw = %raw,
                            error = %err,
                            "ignoring malformed toggle value"
                        );
                        FilterValue::Unset
                    }
                },
                FilterKind::Dropdown | FilterKind::Keyword => FilterValue::Text(raw),
            };
        }

        for sort in &mut self.state.sorts {
            sort.value = self.url.get(&sort.url_param);
        }
    }

    fn build_facets(&mut self) {
        for filter in &self.state.filters {
            if filter.kind == FilterKind::Keyword {
                continue;
            }
            let options = collect_options(&self.items, filter.property.names());
            self.sink.render_facets(filter, &options);
            self.facets.insert(filter.url_param.clone(), options);
        }
        for sort in &self.state.sorts {
            self.sink.render_sort_options(sort);
        }
    }

    /// Recompute from scratch and re-render the whole list
    fn reset(&mut self) {
        if self.url.has(PAGE_PARAM) {
            self.url
                .set(PAGE_PARAM, &self.state.current_page.to_string());
        }
        self.refresh(RenderUpdate::Replace);
    }

    fn refresh(&mut self, update: RenderUpdate) {
        self.view = recompute(&self.items, &self.state);

        let positions = match update {
            RenderUpdate::Replace => self.view.shown(self.state.paging),
            RenderUpdate::Append => self.view.page(),
        };
        let shown: Vec<&Item> = positions.iter().map(|&idx| &self.items[idx]).collect();
        self.sink.render_items(&shown, update);
        self.sink.render_pagination(&self.view.plan, self.state.paging);
    }

    /// Apply a filter or sort change: sync the URL and start over at page 1
    fn apply_selection(&mut self, change: Option<UrlChange>) -> bool {
        let Some(change) = change else {
            return false;
        };
        self.url.set(&change.param, &change.value);
        self.state.reset_page();
        self.reset();
        true
    }

    /// Select a dropdown option (empty value = the default "All" entry)
    pub fn select_dropdown(&mut self, param: &str, value: &str) -> bool {
        let change = self.state.select_dropdown(param, value);
        self.apply_selection(change)
    }

    /// Flip one option of a toggle filter
    pub fn toggle_option(&mut self, param: &str, value: &str) -> bool {
        let change = self.state.toggle_option(param, value);
        self.apply_selection(change)
    }

    /// Choose a sort field (empty = no explicit sort)
    pub fn select_sort(&mut self, param: &str, field: &str) -> bool {
        let change = self.state.select_sort(param, field);
        self.apply_selection(change)
    }

    /// Record keyword input; it is applied by [`poll`](Self::poll) once the
    /// input has been quiet long enough
    pub fn keyword_input(&mut self, param: &str, text: &str, now: Instant) -> bool {
        match self.keyword_input.iter_mut().find(|(name, _)| name == param) {
            Some((_, debouncer)) => {
                debouncer.push(text.to_string(), now);
                true
            }
            None => {
                debug!(param, "no keyword filter for input");
                false
            }
        }
    }

    /// Apply any keyword input whose quiet period has elapsed, in filter order
    pub fn poll(&mut self, now: Instant) -> bool {
        let due: Vec<(String, String)> = self
            .keyword_input
            .iter_mut()
            .filter_map(|(param, debouncer)| {
                debouncer.poll(now).map(|text| (param.clone(), text))
            })
            .collect();

        let mut applied = false;
        for (param, text) in due {
            let change = self.state.set_keyword(&param, &text);
            applied |= self.apply_selection(change);
        }
        applied
    }

    /// Earliest time a pending keyword input becomes due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.keyword_input
            .iter()
            .filter_map(|(_, debouncer)| debouncer.deadline())
            .min()
    }

    /// Navigate to a page; returns false when the control is disabled
    pub fn goto_page(&mut self, target: PageTarget) -> bool {
        let Some(change) = self.state.goto_page(target, self.view.plan.total_pages) else {
            return false;
        };
        self.url.set(&change.param, &change.value);
        self.refresh(RenderUpdate::Replace);
        true
    }

    /// Append the next page; returns false when nothing is left to load
    pub fn load_more(&mut self) -> bool {
        if !self.view.plan.has_more {
            return false;
        }
        self.state.load_more();
        self.refresh(RenderUpdate::Append);
        true
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn view(&self) -> &WidgetView {
        &self.view
    }

    pub fn plan(&self) -> &PagePlan {
        &self.view.plan
    }

    /// Filtered and ordered items
    pub fn filtered_items(&self) -> Vec<&Item> {
        self.view.filtered.iter().map(|&idx| &self.items[idx]).collect()
    }

    /// Items currently displayed
    pub fn visible_items(&self) -> Vec<&Item> {
        self.view
            .shown(self.state.paging)
            .iter()
            .map(|&idx| &self.items[idx])
            .collect()
    }

    /// Options offered by a dropdown or toggle filter
    pub fn facet_options(&self, param: &str) -> &[FacetOption] {
        self.facets.get(param).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn url(&self) -> &U {
        &self.url
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }
}

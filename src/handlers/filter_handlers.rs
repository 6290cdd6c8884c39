use anyhow::bail;
use blogsift_core::{FacetSink, FilterWidget, RenderSink, UrlStateStore};
use std::time::Instant;
use tracing::debug;

use super::Outcome;

/// Select a dropdown option; an empty value restores the default entry
pub fn select_dropdown<U, R>(
    widget: &mut FilterWidget<U, R>,
    param: &str,
    value: &str,
) -> anyhow::Result<Outcome>
where
    U: UrlStateStore,
    R: RenderSink + FacetSink,
{
    if !widget.select_dropdown(param, value) {
        bail!("no dropdown filter uses the URL parameter '{}'", param);
    }
    Ok(Outcome::Applied)
}

/// Flip one toggle option on or off
pub fn toggle_option<U, R>(
    widget: &mut FilterWidget<U, R>,
    param: &str,
    value: &str,
) -> anyhow::Result<Outcome>
where
    U: UrlStateStore,
    R: RenderSink + FacetSink,
{
    if !widget.toggle_option(param, value) {
        bail!("no toggle filter uses the URL parameter '{}'", param);
    }
    Ok(Outcome::Applied)
}

/// Type into a keyword filter and wait out the quiet period
///
/// Each action is one burst of typing, so the input is flushed at its
/// deadline right away.
pub fn enter_keyword<U, R>(
    widget: &mut FilterWidget<U, R>,
    param: &str,
    text: &str,
) -> anyhow::Result<Outcome>
where
    U: UrlStateStore,
    R: RenderSink + FacetSink,
{
    if !widget.keyword_input(param, text, Instant::now()) {
        bail!("no keyword filter uses the URL parameter '{}'", param);
    }
    if let Some(deadline) = widget.next_deadline() {
        debug!(param, "flushing keyword input");
        widget.poll(deadline);
    }
    Ok(Outcome::Applied)
}

/// Choose a sort field; an empty field restores filtered order
pub fn select_sort<U, R>(
    widget: &mut FilterWidget<U, R>,
    param: &str,
    field: &str,
) -> anyhow::Result<Outcome>
where
    U: UrlStateStore,
    R: RenderSink + FacetSink,
{
    if !widget.select_sort(param, field) {
        bail!("no sort uses the URL parameter '{}'", param);
    }
    Ok(Outcome::Applied)
}

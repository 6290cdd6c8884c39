use blogsift_core::{FacetSink, FilterWidget, PageTarget, PagingMode, RenderSink, UrlStateStore};

use super::Outcome;

/// Jump to a numbered page
pub fn goto_page<U, R>(widget: &mut FilterWidget<U, R>, page: usize) -> Outcome
where
    U: UrlStateStore,
    R: RenderSink + FacetSink,
{
    navigate(widget, PageTarget::Number(page), "page number is not valid")
}

pub fn prev_page<U, R>(widget: &mut FilterWidget<U, R>) -> Outcome
where
    U: UrlStateStore,
    R: RenderSink + FacetSink,
{
    navigate(widget, PageTarget::Prev, "already on the first page")
}

pub fn next_page<U, R>(widget: &mut FilterWidget<U, R>) -> Outcome
where
    U: UrlStateStore,
    R: RenderSink + FacetSink,
{
    navigate(widget, PageTarget::Next, "already on the last page")
}

/// Append the next page in load-more mode
pub fn load_more<U, R>(widget: &mut FilterWidget<U, R>) -> Outcome
where
    U: UrlStateStore,
    R: RenderSink + FacetSink,
{
    if widget.state().paging != PagingMode::LoadMore {
        return Outcome::Skipped("load more is only available in loadMore paging".into());
    }
    if widget.load_more() {
        Outcome::Applied
    } else {
        Outcome::Skipped("no more posts to load".into())
    }
}

fn navigate<U, R>(widget: &mut FilterWidget<U, R>, target: PageTarget, reason: &str) -> Outcome
where
    U: UrlStateStore,
    R: RenderSink + FacetSink,
{
    if widget.goto_page(target) {
        Outcome::Applied
    } else {
        Outcome::Skipped(reason.to_string())
    }
}

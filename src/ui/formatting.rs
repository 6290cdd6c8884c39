use blogsift_core::{FacetOption, FilterSpec, Item, PagePlan, SortSpec};

/// Fields shown for each post, extracted as plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub title: String,
    pub url: Option<String>,
    pub published: Option<String>,
    pub tags: Option<String>,
}

/// How a pagination link should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    Normal,
    Current,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub label: String,
    pub style: LinkStyle,
}

impl PageLink {
    fn new(label: impl Into<String>, style: LinkStyle) -> Self {
        Self {
            label: label.into(),
            style,
        }
    }
}

/// Pull the displayable fields out of a post
pub fn summarize_item(item: &Item) -> ItemSummary {
    ItemSummary {
        title: item
            .get_field_as_string("title")
            .unwrap_or_else(|| "(untitled)".to_string()),
        url: item.get_field_as_string("url"),
        published: item.get_field_as_string("published"),
        tags: item.get_field_as_string("categories"),
    }
}

/// Build the link row: optional prev arrow, page numbers, optional next arrow
pub fn pagination_links(
    plan: &PagePlan,
    prev_label: Option<&str>,
    next_label: Option<&str>,
) -> Vec<PageLink> {
    let mut links = Vec::new();

    if let (Some(control), Some(label)) = (plan.prev, prev_label) {
        let style = if control.disabled {
            LinkStyle::Disabled
        } else {
            LinkStyle::Normal
        };
        links.push(PageLink::new(label, style));
    }

    for page in &plan.window {
        let style = if *page == plan.current_page {
            LinkStyle::Current
        } else {
            LinkStyle::Normal
        };
        links.push(PageLink::new(page.to_string(), style));
    }

    if let (Some(control), Some(label)) = (plan.next, next_label) {
        let style = if control.disabled {
            LinkStyle::Disabled
        } else {
            LinkStyle::Normal
        };
        links.push(PageLink::new(label, style));
    }

    links
}

/// One line listing a filter's options, default entry first
pub fn format_facets(filter: &FilterSpec, options: &[FacetOption]) -> String {
    let mut labels = vec![filter.default_label.as_str()];
    labels.extend(options.iter().map(|o| o.label.as_str()));
    format!("{} ({}): {}", filter.url_param, filter.kind, labels.join(" | "))
}

pub fn format_sort_options(sort: &SortSpec) -> String {
    let mut labels = vec![sort.default_label.as_str()];
    labels.extend(sort.options.iter().map(|o| o.label.as_str()));
    format!("{} (sort): {}", sort.url_param, labels.join(" | "))
}

/// "Showing 11-20 of 23 posts", or a notice when nothing is shown
pub fn format_range(shown_from: usize, shown_to: usize, total: usize) -> String {
    if total == 0 {
        "No posts match the current filters".to_string()
    } else if shown_from >= shown_to {
        format!("Nothing on this page ({} posts in total)", total)
    } else {
        format!("Showing {}-{} of {} posts", shown_from + 1, shown_to, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogsift_core::{plan, FilterKind, NavOptions, Property};
    use serde_json::json;

    #[test]
    fn test_summarize_item() {
        let item: Item = serde_json::from_value(json!({
            "title": "Hello",
            "url": "https://blog.example/hello",
            "categories": [{"label": "News", "value": "news"}, {"label": "Tech", "value": "tech"}]
        }))
        .unwrap();

        let summary = summarize_item(&item);
        assert_eq!(summary.title, "Hello");
        assert_eq!(summary.url.as_deref(), Some("https://blog.example/hello"));
        assert_eq!(summary.tags.as_deref(), Some("News, Tech"));
        assert_eq!(summary.published, None);
    }

    #[test]
    fn test_untitled_item() {
        assert_eq!(summarize_item(&Item::default()).title, "(untitled)");
    }

    #[test]
    fn test_pagination_links() {
        let p = plan(23, 10, 3, NavOptions { prev: true, next: true });
        let links = pagination_links(&p, Some("‹"), Some("›"));
        let labels: Vec<&str> = links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["‹", "1", "2", "3", "›"]);
        assert_eq!(links[0].style, LinkStyle::Normal);
        assert_eq!(links[3].style, LinkStyle::Current);
        assert_eq!(links[4].style, LinkStyle::Disabled);
    }

    #[test]
    fn test_pagination_links_without_arrows() {
        let p = plan(23, 10, 1, NavOptions::default());
        let links = pagination_links(&p, Some("‹"), Some("›"));
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].style, LinkStyle::Current);
    }

    #[test]
    fn test_format_facets() {
        let filter = FilterSpec::new(Property::Single("categories".into()), FilterKind::Dropdown);
        let options = vec![FacetOption::new("Tech", "tech"), FacetOption::new("News", "news")];
        assert_eq!(
            format_facets(&filter, &options),
            "categories (dropdown): All | Tech | News"
        );
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(10, 20, 23), "Showing 11-20 of 23 posts");
        assert_eq!(format_range(0, 0, 0), "No posts match the current filters");
        assert_eq!(format_range(23, 23, 23), "Nothing on this page (23 posts in total)");
    }
}

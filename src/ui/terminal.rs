use blogsift_core::{
    FacetOption, FacetSink, FilterSpec, Item, PagePlan, PagingMode, RenderSink, RenderUpdate,
    SortSpec,
};
use colored::Colorize;

use super::formatting::{
    format_facets, format_range, format_sort_options, pagination_links, summarize_item, LinkStyle,
};

/// Prints each render of the widget to stdout
#[derive(Debug, Default)]
pub struct TerminalView {
    prev_label: Option<String>,
    next_label: Option<String>,
    show_facets: bool,
    /// Number of posts currently in the printed list
    listed: usize,
}

impl TerminalView {
    pub fn new(prev_label: Option<String>, next_label: Option<String>, show_facets: bool) -> Self {
        Self {
            prev_label,
            next_label,
            show_facets,
            listed: 0,
        }
    }

    fn print_item(&self, item: &Item) {
        let summary = summarize_item(item);
        println!("{:>4}. {}", self.listed, summary.title.bold());
        if let Some(url) = summary.url {
            println!("      {}", url.dimmed());
        }
        let mut meta = Vec::new();
        if let Some(published) = summary.published {
            meta.push(format!("published {}", published));
        }
        if let Some(tags) = summary.tags {
            meta.push(tags);
        }
        if !meta.is_empty() {
            println!("      {}", meta.join(" · ").cyan());
        }
    }
}

impl RenderSink for TerminalView {
    fn render_items(&mut self, items: &[&Item], update: RenderUpdate) {
        match update {
            RenderUpdate::Replace => {
                self.listed = 0;
                println!("\n{}", "── posts ──".blue().bold());
            }
            RenderUpdate::Append => println!("{}", "── more ──".blue()),
        }

        for item in items {
            self.listed += 1;
            self.print_item(item);
        }
    }

    fn render_pagination(&mut self, plan: &PagePlan, paging: PagingMode) {
        let shown = match paging {
            PagingMode::Pagination => plan.visible.clone(),
            PagingMode::LoadMore => plan.cumulative(),
        };
        println!(
            "{}",
            format_range(shown.start, shown.end, plan.total_items).italic()
        );

        match paging {
            PagingMode::Pagination => {
                let links = pagination_links(
                    plan,
                    self.prev_label.as_deref(),
                    self.next_label.as_deref(),
                );
                if links.len() > 1 {
                    let row: Vec<String> = links
                        .iter()
                        .map(|link| match link.style {
                            LinkStyle::Current => format!("[{}]", link.label).bold().to_string(),
                            LinkStyle::Disabled => link.label.dimmed().to_string(),
                            LinkStyle::Normal => link.label.clone(),
                        })
                        .collect();
                    println!("{}", row.join(" "));
                }
            }
            PagingMode::LoadMore if plan.has_more => {
                println!("{}", "[ load more ]".green());
            }
            PagingMode::LoadMore => {}
        }
    }
}

impl FacetSink for TerminalView {
    fn render_facets(&mut self, filter: &FilterSpec, options: &[FacetOption]) {
        if self.show_facets {
            println!("{}", format_facets(filter, options));
        }
    }

    fn render_sort_options(&mut self, sort: &SortSpec) {
        if self.show_facets {
            println!("{}", format_sort_options(sort));
        }
    }
}

mod errors;
mod handlers;
mod state;
mod ui;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::load_error_report;
use crate::handlers::{apply_action, Action, Outcome};
use crate::state::{AppState, Overrides};

/// Blog post filter browser - filter, sort and page through posts the way a
/// blog listing widget would, and print the shareable URL for the result
///
/// Examples:
///   # First page of every post
///   blogsift posts.json --config widget.json
///
///   # Restore a shared view
///   blogsift posts.json --config widget.json --url '/blog?category=news&page=2'
///
///   # Replay user actions
///   blogsift posts.json --config widget.json \
///       --action filter:category=news --action toggle:type=video --action next
#[derive(Parser, Debug)]
#[command(name = "blogsift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Actions:\n  \
    filter:PARAM=VALUE   select a dropdown option (empty VALUE selects the default)\n  \
    toggle:PARAM=VALUE   flip one toggle option on or off\n  \
    keyword:PARAM=TEXT   type into a keyword filter\n  \
    sort:PARAM=FIELD     sort by FIELD (empty FIELD restores the default order)\n  \
    page:N               jump to page N\n  \
    prev | next          previous or next page\n  \
    more                 load the next page (loadMore paging)\n\n\
Filtering Logic:\n  \
    - Different filters are combined with AND\n  \
    - Toggle options within one filter are combined with OR\n  \
    - Selecting a filter or sort goes back to page 1")]
struct Cli {
    /// Path to the posts JSON file (an array, or an object with a "posts" array)
    #[arg(value_name = "POSTS")]
    posts: PathBuf,

    /// Path to the widget configuration JSON file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Page URL whose query string seeds the initial state
    #[arg(short, long, value_name = "QUERY", default_value = "/")]
    url: String,

    /// Override the configured posts per page
    #[arg(short = 'n', long, value_name = "N")]
    page_size: Option<usize>,

    /// Use "load more" paging instead of numbered pages
    #[arg(long)]
    load_more: bool,

    /// Action to replay (can be specified multiple times, applied in order)
    #[arg(short, long = "action", value_name = "ACTION")]
    actions: Vec<Action>,

    /// Print the option lists of every filter and sort
    #[arg(short, long)]
    facets: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let overrides = Overrides {
        page_size: cli.page_size,
        load_more: cli.load_more,
    };

    let mut app = match AppState::load(
        &cli.posts,
        cli.config.as_deref(),
        &cli.url,
        &overrides,
        cli.facets,
    ) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("{}", load_error_report(&err.source, &err.path).red());
            process::exit(1);
        }
    };

    tracing::debug!(inputs = %app.describe(), "widget ready");

    for action in &cli.actions {
        println!("\n{} {}", "»".yellow().bold(), action.to_string().yellow());
        let outcome = apply_action(&mut app, action)
            .with_context(|| format!("applying action '{}'", action))?;
        if let Outcome::Skipped(reason) = outcome {
            println!("{}", format!("(skipped: {})", reason).dimmed());
        }
    }

    println!("\n{} {}", "URL:".bold(), app.current_url());
    Ok(())
}

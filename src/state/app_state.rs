use blogsift_core::{
    load_config, load_items, FilterWidget, PagingMode, QueryString, SiftError, WidgetConfig,
};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::ui::TerminalView;

/// A posts or config file that failed to load
#[derive(Debug)]
pub struct LoadError {
    pub path: PathBuf,
    pub source: SiftError,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not load {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Command-line overrides applied on top of the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub page_size: Option<usize>,
    pub load_more: bool,
}

/// Application state: the loaded inputs and the widget driving them
pub struct AppState {
    /// Path to the posts file
    pub posts_file: PathBuf,
    /// Path to the config file, if one was given
    pub config_file: Option<PathBuf>,
    pub widget: FilterWidget<QueryString, TerminalView>,
}

impl AppState {
    /// Load posts and config, then build the widget against `url`
    pub fn load(
        posts_file: &Path,
        config_file: Option<&Path>,
        url: &str,
        overrides: &Overrides,
        show_facets: bool,
    ) -> Result<Self, LoadError> {
        let items = load_items(posts_file).map_err(|source| LoadError {
            path: posts_file.to_path_buf(),
            source,
        })?;

        let mut config = match config_file {
            Some(path) => load_config(path).map_err(|source| LoadError {
                path: path.to_path_buf(),
                source,
            })?,
            None => WidgetConfig::default(),
        };
        apply_overrides(&mut config, overrides);

        info!(posts = items.len(), filters = config.filters.len(), "loaded inputs");
        debug!(?config, "effective config");

        let view = TerminalView::new(
            config.prev_arrow.clone(),
            config.next_arrow.clone(),
            show_facets,
        );
        let widget = FilterWidget::new(items, &config, QueryString::parse(url), view);

        Ok(Self {
            posts_file: posts_file.to_path_buf(),
            config_file: config_file.map(Path::to_path_buf),
            widget,
        })
    }

    /// Shareable URL for the current state
    pub fn current_url(&self) -> String {
        self.widget.url().to_string()
    }

    /// Short description of what was loaded
    pub fn describe(&self) -> String {
        let file_name = |p: &Path| {
            p.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("?")
                .to_string()
        };
        match &self.config_file {
            Some(config) => format!(
                "{} with {}",
                file_name(&self.posts_file),
                file_name(config)
            ),
            None => file_name(&self.posts_file),
        }
    }
}

fn apply_overrides(config: &mut WidgetConfig, overrides: &Overrides) {
    if let Some(page_size) = overrides.page_size {
        config.post_length = page_size;
    }
    if overrides.load_more {
        config.paging = PagingMode::LoadMore;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let mut config = WidgetConfig {
            post_length: 10,
            ..Default::default()
        };
        apply_overrides(
            &mut config,
            &Overrides {
                page_size: Some(3),
                load_more: true,
            },
        );
        assert_eq!(config.post_length, 3);
        assert_eq!(config.paging, PagingMode::LoadMore);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = WidgetConfig {
            post_length: 10,
            ..Default::default()
        };
        apply_overrides(&mut config, &Overrides::default());
        assert_eq!(config.post_length, 10);
        assert_eq!(config.paging, PagingMode::Pagination);
    }

    #[test]
    fn test_missing_posts_file() {
        let err = AppState::load(
            Path::new("/nonexistent/posts.json"),
            None,
            "/blog",
            &Overrides::default(),
            false,
        )
        .err()
        .unwrap();
        assert_eq!(err.path, PathBuf::from("/nonexistent/posts.json"));
        assert!(matches!(err.source, SiftError::Io { .. }));
    }
}

// Public modules
pub mod config;
pub mod debounce;
pub mod error;
pub mod facets;
pub mod filtering;
pub mod io;
pub mod matching;
pub mod models;
pub mod pagination;
pub mod sorting;
pub mod state;
pub mod url_state;
pub mod widget;

// Re-export commonly used types for convenience
pub use config::{FilterConfig, NormalizedConfig, SortConfig, WidgetConfig};
pub use debounce::{Debouncer, KEYWORD_QUIET_PERIOD};
pub use error::{Result, SiftError};
pub use facets::collect_options;
pub use filtering::{
    apply_filters, filter_indices, has_filters, matches_filters, parse_toggle_value,
};
pub use io::{load_config, load_items, parse_items};
pub use matching::{matches, Predicate};
pub use models::{
    FacetOption, FieldType, FieldValue, FilterKind, FilterSpec, FilterValue, Item, Property,
    Scalar, SortSpec, Tag,
};
pub use pagination::{plan, NavControl, NavOptions, PagePlan, PagingMode};
pub use sorting::{normalize_for_sorting, sort_indices, FieldTypes};
pub use state::{recompute, EngineState, PageTarget, UrlChange, WidgetView};
pub use url_state::{QueryString, UrlStateStore};
pub use widget::{FacetSink, FilterWidget, RenderSink, RenderUpdate};

pub mod filter_handlers;
pub mod page_handlers;

use std::fmt;
use std::str::FromStr;

use crate::state::AppState;

/// A user action replayed against the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Filter { param: String, value: String },
    Toggle { param: String, value: String },
    Keyword { param: String, text: String },
    Sort { param: String, field: String },
    Page(usize),
    Prev,
    Next,
    More,
}

/// An action string that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionError {
    pub action: String,
    pub message: String,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid action '{}': {}", self.action, self.message)
    }
}

impl std::error::Error for ActionError {}

/// Result of applying one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The control was disabled or there was nothing to do
    Skipped(String),
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |message: &str| ActionError {
            action: s.to_string(),
            message: message.to_string(),
        };

        match s.trim() {
            "prev" => return Ok(Action::Prev),
            "next" => return Ok(Action::Next),
            "more" => return Ok(Action::More),
            _ => {}
        }

        let (verb, rest) = s
            .split_once(':')
            .ok_or_else(|| error("expected VERB:ARGS, prev, next or more"))?;

        if verb == "page" {
            let page = rest
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| error("page must be a number starting at 1"))?;
            return Ok(Action::Page(page));
        }

        let (param, value) = rest
            .split_once('=')
            .ok_or_else(|| error("expected PARAM=VALUE"))?;
        let param = param.trim();
        if param.is_empty() {
            return Err(error("parameter name is empty"));
        }
        let (param, value) = (param.to_string(), value.to_string());

        match verb {
            "filter" => Ok(Action::Filter { param, value }),
            "toggle" => Ok(Action::Toggle { param, value }),
            "keyword" => Ok(Action::Keyword { param, text: value }),
            "sort" => Ok(Action::Sort { param, field: value }),
            _ => Err(error("unknown verb; use filter, toggle, keyword, sort or page")),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Filter { param, value } => write!(f, "filter:{}={}", param, value),
            Action::Toggle { param, value } => write!(f, "toggle:{}={}", param, value),
            Action::Keyword { param, text } => write!(f, "keyword:{}={}", param, text),
            Action::Sort { param, field } => write!(f, "sort:{}={}", param, field),
            Action::Page(page) => write!(f, "page:{}", page),
            Action::Prev => write!(f, "prev"),
            Action::Next => write!(f, "next"),
            Action::More => write!(f, "more"),
        }
    }
}

/// Apply one action to the widget
pub fn apply_action(state: &mut AppState, action: &Action) -> anyhow::Result<Outcome> {
    let widget = &mut state.widget;
    match action {
        Action::Filter { param, value } => filter_handlers::select_dropdown(widget, param, value),
        Action::Toggle { param, value } => filter_handlers::toggle_option(widget, param, value),
        Action::Keyword { param, text } => filter_handlers::enter_keyword(widget, param, text),
        Action::Sort { param, field } => filter_handlers::select_sort(widget, param, field),
        Action::Page(page) => Ok(page_handlers::goto_page(widget, *page)),
        Action::Prev => Ok(page_handlers::prev_page(widget)),
        Action::Next => Ok(page_handlers::next_page(widget)),
        Action::More => Ok(page_handlers::load_more(widget)),
    }
}

//! Reading and writing widget state in a URL query string.

use std::borrow::Cow;
use std::fmt;

/// Where the widget keeps its shareable state
///
/// `get` returns an empty string for a missing parameter; `set` with an empty
/// value removes the parameter. Parameter names compare case-insensitively.
pub trait UrlStateStore {
    fn get(&self, param: &str) -> String;
    fn set(&mut self, param: &str, value: &str);

    fn has(&self, param: &str) -> bool {
        !self.get(param).is_empty()
    }
}

/// An in-memory URL with an ordered, decoded query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    base: String,
    params: Vec<(String, String)>,
}

impl QueryString {
    /// Parse `base?key=value&...`; a leading `?` alone is also accepted
    pub fn parse(url: &str) -> Self {
        let (base, query) = match url.split_once('?') {
            Some((base, query)) => (base, query),
            None => (url, ""),
        };
        let query = query.split('#').next().unwrap_or_default();

        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect();

        Self {
            base: base.to_string(),
            params,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// The encoded query, including the leading `?`, or "" when empty
    pub fn query(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect();
        format!("?{}", pairs.join("&"))
    }
}

impl UrlStateStore for QueryString {
    fn get(&self, param: &str) -> String {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(param))
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    fn set(&mut self, param: &str, value: &str) {
        if value.is_empty() {
            self.params.retain(|(key, _)| !key.eq_ignore_ascii_case(param));
            return;
        }
        match self
            .params
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(param))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.params.push((param.to_string(), value.to_string())),
        }
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.query())
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        // not valid UTF-8 once decoded: keep what was given
        Err(_) => spaced,
    }
}

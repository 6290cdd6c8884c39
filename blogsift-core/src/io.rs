use crate::config::WidgetConfig;
use crate::error::{Result, SiftError};
use crate::models::Item;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Item documents are either a bare array or an object with a `posts` array
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemDocument {
    List(Vec<serde_json::Value>),
    Wrapped { posts: Vec<serde_json::Value> },
}

/// Parse items from a JSON string
///
/// Malformed JSON is a [`SiftError::Json`]; well-formed JSON of the wrong
/// shape is [`SiftError::InvalidItems`].
pub fn parse_items(json: &str) -> Result<Vec<Item>> {
    let raw: serde_json::Value = serde_json::from_str(json)?;
    let document: ItemDocument = serde_json::from_value(raw).map_err(|_| {
        SiftError::InvalidItems(
            "expected an array of items or an object with a \"posts\" array".into(),
        )
    })?;

    let values = match document {
        ItemDocument::List(values) => values,
        ItemDocument::Wrapped { posts } => posts,
    };

    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| match value {
            serde_json::Value::Object(fields) => Ok(Item::new(fields)),
            other => Err(SiftError::InvalidItems(format!(
                "item #{} is not an object: {}",
                idx + 1,
                other
            ))),
        })
        .collect()
}

/// Load items from a JSON file
pub fn load_items<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    parse_items(&read(path.as_ref())?)
}

/// Load widget configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<WidgetConfig> {
    let contents = read(path.as_ref())?;
    Ok(serde_json::from_str(&contents)?)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SiftError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let items = parse_items(r#"[{"title": "a"}, {"title": "b"}]"#).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].get_field_as_string("title"), Some("b".to_string()));
    }

    #[test]
    fn test_parse_wrapped_posts() {
        let items = parse_items(r#"{"posts": [{"title": "a"}]}"#).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_non_object_item_is_rejected() {
        let err = parse_items(r#"[{"title": "a"}, 3]"#).unwrap_err();
        assert!(matches!(err, SiftError::InvalidItems(ref msg) if msg.contains("item #2")));
    }

    #[test]
    fn test_wrong_document_shape_is_rejected() {
        assert!(matches!(
            parse_items(r#"{"items": []}"#),
            Err(SiftError::InvalidItems(_))
        ));
    }

    #[test]
    fn test_syntax_error_keeps_position() {
        let err = parse_items("[\n  {\"title\": \"a\"},\n  {\"title\": }\n]").unwrap_err();
        match err {
            SiftError::Json(err) => assert_eq!(err.line(), 3),
            other => panic!("expected json error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_items("/definitely/not/here.json").unwrap_err();
        match err {
            SiftError::Io { path, .. } => assert!(path.ends_with("here.json")),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}

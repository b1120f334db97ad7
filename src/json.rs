//! JSON adapter.
//!
//! Objects become mappings in source order, arrays become sequences, and
//! every other value becomes a scalar of the same native type: numbers stay
//! numbers, booleans stay booleans.
//!
//! ```rust
//! use slurpers::{IllegalCharsAction, JsonSlurper, SlurpOptions, Slurper};
//!
//! let json = r#"{"name": "Joan", "born": 1941, "albums": [{"number-of-tracks": 14}]}"#;
//! let options = SlurpOptions::new().with_illegal_chars_action(IllegalCharsAction::StripCapitalize);
//! let doc = JsonSlurper::from_str(json, &options).unwrap();
//!
//! assert_eq!(doc.get("born").unwrap().as_i64(), Some(1941));
//! let album = doc.get("albums").unwrap().at(0).unwrap();
//! assert_eq!(album.get("numberOfTracks").unwrap().as_i64(), Some(14));
//! ```

use crate::builder::TreeBuilder;
use crate::sanitize::IllegalChars;
use crate::source::Slurper;
use crate::{Document, Error, Format, Mapping, Node, Number, Result, Scalar, SlurpOptions};
use serde_json::Value;

/// Builds documents from JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSlurper;

impl Slurper for JsonSlurper {
    const FORMAT: Format = Format::Json;
    const ILLEGAL_CHARS: IllegalChars = IllegalChars::JSON;

    fn build(text: &str, builder: &mut TreeBuilder<'_>) -> Result<Node> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::parse_at(Format::Json, &e, e.line(), e.column()))?;
        build_value(&value, builder)
    }
}

impl JsonSlurper {
    /// Builds a document from an already decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceTooDeep`] for values nested deeper than
    /// [`SlurpOptions::max_depth`], and [`Error::InvalidArgument`] for an
    /// inconsistent key policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slurpers::{JsonSlurper, SlurpOptions};
    ///
    /// let value = serde_json::json!({"surname": "Baez", "songs": ["Diamonds", "Rust"]});
    /// let doc = JsonSlurper::from_value(&value, &SlurpOptions::default()).unwrap();
    /// assert_eq!(doc.get("songs").unwrap().len().unwrap(), 2);
    /// ```
    pub fn from_value(value: &Value, options: &SlurpOptions) -> Result<Document> {
        let mut builder = TreeBuilder::new(Format::Json, options, IllegalChars::JSON)?;
        let root = build_value(value, &mut builder)?;
        tracing::debug!(
            format = %Format::Json,
            source = "value",
            root = root.kind(),
            "built canonical tree"
        );
        Ok(Document::new(Format::Json, root))
    }
}

/// Builds the canonical node for a decoded JSON value.
pub fn build_value(value: &Value, builder: &mut TreeBuilder<'_>) -> Result<Node> {
    match value {
        Value::Object(object) => builder.nested(|builder| {
            let mut map = Mapping::with_capacity(object.len());
            for (key, child) in object {
                builder.insert_with(&mut map, key, |builder| build_value(child, builder))?;
            }
            Ok(Node::Mapping(map))
        }),
        Value::Array(items) => builder.nested(|builder| {
            items
                .iter()
                .map(|item| build_value(item, builder))
                .collect::<Result<Vec<_>>>()
                .map(Node::Sequence)
        }),
        Value::String(s) => Ok(Node::text(s.as_str())),
        Value::Number(n) => Ok(Node::Scalar(Scalar::Number(Number::from(n)))),
        Value::Bool(b) => Ok(Node::Scalar(Scalar::Bool(*b))),
        Value::Null => Ok(Node::Scalar(Scalar::Null)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_keep_native_types() {
        let doc = JsonSlurper::from_value(
            &json!({"n": 14, "f": 2.5, "b": true, "z": null, "s": "14"}),
            &SlurpOptions::default(),
        )
        .unwrap();
        assert_eq!(doc.get("n").unwrap().as_i64(), Some(14));
        assert_eq!(doc.get("f").unwrap().as_f64(), Some(2.5));
        assert_eq!(doc.get("b").unwrap().as_bool(), Some(true));
        assert!(doc.get("z").unwrap().is_null());
        assert_eq!(doc.get("s").unwrap(), "14");
        assert_eq!(doc.get("s").unwrap().as_i64(), None);
    }

    #[test]
    fn test_single_element_array_stays_sequence() {
        let doc = JsonSlurper::from_value(&json!({"a": [1]}), &SlurpOptions::default()).unwrap();
        assert_eq!(doc.get("a").unwrap().kind(), "sequence");
        assert_eq!(doc.get("a").unwrap().len().unwrap(), 1);
    }

    #[test]
    fn test_keys_in_source_order() {
        let doc = JsonSlurper::from_str(r#"{"z": 1, "a": 2, "m": 3}"#, &SlurpOptions::default())
            .unwrap();
        let keys: Vec<&str> = doc.view().keys().unwrap().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_sanitized_collision_merges() {
        let doc = JsonSlurper::from_str(r#"{"a-b": 1, "a_b": 2}"#, &SlurpOptions::default())
            .unwrap();
        assert_eq!(doc.len().unwrap(), 1);
        let merged = doc.get("a_b").unwrap();
        assert_eq!(merged.at(0).unwrap().as_i64(), Some(1));
        assert_eq!(merged.at(1).unwrap().as_i64(), Some(2));
    }

    #[test]
    fn test_malformed_json_reports_position() {
        let err = JsonSlurper::from_str("{\"name\": }", &SlurpOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse {
                format: Format::Json,
                position: Some((1, _)),
                ..
            }
        ));
    }

    #[test]
    fn test_depth_limit_applies_to_values() {
        let options = SlurpOptions::new().with_max_depth(2);
        let err = JsonSlurper::from_value(&json!({"a": {"b": {"c": 1}}}), &options).unwrap_err();
        assert!(err.is_source_too_deep());
        assert!(JsonSlurper::from_value(&json!({"a": {"b": 1}}), &options).is_ok());
    }
}

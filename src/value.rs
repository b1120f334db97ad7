//! Canonical tree representation shared by every source format.
//!
//! This module provides the [`Node`] enum: the format-independent shape every
//! adapter reduces its document to.
//!
//! ## Core Types
//!
//! - [`Node`]: A scalar, an ordered [`Mapping`] of named fields, or a sequence
//! - [`Scalar`]: A leaf value; XML text and config values are always [`Scalar::Text`]
//! - [`Number`]: A JSON number in the representation the decoder produced
//!
//! ## Usage Patterns
//!
//! ### Building Nodes
//!
//! ```rust
//! use slurpers::{Mapping, Node};
//!
//! let mut fields = Mapping::new();
//! fields.merge_insert("name".to_string(), Node::from("John"));
//! fields.merge_insert("name".to_string(), Node::from("Paul"));
//!
//! let node = Node::Mapping(fields);
//! assert!(node.is_mapping());
//! ```
//!
//! ### Type Checking
//!
//! ```rust
//! use slurpers::Node;
//!
//! let node = Node::from(1941);
//! assert!(node.is_scalar());
//! assert_eq!(node.kind(), "scalar");
//! assert_eq!(node.as_i64(), Some(1941));
//! ```

use crate::Mapping;
use serde::{Serialize, Serializer};
use std::fmt;

/// A node of the canonical tree.
///
/// # Examples
///
/// ```rust
/// use slurpers::{Node, Scalar};
///
/// let text = Node::text("Liverpool");
/// assert_eq!(text.as_str(), Some("Liverpool"));
///
/// let list = Node::Sequence(vec![Node::text("a"), Node::text("b")]);
/// assert_eq!(list.as_sequence().map(Vec::len), Some(2));
/// assert_eq!(Node::Scalar(Scalar::Null).to_string(), "null");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Mapping(Mapping),
    Sequence(Vec<Node>),
}

/// A leaf value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

/// A numeric scalar, kept in the representation the JSON decoder produced.
///
/// # Examples
///
/// ```rust
/// use slurpers::Number;
///
/// assert_eq!(Number::Integer(-3).as_i64(), Some(-3));
/// assert_eq!(Number::Unsigned(u64::MAX).as_i64(), None);
/// assert_eq!(Number::Float(14.0).as_i64(), Some(14));
/// assert_eq!(Number::Float(2.5).to_string(), "2.5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl Number {
    /// Converts this number to an `i64` if it fits without loss.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Integer(i) => Some(i),
            Number::Unsigned(u) => i64::try_from(u).ok(),
            Number::Float(f) => {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    Some(f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`, rounding large integers.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(i) => i as f64,
            Number::Unsigned(u) => u as f64,
            Number::Float(f) => f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Integer(i)
        } else if let Some(u) = n.as_u64() {
            Number::Unsigned(u)
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl Scalar {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Scalar::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the scalar is text, returns it. Numbers and booleans are not coerced.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl Node {
    /// Creates a text scalar.
    #[inline]
    pub fn text(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::Text(value.into()))
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    /// Name of the variant, as used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(_) => "scalar",
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
        }
    }

    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }
}

/// Scalars print their text form. Mappings and sequences print a compact
/// JSON rendering meant for debugging only.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(s) => write!(f, "{}", s),
            _ => {
                let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Scalar(s) => s.serialize(serializer),
            Node::Mapping(m) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Node::Sequence(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Scalar::Number(Number::Unsigned(u)) => serializer.serialize_u64(*u),
            Scalar::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Scalar::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Node::Scalar(value)
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Sequence(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::text(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::text(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Scalar(Scalar::Number(Number::Integer(value)))
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Scalar(Scalar::Number(Number::Integer(value as i64)))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Scalar(Scalar::Number(Number::Float(value)))
    }
}

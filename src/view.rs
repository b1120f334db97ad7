//! Navigation over canonical trees.
//!
//! A [`Document`] owns a built tree. [`View`] borrows one node of it and
//! offers field access ([`View::get`]), index access ([`View::at`]), length,
//! iteration and string coercion. Lookups return a [`Field`]: the scalar
//! itself for leaves, or a new view for nested mappings and sequences.
//!
//! ## Single values and lists
//!
//! Repeated keys become sequences only from their second occurrence on. A
//! key that occurs once is stored bare. [`View::at`] accepts index `0` on a
//! bare value and returns it unchanged, so code written for the list case
//! also reads the single case; any other index on a bare value fails with
//! [`Error::MissingKey`].
//!
//! ```rust
//! use slurpers::{SlurpOptions, Slurper, XmlSlurper};
//!
//! let options = SlurpOptions::default();
//! let doc = XmlSlurper::from_str(
//!     "<root><man><name>John</name></man><man><name>Paul</name></man></root>",
//!     &options,
//! )
//! .unwrap();
//!
//! let men = doc.get("man").unwrap();
//! assert_eq!(men.len().unwrap(), 2);
//! assert_eq!(men.at(1).unwrap().get("name").unwrap().as_str(), Some("Paul"));
//! assert!(men.at(2).unwrap_err().is_index_out_of_range());
//!
//! let names: Vec<String> = men
//!     .iter()
//!     .unwrap()
//!     .map(|man| man.get("name").unwrap().to_string())
//!     .collect();
//! assert_eq!(names, ["John", "Paul"]);
//! ```

use crate::{Error, Format, Mapping, Node, Result, Scalar};
use std::fmt;

/// A built document: the canonical root plus the format it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    format: Format,
    root: Node,
}

impl Document {
    #[must_use]
    pub fn new(format: Format, root: Node) -> Self {
        Document { format, root }
    }

    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    #[must_use]
    pub fn into_root(self) -> Node {
        self.root
    }

    /// Returns a view over the root node.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        View::new(&self.root)
    }

    /// See [`View::get`].
    pub fn get(&self, name: &str) -> Result<Field<'_>> {
        self.view().get(name)
    }

    /// See [`View::at`].
    pub fn at(&self, index: usize) -> Result<Field<'_>> {
        self.view().at(index)
    }

    /// See [`View::len`].
    pub fn len(&self) -> Result<usize> {
        self.view().len()
    }

    /// See [`View::is_empty`].
    pub fn is_empty(&self) -> Result<bool> {
        self.view().is_empty()
    }

    /// See [`View::iter`].
    pub fn iter(&self) -> Result<Iter<'_>> {
        self.view().iter()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

/// A read-only view over one canonical node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View<'a> {
    node: &'a Node,
}

impl<'a> View<'a> {
    #[must_use]
    pub fn new(node: &'a Node) -> Self {
        View { node }
    }

    #[must_use]
    pub fn node(&self) -> &'a Node {
        self.node
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    /// Looks up a field of a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] if the field is absent or this node is
    /// not a mapping.
    pub fn get(&self, name: &str) -> Result<Field<'a>> {
        match self.node {
            Node::Mapping(map) => map
                .get(name)
                .map(Field::wrap)
                .ok_or_else(|| Error::missing_key(name)),
            _ => Err(Error::missing_key(name)),
        }
    }

    /// Indexes a sequence. On any other node, index `0` returns the node
    /// itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] past the end of a sequence, and
    /// [`Error::MissingKey`] for a non-zero index into a non-sequence.
    pub fn at(&self, index: usize) -> Result<Field<'a>> {
        match self.node {
            Node::Sequence(items) => items
                .get(index)
                .map(Field::wrap)
                .ok_or_else(|| Error::index_out_of_range(index, items.len())),
            node if index == 0 => Ok(Field::wrap(node)),
            _ => Err(Error::missing_key(index)),
        }
    }

    /// Number of fields of a mapping or elements of a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for a scalar.
    pub fn len(&self) -> Result<usize> {
        match self.node {
            Node::Mapping(map) => Ok(map.len()),
            Node::Sequence(items) => Ok(items.len()),
            Node::Scalar(_) => Err(Error::type_mismatch("take the length of", "scalar")),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for a scalar.
    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// Iterates the elements of a sequence as views.
    ///
    /// Every call starts a fresh pass.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for a mapping or a scalar.
    pub fn iter(&self) -> Result<Iter<'a>> {
        match self.node {
            Node::Sequence(items) => Ok(Iter { inner: items.iter() }),
            node => Err(Error::type_mismatch("iterate", node.kind())),
        }
    }

    /// Iterates the `(name, view)` fields of a mapping in source order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for a sequence or a scalar.
    pub fn entries(&self) -> Result<Entries<'a>> {
        self.mapping("iterate the fields of")
            .map(|map| Entries { inner: map.iter() })
    }

    /// Field names of a mapping in source order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for a sequence or a scalar.
    pub fn keys(&self) -> Result<impl Iterator<Item = &'a str> + 'a> {
        self.mapping("list the keys of")
            .map(|map| map.keys().map(String::as_str))
    }

    fn mapping(&self, operation: &'static str) -> Result<&'a Mapping> {
        self.node
            .as_mapping()
            .ok_or_else(|| Error::type_mismatch(operation, self.node.kind()))
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&'a Scalar> {
        self.node.as_scalar()
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        self.node.as_str()
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.node.as_i64()
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Scalar::as_bool)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.as_scalar().map_or(false, Scalar::is_null)
    }
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.node, f)
    }
}

/// The result of a lookup: a bare scalar, or a view over a nested container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Field<'a> {
    Scalar(&'a Scalar),
    View(View<'a>),
}

impl<'a> Field<'a> {
    fn wrap(node: &'a Node) -> Self {
        match node {
            Node::Scalar(s) => Field::Scalar(s),
            _ => Field::View(View::new(node)),
        }
    }

    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Field::Scalar(_))
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&'a Scalar> {
        match self {
            Field::Scalar(s) => Some(s),
            Field::View(_) => None,
        }
    }

    #[must_use]
    pub fn as_view(&self) -> Option<View<'a>> {
        match self {
            Field::Scalar(_) => None,
            Field::View(view) => Some(*view),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Scalar::as_bool)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.as_scalar().map_or(false, Scalar::is_null)
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Field::Scalar(_) => "scalar",
            Field::View(view) => view.kind(),
        }
    }

    /// See [`View::get`]. A scalar has no fields.
    pub fn get(&self, name: &str) -> Result<Field<'a>> {
        match self {
            Field::Scalar(_) => Err(Error::missing_key(name)),
            Field::View(view) => view.get(name),
        }
    }

    /// See [`View::at`]. Index `0` of a scalar is the scalar itself.
    pub fn at(&self, index: usize) -> Result<Field<'a>> {
        match self {
            Field::Scalar(_) if index == 0 => Ok(*self),
            Field::Scalar(_) => Err(Error::missing_key(index)),
            Field::View(view) => view.at(index),
        }
    }

    /// See [`View::len`].
    pub fn len(&self) -> Result<usize> {
        match self {
            Field::Scalar(_) => Err(Error::type_mismatch("take the length of", "scalar")),
            Field::View(view) => view.len(),
        }
    }

    /// See [`View::is_empty`].
    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// See [`View::iter`].
    pub fn iter(&self) -> Result<Iter<'a>> {
        match self {
            Field::Scalar(_) => Err(Error::type_mismatch("iterate", "scalar")),
            Field::View(view) => view.iter(),
        }
    }

    /// See [`View::entries`].
    pub fn entries(&self) -> Result<Entries<'a>> {
        match self {
            Field::Scalar(_) => Err(Error::type_mismatch("iterate the fields of", "scalar")),
            Field::View(view) => view.entries(),
        }
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Scalar(s) => fmt::Display::fmt(s, f),
            Field::View(view) => fmt::Display::fmt(view, f),
        }
    }
}

impl PartialEq<str> for Field<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Field<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// Iterator over the elements of a sequence, see [`View::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = View<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(View::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(View::new)
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Iterator over the fields of a mapping, see [`View::entries`].
#[derive(Clone, Debug)]
pub struct Entries<'a> {
    inner: indexmap::map::Iter<'a, String, Node>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, View<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, node)| (key.as_str(), View::new(node)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

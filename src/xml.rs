//! XML adapter.
//!
//! Elements with child elements become mappings keyed by the children's
//! local tag names; repeated tags merge into sequences. Leaf elements become
//! their text. Attributes are merged into the element's mapping after the
//! children. Attribute names are not sanitized.
//!
//! Tags and attributes are keyed by their local name only: the namespace
//! prefix is dropped, so `xml:lang` is stored as `lang`, and `a:id` and
//! `b:id` on one element merge into an `id` sequence in attribute order.
//!
//! ```rust
//! use slurpers::{SlurpOptions, Slurper, XmlSlurper};
//!
//! let xml = r#"<root>
//!     <country name="Russia"><population>100</population></country>
//!     <country name="Spain"><population>30</population></country>
//! </root>"#;
//! let doc = XmlSlurper::from_str(xml, &SlurpOptions::default()).unwrap();
//!
//! let lines: Vec<String> = doc
//!     .get("country")
//!     .unwrap()
//!     .iter()
//!     .unwrap()
//!     .map(|c| format!("{}: {}", c.get("name").unwrap(), c.get("population").unwrap()))
//!     .collect();
//! assert_eq!(lines, ["Russia: 100", "Spain: 30"]);
//! ```

use crate::builder::TreeBuilder;
use crate::sanitize::IllegalChars;
use crate::source::Slurper;
use crate::{Document, Error, Format, Mapping, Node, Result, SlurpOptions};
use roxmltree::{Document as XmlDocument, ParsingOptions};
use xmlparser::{ElementEnd, Token, Tokenizer};

/// Builds documents from XML.
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlSlurper;

impl Slurper for XmlSlurper {
    const FORMAT: Format = Format::Xml;
    const ILLEGAL_CHARS: IllegalChars = IllegalChars::XML;

    fn build(text: &str, builder: &mut TreeBuilder<'_>) -> Result<Node> {
        check_depth(text, builder.max_depth())?;
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = XmlDocument::parse_with_options(text, options).map_err(|e| {
            let pos = e.pos();
            Error::parse_at(Format::Xml, &e, pos.row as usize, pos.col as usize)
        })?;
        build_element(doc.root_element(), builder)
    }
}

impl XmlSlurper {
    /// Builds a document from an already parsed element.
    ///
    /// The document root node is accepted as well and stands for its root
    /// element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for nodes that are neither an
    /// element nor the document root.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slurpers::{SlurpOptions, XmlSlurper};
    ///
    /// let xml = roxmltree::Document::parse("<data><name>Sergey</name></data>").unwrap();
    /// let doc = XmlSlurper::from_element(xml.root_element(), &SlurpOptions::default()).unwrap();
    /// assert_eq!(doc.get("name").unwrap().as_str(), Some("Sergey"));
    /// ```
    pub fn from_element(node: roxmltree::Node<'_, '_>, options: &SlurpOptions) -> Result<Document> {
        let element = if node.is_root() {
            node.first_element_child()
        } else {
            Some(node).filter(roxmltree::Node::is_element)
        }
        .ok_or_else(|| {
            Error::invalid_argument(format!("expected an XML element, found {:?}", node.node_type()))
        })?;

        let mut builder = TreeBuilder::new(Format::Xml, options, IllegalChars::XML)?;
        let root = build_element(element, &mut builder)?;
        tracing::debug!(
            format = %Format::Xml,
            source = "element",
            root = root.kind(),
            "built canonical tree"
        );
        Ok(Document::new(Format::Xml, root))
    }
}

/// Scans the markup for element nesting deeper than `max_depth`.
///
/// The DOM parser recurses once per open element, so the limit has to be
/// enforced on the token stream before the DOM is built. Tokenizer errors
/// end the scan; the DOM parser reports them with a position.
fn check_depth(text: &str, max_depth: usize) -> Result<()> {
    let mut depth = 0usize;
    for token in Tokenizer::from(text) {
        match token {
            Ok(Token::ElementStart { .. }) => {
                depth += 1;
                if depth > max_depth {
                    return Err(Error::source_too_deep(max_depth));
                }
            }
            Ok(Token::ElementEnd {
                end: ElementEnd::Close(..) | ElementEnd::Empty,
                ..
            }) => depth = depth.saturating_sub(1),
            Ok(_) => {}
            Err(_) => break,
        }
    }
    Ok(())
}

/// Builds the canonical node for one element and its subtree.
pub fn build_element(element: roxmltree::Node<'_, '_>, builder: &mut TreeBuilder<'_>) -> Result<Node> {
    builder.nested(|builder| {
        if !element.children().any(|child| child.is_element()) {
            return Ok(Node::text(text_content(element)));
        }

        let mut map = Mapping::new();
        for child in element.children().filter(roxmltree::Node::is_element) {
            builder.insert_with(&mut map, child.tag_name().name(), |builder| {
                build_element(child, builder)
            })?;
        }
        for attribute in element.attributes() {
            map.merge_insert(attribute.name().to_string(), Node::text(attribute.value()));
        }
        Ok(Node::Mapping(map))
    })
}

/// Concatenated text and CDATA of a leaf element.
fn text_content(element: roxmltree::Node<'_, '_>) -> String {
    element
        .children()
        .filter(roxmltree::Node::is_text)
        .filter_map(|node| node.text())
        .collect()
}

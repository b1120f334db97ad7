//! # slurpers
//!
//! Read-only, format-independent navigation over XML, JSON and INI documents.
//!
//! ## What does it do?
//!
//! Every supported format is reduced to one canonical tree of three node
//! kinds: scalars, ordered mappings of named fields, and sequences. The tree
//! is then walked with the same field and index operations whatever format
//! it came from.
//!
//! ## Key Features
//!
//! - **Uniform navigation**: [`View::get`] for fields, [`View::at`] for
//!   indices, plus length, iteration and string coercion
//! - **Collision merging**: repeated sibling keys (XML tags, attributes)
//!   become sequences from their second occurrence on
//! - **Key sanitization**: keys such as `birth-date` become field names
//!   according to an [`IllegalCharsAction`]
//! - **Precise errors**: parse failures, missing keys and out-of-range
//!   indices are distinct [`Error`] variants
//! - **Hardened**: nesting depth is bounded ([`SlurpOptions::max_depth`])
//!
//! ## Quick Start
//!
//! ```rust
//! use slurpers::{SlurpOptions, Slurper, XmlSlurper};
//!
//! let xml = "<root>\
//!     <color><name>red</name><rgb>FF0000</rgb></color>\
//!     <color><name>green</name><rgb>00FF00</rgb></color>\
//! </root>";
//! let doc = XmlSlurper::from_str(xml, &SlurpOptions::default()).unwrap();
//!
//! for color in doc.get("color").unwrap().iter().unwrap() {
//!     println!("name: {}, rgb: {}", color.get("name").unwrap(), color.get("rgb").unwrap());
//! }
//! ```
//!
//! ### Repeated keys
//!
//! A key that occurs once is stored as a bare value, not a one-element
//! sequence. Index `0` of a bare value is the value itself:
//!
//! ```rust
//! use slurpers::{SlurpOptions, Slurper, XmlSlurper};
//!
//! let options = SlurpOptions::default();
//! let one = XmlSlurper::from_str("<root><m>a</m></root>", &options).unwrap();
//! let two = XmlSlurper::from_str("<root><m>a</m><m>b</m></root>", &options).unwrap();
//!
//! assert_eq!(one.get("m").unwrap().kind(), "scalar");
//! assert_eq!(two.get("m").unwrap().kind(), "sequence");
//! assert_eq!(one.get("m").unwrap().at(0).unwrap().as_str(), Some("a"));
//! assert_eq!(two.get("m").unwrap().at(0).unwrap().as_str(), Some("a"));
//! ```
//!
//! ### Other formats
//!
//! ```rust
//! use slurpers::{ConfigSlurper, JsonSlurper, SlurpOptions, Slurper};
//!
//! let options = SlurpOptions::default();
//!
//! let json = JsonSlurper::from_str(r#"{"born": 1941}"#, &options).unwrap();
//! assert_eq!(json.get("born").unwrap().as_i64(), Some(1941));
//!
//! let config = ConfigSlurper::from_str("[server]\nport = 8080\n", &options).unwrap();
//! assert_eq!(config.get("server").unwrap().get("port").unwrap().as_str(), Some("8080"));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Built trees are immutable and `Send + Sync`; views can be shared
//!   across threads without locking
//! - No panics in the public API

pub mod builder;
pub mod config;
pub mod error;
pub mod json;
pub mod map;
pub mod options;
pub mod sanitize;
pub mod source;
pub mod value;
pub mod view;
pub mod xml;

pub use builder::TreeBuilder;
pub use config::ConfigSlurper;
pub use error::{Error, Format, Result};
pub use json::JsonSlurper;
pub use map::Mapping;
pub use options::{IllegalCharsAction, NameFunction, SlurpOptions};
pub use sanitize::{IllegalChars, KeyPolicy};
pub use source::{Input, Slurper, Source};
pub use value::{Node, Number, Scalar};
pub use view::{Document, Entries, Field, Iter, View};
pub use xml::XmlSlurper;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_trees_and_views_are_shareable() {
        assert_send_sync::<Node>();
        assert_send_sync::<Document>();
        assert_send_sync::<View<'static>>();
        assert_send_sync::<SlurpOptions>();
    }

    #[test]
    fn test_concurrent_navigation() {
        let doc = XmlSlurper::from_str(
            "<root><m>a</m><m>b</m></root>",
            &SlurpOptions::default(),
        )
        .unwrap();
        std::thread::scope(|scope| {
            for index in 0..2 {
                let doc = &doc;
                scope.spawn(move || {
                    let m = doc.get("m").unwrap();
                    assert_eq!(m.at(index).unwrap().as_str(), Some(["a", "b"][index]));
                });
            }
        });
    }

    #[test]
    fn test_same_shape_across_formats() {
        let options = SlurpOptions::default();
        let xml = XmlSlurper::from_str("<r><s><k>v</k></s></r>", &options).unwrap();
        let json = JsonSlurper::from_str(r#"{"s": {"k": "v"}}"#, &options).unwrap();
        let ini = ConfigSlurper::from_str("[s]\nk = v\n", &options).unwrap();
        assert_eq!(xml.root(), json.root());
        assert_eq!(json.root(), ini.root());
    }
}

//! Error types for building and navigating slurped documents.
//!
//! Every failure is reported as one [`Error`] value scoped to the build or
//! navigation call that raised it. Nothing here is retried or swallowed.
//!
//! ## Error Categories
//!
//! - **Parse**: the source document is malformed (raised by the format parser)
//! - **Invalid argument**: no input source, more than one input source, or a
//!   name-function policy without a function
//! - **Missing key**: navigation to a field that is not there
//! - **Index out of range**: navigation past the end of a sequence
//! - **Source too deep**: the document nests deeper than the configured limit
//! - **Type mismatch**: an operation that is undefined for the node kind
//!   (length of a scalar, iterating a mapping)
//! - **I/O**: reading a stream or file failed
//!
//! ## Examples
//!
//! ```rust
//! use slurpers::{SlurpOptions, Slurper, XmlSlurper};
//!
//! let result = XmlSlurper::from_str("<name>John</name", &SlurpOptions::default());
//! assert!(result.unwrap_err().is_parse());
//! ```

use std::fmt;
use thiserror::Error;

/// Source format a document was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Xml,
    Json,
    Config,
}

impl Format {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::Json => "json",
            Format::Config => "config",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents all possible errors raised while building or walking a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed source document
    #[error("{format} parse error{}: {msg}", fmt_position(.position))]
    Parse {
        format: Format,
        msg: String,
        /// One-based `(line, column)` when the parser reports it
        position: Option<(usize, usize)>,
    },

    /// Missing, ambiguous or inconsistent input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Field lookup on a name the node does not have
    #[error("Missing key: {key}")]
    MissingKey { key: String },

    /// Index past the end of a sequence
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Document nests deeper than the configured limit
    #[error("Source too deep: nesting exceeds {limit} levels")]
    SourceTooDeep { limit: usize },

    /// Operation undefined for this kind of node
    #[error("Cannot {operation} a {found}")]
    TypeMismatch {
        operation: &'static str,
        found: &'static str,
    },

    /// IO error while reading a stream or file
    #[error("IO error: {0}")]
    Io(String),
}

fn fmt_position(position: &Option<(usize, usize)>) -> String {
    match position {
        Some((line, col)) => format!(" at line {}, column {}", line, col),
        None => String::new(),
    }
}

impl Error {
    /// Creates a parse error without position information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slurpers::{Error, Format};
    ///
    /// let err = Error::parse(Format::Config, "option outside any section");
    /// assert!(err.to_string().starts_with("config parse error"));
    /// ```
    pub fn parse<T: fmt::Display>(format: Format, msg: T) -> Self {
        Error::Parse {
            format,
            msg: msg.to_string(),
            position: None,
        }
    }

    /// Creates a parse error carrying the parser's line and column.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slurpers::{Error, Format};
    ///
    /// let err = Error::parse_at(Format::Json, "expected value", 3, 7);
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn parse_at<T: fmt::Display>(format: Format, msg: T, line: usize, col: usize) -> Self {
        Error::Parse {
            format,
            msg: msg.to_string(),
            position: Some((line, col)),
        }
    }

    pub fn invalid_argument<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidArgument(msg.to_string())
    }

    /// Creates a missing-key error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slurpers::Error;
    ///
    /// let err = Error::missing_key("surname");
    /// assert!(err.is_missing_key());
    /// assert_eq!(err.to_string(), "Missing key: surname");
    /// ```
    pub fn missing_key<T: fmt::Display>(key: T) -> Self {
        Error::MissingKey {
            key: key.to_string(),
        }
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    pub fn source_too_deep(limit: usize) -> Self {
        Error::SourceTooDeep { limit }
    }

    pub fn type_mismatch(operation: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch { operation, found }
    }

    /// Creates an I/O error for stream and file reading failures.
    pub fn io<T: fmt::Display>(msg: T) -> Self {
        Error::Io(msg.to_string())
    }

    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    #[must_use]
    pub const fn is_missing_key(&self) -> bool {
        matches!(self, Error::MissingKey { .. })
    }

    #[must_use]
    pub const fn is_index_out_of_range(&self) -> bool {
        matches!(self, Error::IndexOutOfRange { .. })
    }

    #[must_use]
    pub const fn is_source_too_deep(&self) -> bool {
        matches!(self, Error::SourceTooDeep { .. })
    }

    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

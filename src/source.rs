//! Entry points shared by every format.
//!
//! An [`Input`] names exactly one source: raw text, an open reader or a file
//! path. The [`Slurper`] trait turns that source into text, hands it to the
//! format's parser and wraps the resulting canonical tree in a [`Document`].
//!
//! ```rust
//! use slurpers::{Input, JsonSlurper, SlurpOptions, Slurper};
//!
//! let options = SlurpOptions::default();
//! let doc = JsonSlurper::create(r#"{"name": "Joan"}"#, &options).unwrap();
//! assert_eq!(doc.get("name").unwrap().as_str(), Some("Joan"));
//!
//! // No source at all is rejected
//! let err = JsonSlurper::create(Input::new(), &options).unwrap_err();
//! assert!(err.is_invalid_argument());
//! ```

use crate::builder::TreeBuilder;
use crate::sanitize::IllegalChars;
use crate::{Document, Error, Format, Node, Result, SlurpOptions};
use std::borrow::Cow;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A single document source.
pub enum Source<'a> {
    Text(Cow<'a, str>),
    Reader(Box<dyn Read + 'a>),
    Path(PathBuf),
}

impl<'a> Source<'a> {
    fn kind(&self) -> &'static str {
        match self {
            Source::Text(_) => "text",
            Source::Reader(_) => "reader",
            Source::Path(_) => "path",
        }
    }

    /// Reads the source to text. Files are decoded with
    /// [`SlurpOptions::file_charset`]; readers must yield UTF-8.
    fn into_text(self, options: &SlurpOptions) -> Result<Cow<'a, str>> {
        match self {
            Source::Text(text) => Ok(text),
            Source::Reader(mut reader) => {
                let mut text = String::new();
                reader.read_to_string(&mut text)?;
                Ok(Cow::Owned(text))
            }
            Source::Path(path) => {
                let encoding = options.encoding()?;
                let bytes = std::fs::read(&path)
                    .map_err(|e| Error::io(format!("{}: {}", path.display(), e)))?;
                let (text, _, had_errors) = encoding.decode(&bytes);
                if had_errors {
                    return Err(Error::io(format!(
                        "{}: invalid {} text",
                        path.display(),
                        encoding.name()
                    )));
                }
                Ok(Cow::Owned(text.into_owned()))
            }
        }
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Source::Reader(_) => f.write_str("Reader(..)"),
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
        }
    }
}

/// Input for [`Slurper::create`]: must name exactly one source.
///
/// # Examples
///
/// ```rust
/// use slurpers::{Input, SlurpOptions, Slurper, XmlSlurper};
/// use std::io::Cursor;
///
/// let options = SlurpOptions::default();
///
/// let from_text = XmlSlurper::create("<a><b>1</b></a>", &options).unwrap();
/// let from_reader =
///     XmlSlurper::create(Input::new().reader(Cursor::new("<a><b>1</b></a>")), &options).unwrap();
/// assert_eq!(from_text.root(), from_reader.root());
///
/// // Two sources at once are ambiguous
/// let input = Input::new().text("<a/>").path("a.xml");
/// assert!(XmlSlurper::create(input, &options).unwrap_err().is_invalid_argument());
/// ```
#[derive(Debug, Default)]
pub struct Input<'a> {
    sources: Vec<Source<'a>>,
}

impl<'a> Input<'a> {
    #[must_use]
    pub fn new() -> Self {
        Input::default()
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<Cow<'a, str>>) -> Self {
        self.sources.push(Source::Text(text.into()));
        self
    }

    #[must_use]
    pub fn reader(mut self, reader: impl Read + 'a) -> Self {
        self.sources.push(Source::Reader(Box::new(reader)));
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.sources.push(Source::Path(path.as_ref().to_path_buf()));
        self
    }

    /// Returns the single source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if no source or several were given.
    pub fn into_source(mut self) -> Result<Source<'a>> {
        match self.sources.len() {
            1 => Ok(self.sources.remove(0)),
            0 => Err(Error::invalid_argument(
                "no input source: expected text, a reader or a file path",
            )),
            _ => Err(Error::invalid_argument(format!(
                "ambiguous input: {} sources given ({}), expected exactly one",
                self.sources.len(),
                self.sources
                    .iter()
                    .map(Source::kind)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::new().text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::new().text(text.as_str())
    }
}

impl From<String> for Input<'_> {
    fn from(text: String) -> Self {
        Input::new().text(text)
    }
}

impl From<&Path> for Input<'_> {
    fn from(path: &Path) -> Self {
        Input::new().path(path)
    }
}

impl From<PathBuf> for Input<'_> {
    fn from(path: PathBuf) -> Self {
        Input {
            sources: vec![Source::Path(path)],
        }
    }
}

/// A format adapter: turns source text into a canonical tree.
///
/// Implementors provide [`Slurper::build`]; the provided methods cover every
/// way of supplying input.
pub trait Slurper {
    const FORMAT: Format;
    const ILLEGAL_CHARS: IllegalChars;

    /// Parses `text` and builds its canonical tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed text, plus any build error.
    fn build(text: &str, builder: &mut TreeBuilder<'_>) -> Result<Node>;

    /// Builds a document from exactly one source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a missing or ambiguous source or
    /// an inconsistent policy, [`Error::Io`] if reading fails, and
    /// [`Error::Parse`] for malformed source text.
    fn create<'a, I>(input: I, options: &SlurpOptions) -> Result<Document>
    where
        I: Into<Input<'a>>,
    {
        let source = input.into().into_source()?;
        let mut builder = TreeBuilder::new(Self::FORMAT, options, Self::ILLEGAL_CHARS)?;
        let kind = source.kind();
        let text = source.into_text(options)?;
        let root = Self::build(&text, &mut builder)?;
        tracing::debug!(
            format = %Self::FORMAT,
            source = kind,
            root = root.kind(),
            "built canonical tree"
        );
        Ok(Document::new(Self::FORMAT, root))
    }

    /// Builds a document from a string.
    fn from_str(text: &str, options: &SlurpOptions) -> Result<Document> {
        Self::create(Input::new().text(text), options)
    }

    /// Builds a document from a UTF-8 reader.
    fn from_reader<R: Read>(reader: R, options: &SlurpOptions) -> Result<Document> {
        Self::create(Input::new().reader(reader), options)
    }

    /// Builds a document from a file decoded with [`SlurpOptions::file_charset`].
    fn from_path<P: AsRef<Path>>(path: P, options: &SlurpOptions) -> Result<Document> {
        Self::create(Input::new().path(path), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_into_source_requires_exactly_one() {
        assert!(Input::new().into_source().unwrap_err().is_invalid_argument());

        let err = Input::new()
            .text("a")
            .reader(Cursor::new("b"))
            .into_source()
            .unwrap_err();
        assert!(err.to_string().contains("text, reader"));

        assert!(matches!(
            Input::from("x").into_source().unwrap(),
            Source::Text(_)
        ));
        assert!(matches!(
            Input::from(PathBuf::from("x.json")).into_source().unwrap(),
            Source::Path(_)
        ));
    }

    #[test]
    fn test_reader_text() {
        let options = SlurpOptions::default();
        let source = Input::new().reader(Cursor::new("k = v")).into_source().unwrap();
        assert_eq!(source.into_text(&options).unwrap(), "k = v");
    }

    #[test]
    fn test_missing_file_is_io() {
        let options = SlurpOptions::default();
        let source = Input::new()
            .path("definitely/not/here.xml")
            .into_source()
            .unwrap();
        let err = source.into_text(&options).unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("here.xml"));
    }
}

//! Config (INI) adapter.
//!
//! The document becomes one mapping with a nested mapping per section.
//! Option values are always text. Section and option names are sanitized
//! with the config alphabet (`-`, space, `.`, `/`, `#`).
//!
//! Files are read the way Python's `configparser` reads them:
//!
//! - option names are lower-cased, section names keep their case
//! - indented lines continue the previous value, joined with `\n`
//! - `%(name)s` expands to another option of the same section (or of
//!   `DEFAULT`), `%%` is a literal `%`
//!
//! Raw names are unique: a section repeated in the file, or an option
//! repeated within its section after lower-casing, is a parse error. The
//! collision-merge rule therefore only comes into play when two distinct
//! names sanitize to the same field name, which is unlike XML where
//! repeated tags are the normal way to express a list.
//!
//! A section named `DEFAULT` is not emitted. Its options are inherited by
//! every other section that does not set them itself.
//!
//! ```rust
//! use slurpers::{ConfigSlurper, SlurpOptions, Slurper};
//!
//! let ini = "[DEFAULT]\nPort = 80\n\n[web server]\nhost = example.org\nurl = http://%(host)s:%(port)s/\n";
//! let doc = ConfigSlurper::from_str(ini, &SlurpOptions::default()).unwrap();
//!
//! let server = doc.get("web_server").unwrap();
//! assert_eq!(server.get("port").unwrap().as_str(), Some("80"));
//! assert_eq!(server.get("url").unwrap().as_str(), Some("http://example.org:80/"));
//! ```

use crate::builder::TreeBuilder;
use crate::sanitize::IllegalChars;
use crate::source::Slurper;
use crate::{Document, Error, Format, Mapping, Node, Result, SlurpOptions};
use indexmap::IndexMap;
use ini::{Ini, ParseOption, Properties};
use std::collections::HashSet;

/// Name of the section whose options every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Maximum nesting of `%(name)s` references within one value.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Lower-cased option names of one section mapped to their raw values.
type Options<'i> = IndexMap<String, &'i str>;

/// Builds documents from INI-style config files.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigSlurper;

impl Slurper for ConfigSlurper {
    const FORMAT: Format = Format::Config;
    const ILLEGAL_CHARS: IllegalChars = IllegalChars::CONFIG;

    fn build(text: &str, builder: &mut TreeBuilder<'_>) -> Result<Node> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            enabled_indented_mutiline_value: true,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, options)
            .map_err(|e| Error::parse(Format::Config, e))?;
        build_ini(&ini, builder)
    }
}

impl ConfigSlurper {
    /// Builds a document from an already parsed config model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for repeated section or option names, for
    /// options outside any section and for bad `%(name)s` references.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slurpers::{ConfigSlurper, SlurpOptions};
    ///
    /// let mut ini = ini::Ini::new();
    /// ini.with_section(Some("db")).set("User", "admin");
    /// let doc = ConfigSlurper::from_ini(&ini, &SlurpOptions::default()).unwrap();
    /// assert_eq!(doc.get("db").unwrap().get("user").unwrap().as_str(), Some("admin"));
    /// ```
    pub fn from_ini(ini: &Ini, options: &SlurpOptions) -> Result<Document> {
        let mut builder = TreeBuilder::new(Format::Config, options, IllegalChars::CONFIG)?;
        let root = build_ini(ini, &mut builder)?;
        tracing::debug!(
            format = %Format::Config,
            source = "ini",
            root = root.kind(),
            "built canonical tree"
        );
        Ok(Document::new(Format::Config, root))
    }
}

/// Builds the canonical mapping for a parsed config model.
pub fn build_ini(ini: &Ini, builder: &mut TreeBuilder<'_>) -> Result<Node> {
    let mut defaults = Options::new();
    let mut sections = Vec::new();
    let mut seen = HashSet::new();

    for (name, properties) in ini.iter() {
        match name {
            None if properties.is_empty() => {}
            None => {
                return Err(Error::parse(
                    Format::Config,
                    "option outside any section",
                ))
            }
            Some(name) => {
                if !seen.insert(name) {
                    return Err(Error::parse(
                        Format::Config,
                        format!("duplicate section '{}'", name),
                    ));
                }
                if name == DEFAULT_SECTION {
                    defaults = collect_options(name, properties)?;
                } else {
                    sections.push((name, properties));
                }
            }
        }
    }

    builder.nested(|builder| {
        let mut root = Mapping::with_capacity(sections.len());
        for (name, properties) in sections {
            builder.insert_with(&mut root, name, |builder| {
                build_section(name, properties, &defaults, builder)
            })?;
        }
        Ok(Node::Mapping(root))
    })
}

/// Collects a section's options under lower-cased names.
fn collect_options<'i>(section: &str, properties: &'i Properties) -> Result<Options<'i>> {
    let mut options = Options::with_capacity(properties.len());
    for (key, value) in properties.iter() {
        let name = key.to_lowercase();
        if options.contains_key(&name) {
            return Err(Error::parse(
                Format::Config,
                format!("duplicate option '{}' in section '{}'", name, section),
            ));
        }
        options.insert(name, value);
    }
    Ok(options)
}

fn build_section(
    section: &str,
    properties: &Properties,
    defaults: &Options<'_>,
    builder: &mut TreeBuilder<'_>,
) -> Result<Node> {
    let mut options = collect_options(section, properties)?;
    for (key, value) in defaults {
        options.entry(key.clone()).or_insert(*value);
    }

    builder.nested(|builder| {
        let mut map = Mapping::with_capacity(options.len());
        for (key, value) in &options {
            let value = interpolate(section, key, value, &options)?;
            if let Some(name) = builder.field_name(key) {
                map.merge_insert(name, Node::text(value));
            }
        }
        Ok(Node::Mapping(map))
    })
}

/// Expands `%(name)s` references and `%%` escapes in an option value.
///
/// # Errors
///
/// Returns [`Error::Parse`] for an unknown reference, a malformed `%`
/// sequence, or references nested deeper than [`MAX_INTERPOLATION_DEPTH`].
///
/// # Examples
///
/// ```rust
/// use indexmap::IndexMap;
/// use slurpers::config::interpolate;
///
/// let options: IndexMap<String, &str> =
///     [("home".to_string(), "/srv"), ("logs".to_string(), "%(home)s/logs")].into_iter().collect();
/// assert_eq!(interpolate("app", "logs", "%(home)s/logs", &options).unwrap(), "/srv/logs");
/// assert_eq!(interpolate("app", "rate", "50%%", &options).unwrap(), "50%");
/// ```
pub fn interpolate(
    section: &str,
    option: &str,
    value: &str,
    options: &IndexMap<String, &str>,
) -> Result<String> {
    let mut out = String::with_capacity(value.len());
    expand(section, option, value, options, 1, &mut out)?;
    Ok(out)
}

fn expand(
    section: &str,
    option: &str,
    value: &str,
    options: &IndexMap<String, &str>,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(interpolation_error(section, option, "references nest too deeply"));
    }

    let mut rest = value;
    while let Some(at) = rest.find('%') {
        out.push_str(&rest[..at]);
        rest = &rest[at + 1..];

        if let Some(tail) = rest.strip_prefix('%') {
            out.push('%');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('(') {
            let (name, tail) = tail
                .find(')')
                .filter(|&close| close > 0)
                .and_then(|close| Some((&tail[..close], tail[close + 1..].strip_prefix('s')?)))
                .ok_or_else(|| {
                    interpolation_error(section, option, format!("bad reference in '{}'", value))
                })?;
            let reference = name.to_lowercase();
            let replacement = options.get(&reference).ok_or_else(|| {
                interpolation_error(section, option, format!("unknown reference '%({})s'", name))
            })?;
            if replacement.contains('%') {
                expand(section, &reference, replacement, options, depth + 1, out)?;
            } else {
                out.push_str(replacement);
            }
            rest = tail;
        } else {
            return Err(interpolation_error(
                section,
                option,
                "'%' must be followed by '%' or '('",
            ));
        }
    }
    out.push_str(rest);
    Ok(())
}

fn interpolation_error(section: &str, option: &str, msg: impl std::fmt::Display) -> Error {
    Error::parse(
        Format::Config,
        format!(
            "bad interpolation in option '{}' of section '{}': {}",
            option, section, msg
        ),
    )
}

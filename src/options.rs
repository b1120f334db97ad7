//! Configuration options for building slurped documents.
//!
//! This module provides the types that control how raw source keys become
//! field names and how input is read:
//!
//! - [`SlurpOptions`]: Main configuration struct, passed by reference to every build
//! - [`IllegalCharsAction`]: What to do with keys containing illegal characters
//! - [`NameFunction`]: Caller-supplied key remapping for [`IllegalCharsAction::UseNameFunction`]
//!
//! ## Examples
//!
//! ```rust
//! use slurpers::{IllegalCharsAction, SlurpOptions, Slurper, XmlSlurper};
//!
//! let options = SlurpOptions::new()
//!     .with_illegal_chars_action(IllegalCharsAction::StripCapitalize);
//! let doc = XmlSlurper::from_str("<root><birth-date>1940</birth-date></root>", &options).unwrap();
//! assert_eq!(doc.get("birthDate").unwrap().as_str(), Some("1940"));
//! ```

use crate::sanitize::KeyPolicy;
use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Default nesting limit, counting the root as the first level.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default charset label for documents read from a file path.
pub const DEFAULT_FILE_CHARSET: &str = "utf-8";

/// Action applied to keys that contain characters illegal in a field name.
///
/// Keys without illegal characters are kept as they are, except under
/// [`IllegalCharsAction::UseNameFunction`], which remaps every key.
///
/// # Examples
///
/// ```rust
/// use slurpers::IllegalCharsAction;
///
/// let action: IllegalCharsAction = "strip_capitalize".parse().unwrap();
/// assert_eq!(action, IllegalCharsAction::StripCapitalize);
/// assert_eq!(IllegalCharsAction::default(), IllegalCharsAction::ReplaceWithUnderscores);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IllegalCharsAction {
    /// `birth-date` -> `birthdate`
    Strip,
    /// `birth-date` -> `birth_date`
    #[default]
    ReplaceWithUnderscores,
    /// `birth-date` -> `birthDate`
    StripCapitalize,
    /// Drop the entry entirely
    IgnoreNames,
    /// Apply [`SlurpOptions::name_function`] to every key
    UseNameFunction,
}

impl IllegalCharsAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IllegalCharsAction::Strip => "strip",
            IllegalCharsAction::ReplaceWithUnderscores => "replace_with_underscores",
            IllegalCharsAction::StripCapitalize => "strip_capitalize",
            IllegalCharsAction::IgnoreNames => "ignore_names",
            IllegalCharsAction::UseNameFunction => "use_name_function",
        }
    }
}

impl fmt::Display for IllegalCharsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IllegalCharsAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strip" => Ok(IllegalCharsAction::Strip),
            "replace_with_underscores" => Ok(IllegalCharsAction::ReplaceWithUnderscores),
            "strip_capitalize" => Ok(IllegalCharsAction::StripCapitalize),
            "ignore_names" => Ok(IllegalCharsAction::IgnoreNames),
            "use_name_function" => Ok(IllegalCharsAction::UseNameFunction),
            other => Err(Error::invalid_argument(format!(
                "unknown illegal chars action '{}'",
                other
            ))),
        }
    }
}

/// A shareable key-remapping function.
///
/// # Examples
///
/// ```rust
/// use slurpers::NameFunction;
///
/// let upper = NameFunction::new(|key| key.to_uppercase());
/// assert_eq!(upper.apply("name"), "NAME");
/// ```
#[derive(Clone)]
pub struct NameFunction(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl NameFunction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        NameFunction(Arc::new(f))
    }

    #[inline]
    pub fn apply(&self, key: &str) -> String {
        (self.0)(key)
    }
}

impl fmt::Debug for NameFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NameFunction(..)")
    }
}

/// Configuration for a single build.
///
/// Options are an immutable value: every entry point borrows them for the
/// duration of one build and keeps nothing afterwards.
///
/// # Examples
///
/// ```rust
/// use slurpers::{IllegalCharsAction, SlurpOptions};
///
/// // Defaults: underscores for illegal characters, UTF-8 files, 256 levels
/// let options = SlurpOptions::new();
/// assert_eq!(options.illegal_chars_action, IllegalCharsAction::ReplaceWithUnderscores);
/// assert_eq!(options.file_charset, "utf-8");
///
/// // Custom configuration
/// let options = SlurpOptions::new()
///     .with_name_function(|key| key.replace('-', ""))
///     .with_file_charset("windows-1251")
///     .with_max_depth(32);
/// assert_eq!(options.illegal_chars_action, IllegalCharsAction::UseNameFunction);
/// ```
#[derive(Clone, Debug)]
pub struct SlurpOptions {
    pub illegal_chars_action: IllegalCharsAction,
    pub name_function: Option<NameFunction>,
    pub file_charset: String,
    pub max_depth: usize,
}

impl Default for SlurpOptions {
    fn default() -> Self {
        SlurpOptions {
            illegal_chars_action: IllegalCharsAction::default(),
            name_function: None,
            file_charset: DEFAULT_FILE_CHARSET.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SlurpOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_illegal_chars_action(mut self, action: IllegalCharsAction) -> Self {
        self.illegal_chars_action = action;
        self
    }

    /// Sets the key-remapping function and switches the action to
    /// [`IllegalCharsAction::UseNameFunction`].
    #[must_use]
    pub fn with_name_function<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.name_function = Some(NameFunction::new(f));
        self.illegal_chars_action = IllegalCharsAction::UseNameFunction;
        self
    }

    /// Sets the WHATWG encoding label used when reading from a file path.
    #[must_use]
    pub fn with_file_charset(mut self, charset: impl Into<String>) -> Self {
        self.file_charset = charset.into();
        self
    }

    /// Sets the maximum nesting depth. The root counts as level 1.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolves the action and the optional name function into the policy
    /// applied by the key sanitizer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for
    /// [`IllegalCharsAction::UseNameFunction`] without a name function.
    pub fn key_policy(&self) -> Result<KeyPolicy<'_>> {
        if self.name_function.is_some()
            && self.illegal_chars_action != IllegalCharsAction::UseNameFunction
        {
            tracing::warn!(
                action = %self.illegal_chars_action,
                "name function is ignored by the configured illegal chars action"
            );
        }

        Ok(match self.illegal_chars_action {
            IllegalCharsAction::Strip => KeyPolicy::Strip,
            IllegalCharsAction::ReplaceWithUnderscores => KeyPolicy::ReplaceWithUnderscores,
            IllegalCharsAction::StripCapitalize => KeyPolicy::StripCapitalize,
            IllegalCharsAction::IgnoreNames => KeyPolicy::IgnoreNames,
            IllegalCharsAction::UseNameFunction => match &self.name_function {
                Some(f) => KeyPolicy::NameFunction(f),
                None => {
                    return Err(Error::invalid_argument(
                        "use_name_function requires a name function",
                    ))
                }
            },
        })
    }

    /// Looks up the encoding named by [`SlurpOptions::file_charset`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the label is not a known encoding.
    pub fn encoding(&self) -> Result<&'static encoding_rs::Encoding> {
        encoding_rs::Encoding::for_label(self.file_charset.trim().as_bytes()).ok_or_else(|| {
            Error::invalid_argument(format!("unknown file charset '{}'", self.file_charset))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_str_round_trips_display() {
        for action in [
            IllegalCharsAction::Strip,
            IllegalCharsAction::ReplaceWithUnderscores,
            IllegalCharsAction::StripCapitalize,
            IllegalCharsAction::IgnoreNames,
            IllegalCharsAction::UseNameFunction,
        ] {
            assert_eq!(action.as_str().parse::<IllegalCharsAction>().unwrap(), action);
        }
        assert!("capitalize".parse::<IllegalCharsAction>().is_err());
    }

    #[test]
    fn test_action_deserializes_snake_case() {
        let action: IllegalCharsAction = serde_json::from_str("\"ignore_names\"").unwrap();
        assert_eq!(action, IllegalCharsAction::IgnoreNames);
    }

    #[test]
    fn test_name_function_policy_requires_function() {
        let options =
            SlurpOptions::new().with_illegal_chars_action(IllegalCharsAction::UseNameFunction);
        let err = options.key_policy().unwrap_err();
        assert!(err.is_invalid_argument());

        let options = SlurpOptions::new().with_name_function(|k| k.to_string());
        assert!(matches!(
            options.key_policy().unwrap(),
            KeyPolicy::NameFunction(_)
        ));
    }

    #[test]
    fn test_encoding_labels() {
        let options = SlurpOptions::new();
        assert_eq!(options.encoding().unwrap(), encoding_rs::UTF_8);

        let options = SlurpOptions::new().with_file_charset("windows-1251");
        assert_eq!(options.encoding().unwrap(), encoding_rs::WINDOWS_1251);

        let options = SlurpOptions::new().with_file_charset("klingon");
        assert!(options.encoding().unwrap_err().is_invalid_argument());
    }
}

//! Key sanitization.
//!
//! Source keys (XML tags, JSON object keys, config sections and options) may
//! contain characters such as `-` or `.` that cannot appear in a field name.
//! [`sanitize`] turns a raw key into a field name, or into `None` when the
//! entry should be dropped, according to a [`KeyPolicy`].
//!
//! ```rust
//! use slurpers::sanitize::{sanitize, IllegalChars, KeyPolicy};
//!
//! let xml = IllegalChars::XML;
//! assert_eq!(sanitize("birth-date", &KeyPolicy::Strip, xml).as_deref(), Some("birthdate"));
//! assert_eq!(sanitize("birth-date", &KeyPolicy::ReplaceWithUnderscores, xml).as_deref(), Some("birth_date"));
//! assert_eq!(sanitize("birth-date", &KeyPolicy::StripCapitalize, xml).as_deref(), Some("birthDate"));
//! assert_eq!(sanitize("birth-date", &KeyPolicy::IgnoreNames, xml), None);
//! ```

use crate::NameFunction;

/// The set of characters considered illegal in a field name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IllegalChars(&'static [char]);

impl IllegalChars {
    pub const XML: IllegalChars = IllegalChars(&['-', '.']);
    pub const JSON: IllegalChars = IllegalChars(&['-', '.']);
    pub const CONFIG: IllegalChars = IllegalChars(&['-', ' ', '.', '/', '#']);

    #[must_use]
    pub const fn new(chars: &'static [char]) -> Self {
        IllegalChars(chars)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    /// Returns `true` if `key` holds at least one illegal character.
    #[inline]
    #[must_use]
    pub fn any_in(&self, key: &str) -> bool {
        key.chars().any(|c| self.contains(c))
    }

    #[must_use]
    pub const fn chars(&self) -> &'static [char] {
        self.0
    }
}

/// A resolved sanitization policy, see [`crate::SlurpOptions::key_policy`].
#[derive(Clone, Copy, Debug)]
pub enum KeyPolicy<'a> {
    Strip,
    ReplaceWithUnderscores,
    StripCapitalize,
    IgnoreNames,
    NameFunction(&'a NameFunction),
}

/// Maps a raw key to a field name, or to `None` if the entry is dropped.
///
/// Keys with no illegal character come back unchanged under every policy
/// except [`KeyPolicy::NameFunction`], which is applied unconditionally.
pub fn sanitize(raw: &str, policy: &KeyPolicy<'_>, illegal: IllegalChars) -> Option<String> {
    match policy {
        KeyPolicy::NameFunction(f) => Some(f.apply(raw)),
        _ if !illegal.any_in(raw) => Some(raw.to_string()),
        KeyPolicy::Strip => Some(strip(raw, illegal)),
        KeyPolicy::ReplaceWithUnderscores => Some(replace_with(raw, illegal, '_')),
        KeyPolicy::StripCapitalize => Some(strip_capitalize(raw, illegal)),
        KeyPolicy::IgnoreNames => None,
    }
}

/// Removes every illegal character: `test--..one` -> `testone`.
#[must_use]
pub fn strip(raw: &str, illegal: IllegalChars) -> String {
    raw.chars().filter(|c| !illegal.contains(*c)).collect()
}

/// Replaces each illegal character with `ch`: `test-.-one` -> `test___one`.
#[must_use]
pub fn replace_with(raw: &str, illegal: IllegalChars, ch: char) -> String {
    raw.chars()
        .map(|c| if illegal.contains(c) { ch } else { c })
        .collect()
}

/// Removes illegal characters and upper-cases the character after each
/// removed run: `number-of-tracks` -> `numberOfTracks`.
#[must_use]
pub fn strip_capitalize(raw: &str, illegal: IllegalChars) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut capitalize = false;
    for c in raw.chars() {
        if illegal.contains(c) {
            capitalize = true;
        } else if capitalize {
            result.extend(c.to_uppercase());
            capitalize = false;
        } else {
            result.push(c);
        }
    }
    result
}

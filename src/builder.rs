//! Shared state for building a canonical tree.
//!
//! Every adapter walks its parsed document with a [`TreeBuilder`]. The
//! builder resolves the key policy once, turns raw keys into field names,
//! and counts nesting so that pathological input fails with
//! [`Error::SourceTooDeep`] instead of exhausting the stack.

use crate::sanitize::{self, IllegalChars, KeyPolicy};
use crate::{Error, Format, Mapping, Node, Result, SlurpOptions};

/// Build context handed to the format adapters.
#[derive(Debug)]
pub struct TreeBuilder<'o> {
    format: Format,
    policy: KeyPolicy<'o>,
    illegal: IllegalChars,
    max_depth: usize,
    depth: usize,
}

impl<'o> TreeBuilder<'o> {
    /// Creates a builder for `format` using its illegal-character alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the options select the name
    /// function policy without providing a function.
    pub fn new(format: Format, options: &'o SlurpOptions, illegal: IllegalChars) -> Result<Self> {
        Ok(TreeBuilder {
            format,
            policy: options.key_policy()?,
            illegal,
            max_depth: options.max_depth,
            depth: 0,
        })
    }

    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sanitizes a raw key. `None` means the entry must be dropped.
    pub fn field_name(&self, raw: &str) -> Option<String> {
        let name = sanitize::sanitize(raw, &self.policy, self.illegal);
        if name.is_none() {
            tracing::trace!(format = %self.format, key = raw, "dropping entry with illegal name");
        }
        name
    }

    /// Sanitizes `raw` and merge-inserts the value produced by `build`.
    ///
    /// `build` only runs for keys the policy keeps.
    pub fn insert_with<F>(&mut self, map: &mut Mapping, raw: &str, build: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<Node>,
    {
        if let Some(name) = self.field_name(raw) {
            let value = build(self)?;
            map.merge_insert(name, value);
        }
        Ok(())
    }

    /// Runs `build` one nesting level deeper.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceTooDeep`] once the level exceeds
    /// [`SlurpOptions::max_depth`].
    pub fn nested<F>(&mut self, build: F) -> Result<Node>
    where
        F: FnOnce(&mut Self) -> Result<Node>,
    {
        if self.depth >= self.max_depth {
            return Err(Error::source_too_deep(self.max_depth));
        }
        self.depth += 1;
        let result = build(self);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IllegalCharsAction;

    fn nest(builder: &mut TreeBuilder<'_>, levels: usize) -> Result<Node> {
        builder.nested(|b| {
            if levels == 1 {
                Ok(Node::text("leaf"))
            } else {
                nest(b, levels - 1)
            }
        })
    }

    #[test]
    fn test_depth_limit_counts_root_as_first_level() {
        let options = SlurpOptions::new().with_max_depth(3);
        let mut builder = TreeBuilder::new(Format::Xml, &options, IllegalChars::XML).unwrap();
        assert!(nest(&mut builder, 3).is_ok());

        let err = nest(&mut builder, 4).unwrap_err();
        assert!(err.is_source_too_deep());
        assert_eq!(err.to_string(), "Source too deep: nesting exceeds 3 levels");
    }

    #[test]
    fn test_depth_is_restored_after_failure() {
        let options = SlurpOptions::new().with_max_depth(2);
        let mut builder = TreeBuilder::new(Format::Json, &options, IllegalChars::JSON).unwrap();
        assert!(nest(&mut builder, 5).is_err());
        assert!(nest(&mut builder, 2).is_ok());
    }

    #[test]
    fn test_insert_with_skips_dropped_keys() {
        let options = SlurpOptions::new().with_illegal_chars_action(IllegalCharsAction::IgnoreNames);
        let mut builder = TreeBuilder::new(Format::Xml, &options, IllegalChars::XML).unwrap();
        let mut map = Mapping::new();
        builder
            .insert_with(&mut map, "tag-one", |_| panic!("dropped keys are never built"))
            .unwrap();
        builder
            .insert_with(&mut map, "tag", |_| Ok(Node::text("kept")))
            .unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("tag"));
    }

    #[test]
    fn test_missing_name_function_fails_at_construction() {
        let options =
            SlurpOptions::new().with_illegal_chars_action(IllegalCharsAction::UseNameFunction);
        let err = TreeBuilder::new(Format::Config, &options, IllegalChars::CONFIG).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}

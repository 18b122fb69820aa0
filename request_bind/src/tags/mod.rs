//! Field name and option resolution from tag metadata.
//!
//! Each field carries a primary `request` tag plus any number of named
//! fallback channels (for example `db` or `response`). A tag string has the
//! form `name,option,option=value`. The first non-empty name found across
//! the primary channel and the registered fallbacks, in order, becomes the
//! field's input name; a field with no name anywhere falls back to its
//! lower-cased identifier. The name `-` skips the field entirely.
//!
//! Options are only ever read from the primary channel. A bare option
//! (`required`) or one with an empty argument (`required=`) means `true`.
//! Empty tokens left by stray commas, as in `name,,required`, are ignored
//! rather than reported as an unknown option.

use tracing::trace;

#[cfg(test)]
mod tests;

/// Name of the primary tag channel.
pub const PRIMARY_CHANNEL: &str = "request";

/// Field name that excludes a field from binding.
pub const SKIP: &str = "-";

/// Static metadata emitted by `#[derive(Record)]` for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    ident: &'static str,
    request: &'static str,
    tags: &'static [(&'static str, &'static str)],
    flatten: bool,
}

impl FieldMeta {
    /// Metadata for an ordinary field.
    ///
    /// `request` is the primary tag string and `tags` lists the fallback
    /// channels as `(channel, tag)` pairs.
    #[must_use]
    pub const fn new(
        ident: &'static str,
        request: &'static str,
        tags: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            ident,
            request,
            tags,
            flatten: false,
        }
    }

    /// Metadata for a field whose record's fields are promoted into the
    /// parent.
    #[must_use]
    pub const fn flattened(ident: &'static str) -> Self {
        Self {
            ident,
            request: "",
            tags: &[],
            flatten: true,
        }
    }

    /// The Rust identifier of the field.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Whether this field is flattened into its parent.
    #[must_use]
    pub const fn is_flattened(&self) -> bool {
        self.flatten
    }

    /// Returns the raw tag string for `channel`.
    #[must_use]
    pub fn tag(&self, channel: &str) -> Option<&'static str> {
        if channel == PRIMARY_CHANNEL {
            return Some(self.request).filter(|tag| !tag.is_empty());
        }
        self.tags
            .iter()
            .find(|(name, _)| *name == channel)
            .map(|(_, tag)| *tag)
    }
}

/// A single option parsed from the primary tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOption {
    /// Option name, as registered with the binder.
    pub name: String,
    /// Option argument; `"true"` when the tag gives none.
    pub value: String,
}

impl TagOption {
    /// Creates an option.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A field's resolved input name and options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Rust identifier of the field.
    pub ident: &'static str,
    /// Input name used to look the field up in the body.
    pub name: String,
    /// Options in application order: tag options first, then defaults.
    pub options: Vec<TagOption>,
}

impl FieldDescriptor {
    /// Whether the field is excluded from binding.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.name == SKIP
    }

    /// Returns the argument of the named option, if present.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| option.value.as_str())
    }
}

/// Resolves field names and options against the configured channels.
#[derive(Debug, Clone, Default)]
pub struct TagResolver {
    fallbacks: Vec<String>,
    option_defaults: Vec<TagOption>,
}

impl TagResolver {
    /// Registers a fallback channel, consulted after those already added.
    ///
    /// Registering the same channel twice, or the primary channel, has no
    /// effect.
    pub fn add_fallback_tag(&mut self, channel: impl Into<String>) {
        let name = channel.into();
        if name == PRIMARY_CHANNEL || self.fallbacks.contains(&name) {
            return;
        }
        self.fallbacks.push(name);
    }

    /// Registered fallback channels, in lookup order.
    #[must_use]
    pub fn fallback_tags(&self) -> &[String] {
        &self.fallbacks
    }

    /// Sets the argument an option receives on fields whose tag omits it.
    ///
    /// Defaults apply in the order they were first set.
    pub fn set_option_default(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let option = TagOption::new(name, value);
        match self.option_defaults.iter_mut().find(|d| d.name == option.name) {
            Some(existing) => existing.value = option.value,
            None => self.option_defaults.push(option),
        }
    }

    /// Configured option defaults, in application order.
    #[must_use]
    pub fn option_defaults(&self) -> &[TagOption] {
        &self.option_defaults
    }

    /// Resolves the input name for `meta`.
    #[must_use]
    pub fn name(&self, meta: &FieldMeta) -> String {
        std::iter::once(PRIMARY_CHANNEL)
            .chain(self.fallbacks.iter().map(String::as_str))
            .filter_map(|channel| meta.tag(channel))
            .map(name_from_tag)
            .find(|name| !name.is_empty())
            .map_or_else(|| meta.ident().to_lowercase(), str::to_owned)
    }

    /// Resolves the options for `meta`, appending configured defaults for
    /// any option the tag does not mention.
    #[must_use]
    pub fn options(&self, meta: &FieldMeta) -> Vec<TagOption> {
        let mut options = meta.tag(PRIMARY_CHANNEL).map_or_else(Vec::new, parse_options);
        for default in &self.option_defaults {
            if !options.iter().any(|option| option.name == default.name) {
                options.push(default.clone());
            }
        }
        trace!(field = meta.ident(), ?options, "resolved tag options");
        options
    }

    /// Resolves both name and options for `meta`.
    #[must_use]
    pub fn describe(&self, meta: &FieldMeta) -> FieldDescriptor {
        FieldDescriptor {
            ident: meta.ident(),
            name: self.name(meta),
            options: self.options(meta),
        }
    }
}

fn name_from_tag(tag: &str) -> &str {
    tag.split_once(',').map_or(tag, |(name, _)| name)
}

fn parse_options(tag: &str) -> Vec<TagOption> {
    tag.split(',')
        .skip(1)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let (name, arg) = token.split_once('=').unwrap_or((token, ""));
            TagOption::new(name, if arg.is_empty() { "true" } else { arg })
        })
        .collect()
}

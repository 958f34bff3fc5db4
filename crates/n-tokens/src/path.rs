// SPDX-License-Identifier: MIT

//! Logical token paths and their two renderings.
//!
//! The emitter never builds key paths by string concatenation. It builds a
//! [`LogicalPath`] of typed segments and renders it twice:
//!
//! - as document keys, under the naming convention in effect
//!   (`on-primary/shade/500/15` or `on/primary/500/15`, …)
//! - as a code-syntax name (`on-primary-500/15`)
//!
//! The code-syntax rule is the one that matters most: a shade becomes a
//! dash suffix, an alpha a slash suffix. When parsing foreign key paths the
//! difference is purely positional, decided by [`classify_numeric`].

use n_scale::alpha::MAX_ALPHA;

use crate::naming::{ForegroundStyle, LEGACY_STEP, NamingConfig};

/// What a numeric key means, by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericRef {
    /// A number directly under a shade-group marker.
    Shade(String),
    /// Any other number: an opacity percentage.
    Alpha(u8),
}

/// Classify a key. Returns `None` for non-numeric keys.
///
/// A number immediately after the shade-group (or legacy step) marker is a
/// shade; every other number up to [`MAX_ALPHA`] is an alpha. Larger numbers
/// elsewhere are plain names.
#[must_use]
pub fn classify_numeric(key: &str, after_shade_marker: bool) -> Option<NumericRef> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if after_shade_marker {
        return Some(NumericRef::Shade(key.to_owned()));
    }
    key.parse::<u8>()
        .ok()
        .filter(|alpha| *alpha <= MAX_ALPHA)
        .map(NumericRef::Alpha)
}

/// One typed path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Name(String),
    /// The on-color marker; binds to the following name.
    Foreground,
    ShadeGroup,
    Shade(String),
    Alpha(u8),
    /// A node's own value when it also has children.
    Root,
}

/// How the shade level is spelled when rendering keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeShape<'a> {
    Group(&'a str),
    Flat,
}

/// A full rendering convention for document keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathShape<'a> {
    pub foreground: ForegroundStyle,
    pub shade: ShadeShape<'a>,
}

impl<'a> PathShape<'a> {
    /// The shape the configured naming produces.
    #[must_use]
    pub fn configured(naming: &'a NamingConfig) -> Self {
        Self {
            foreground: naming.foreground,
            shade: naming
                .shade_group_key()
                .map_or(ShadeShape::Flat, ShadeShape::Group),
        }
    }

    /// Every shape a prior document might use, configured shape first:
    /// both foreground styles × (shade group, legacy step, flat).
    #[must_use]
    pub fn candidates(naming: &'a NamingConfig) -> Vec<Self> {
        let configured = Self::configured(naming);
        let mut shapes = vec![configured];
        for foreground in [naming.foreground, naming.foreground.other()] {
            for shade in [
                ShadeShape::Group(naming.shade_group.as_str()),
                ShadeShape::Group(LEGACY_STEP),
                ShadeShape::Flat,
            ] {
                let shape = Self { foreground, shade };
                if !shapes.contains(&shape) {
                    shapes.push(shape);
                }
            }
        }
        shapes
    }
}

/// A path of typed segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogicalPath(pub Vec<Segment>);

impl LogicalPath {
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self(vec![Segment::Name(name.into())])
    }

    /// The on-color path paired with `name`.
    #[must_use]
    pub fn foreground(name: impl Into<String>) -> Self {
        Self(vec![Segment::Foreground, Segment::Name(name.into())])
    }

    #[must_use]
    pub fn shade(mut self, shade: impl Into<String>) -> Self {
        self.0.push(Segment::ShadeGroup);
        self.0.push(Segment::Shade(shade.into()));
        self
    }

    #[must_use]
    pub fn alpha(mut self, alpha: u8) -> Self {
        self.0.push(Segment::Alpha(alpha));
        self
    }

    #[must_use]
    pub fn root(mut self) -> Self {
        self.0.push(Segment::Root);
        self
    }

    /// The same path with every name passed through `f`.
    #[must_use]
    pub fn map_names(&self, f: impl Fn(&str) -> String) -> Self {
        Self(
            self.0
                .iter()
                .map(|seg| match seg {
                    Segment::Name(n) => Segment::Name(f(n)),
                    other => other.clone(),
                })
                .collect(),
        )
    }

    /// The same path with its shade replaced.
    #[must_use]
    pub fn with_shade(&self, shade: &str) -> Self {
        Self(
            self.0
                .iter()
                .map(|seg| match seg {
                    Segment::Shade(_) => Segment::Shade(shade.to_owned()),
                    other => other.clone(),
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn shade_name(&self) -> Option<&str> {
        self.0.iter().find_map(|seg| match seg {
            Segment::Shade(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Render document keys under the configured naming.
    #[must_use]
    pub fn keys(&self, naming: &NamingConfig) -> Vec<String> {
        self.keys_with(naming, PathShape::configured(naming))
    }

    /// Render document keys under an explicit shape.
    #[must_use]
    pub fn keys_with(&self, naming: &NamingConfig, shape: PathShape<'_>) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.0.len());
        let mut foreground = false;

        for seg in &self.0 {
            match seg {
                Segment::Foreground => match shape.foreground {
                    ForegroundStyle::Prefix => foreground = true,
                    ForegroundStyle::Nested => keys.push(naming.foreground_segment.clone()),
                },
                Segment::Name(n) if foreground => {
                    keys.push(naming.prefixed_foreground(n));
                    foreground = false;
                }
                Segment::Name(n) | Segment::Shade(n) => keys.push(n.clone()),
                Segment::ShadeGroup => {
                    if let ShadeShape::Group(g) = shape.shade {
                        keys.push(g.to_owned());
                    }
                }
                Segment::Alpha(a) => keys.push(a.to_string()),
                Segment::Root => keys.push(crate::document::ROOT_KEY.to_owned()),
            }
        }

        keys
    }

    /// Alias reference segments (keys without a trailing `$root`).
    #[must_use]
    pub fn alias_target(&self, naming: &NamingConfig) -> Vec<String> {
        let mut keys = self.keys(naming);
        if keys.last().is_some_and(|k| k == crate::document::ROOT_KEY) {
            keys.pop();
        }
        keys
    }

    /// Parse foreign document keys back into segments.
    #[must_use]
    pub fn parse<S: AsRef<str>>(keys: &[S], naming: &NamingConfig) -> Self {
        let mut segments = Vec::with_capacity(keys.len());

        for key in keys.iter().map(AsRef::as_ref) {
            let after_marker = matches!(segments.last(), Some(Segment::ShadeGroup));
            let seg = if key == crate::document::ROOT_KEY {
                Segment::Root
            } else if key == naming.foreground_segment {
                Segment::Foreground
            } else if naming.is_shade_marker(key) {
                Segment::ShadeGroup
            } else {
                match classify_numeric(key, after_marker) {
                    Some(NumericRef::Shade(s)) => Segment::Shade(s),
                    Some(NumericRef::Alpha(a)) => Segment::Alpha(a),
                    None => Segment::Name(key.to_owned()),
                }
            };
            segments.push(seg);
        }

        Self(segments)
    }

    /// Code-syntax name: names dash-joined (foreground marker replaced by
    /// the code prefix), shades as `-N`, alphas as `/N`.
    #[must_use]
    pub fn code_name(&self, naming: &NamingConfig) -> String {
        let mut out = String::new();
        let mut prefix = "";

        for seg in &self.0 {
            match seg {
                Segment::Foreground => prefix = &naming.foreground_code_prefix,
                Segment::Name(n) => {
                    if !out.is_empty() {
                        out.push('-');
                    }
                    out.push_str(prefix);
                    out.push_str(n);
                    prefix = "";
                }
                Segment::Shade(s) => {
                    out.push('-');
                    out.push_str(s);
                }
                Segment::Alpha(a) => {
                    out.push('/');
                    out.push_str(&a.to_string());
                }
                Segment::ShadeGroup | Segment::Root => {}
            }
        }

        out
    }

    /// The `WEB` code-syntax hint: `var(--name)`.
    #[must_use]
    pub fn web_code_syntax(&self, naming: &NamingConfig) -> String {
        format!("var(--{})", self.code_name(naming))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

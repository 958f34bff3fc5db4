// SPDX-License-Identifier: MIT

//! Token documents — the tree the design tool imports and exports.
//!
//! A document is a tree keyed by path segment. Every node may carry a token
//! value, children, or both; on disk a node with both writes its own value
//! under the `$root` key. Keeping the value on the node (instead of as a
//! `$root` child) makes insertion order-independent: a shade leaf can be
//! written before or after its alpha variants.
//!
//! # On-disk shape
//!
//! ```json
//! {
//!   "--blue-500": {
//!     "$type": "color",
//!     "$value": { "colorSpace": "srgb", "components": [0, 0.45, 0.83], "alpha": 1, "hex": "#0072d5" },
//!     "$extensions": { "com.figma.variableId": "VariableID:1:2", "com.figma.scopes": [] }
//!   },
//!   "$extensions": { "com.figma.modeName": "Value" }
//! }
//! ```
//!
//! Aliases are strings like `"{primary.shade.500}"`. Keys starting with `$`
//! other than `$root` are metadata and never become children.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::scope::VariableScopes;

pub const ROOT_KEY: &str = "$root";
pub const EXT_VARIABLE_ID: &str = "com.figma.variableId";
pub const EXT_SCOPES: &str = "com.figma.scopes";
pub const EXT_CODE_SYNTAX: &str = "com.figma.codeSyntax";
pub const EXT_ALIAS_DATA: &str = "com.figma.aliasData";
pub const EXT_MODE_NAME: &str = "com.figma.modeName";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root must be an object")]
    RootNotObject,

    #[error("node '{0}' must be an object")]
    NodeNotObject(String),
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Color space tag on literal color values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorSpace {
    #[default]
    #[serde(rename = "srgb")]
    Srgb,
    #[serde(rename = "display-p3")]
    DisplayP3,
}

/// A literal color value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorValue {
    pub color_space: ColorSpace,
    pub components: [f64; 3],
    pub alpha: f64,
    /// Always the clamped sRGB hex, even for P3 components.
    #[serde(default)]
    pub hex: String,
}

/// The `$type` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenType {
    Color,
    String,
    Other(String),
}

impl TokenType {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "color" => Self::Color,
            "string" => Self::String,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Color => "color",
            Self::String => "string",
            Self::Other(tag) => tag,
        }
    }
}

/// The `$value` of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Color(ColorValue),
    /// Dot-joined target path, without braces.
    Alias(String),
    Text(String),
    /// Anything this tool doesn't model, kept verbatim.
    Raw(Value),
}

impl TokenValue {
    /// Build an alias value from path segments.
    #[must_use]
    pub fn alias<S: AsRef<str>>(path: &[S]) -> Self {
        Self::Alias(
            path.iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join("."),
        )
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => s
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
                .map_or_else(|| Self::Text(s.clone()), |target| Self::Alias(target.to_owned())),
            Value::Object(_) => serde_json::from_value(value.clone())
                .map_or_else(|_| Self::Raw(value.clone()), Self::Color),
            other => Self::Raw(other.clone()),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Color(color) => json!({
                "colorSpace": color.color_space,
                "components": color.components,
                "alpha": color.alpha,
                "hex": color.hex,
            }),
            Self::Alias(target) => Value::String(format!("{{{target}}}")),
            Self::Text(text) => Value::String(text.clone()),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Extensions
// ---------------------------------------------------------------------------

/// Alias target in another variable collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasData {
    pub target_variable_set_name: String,
    pub target_variable_name: String,
}

/// The extension bag of a token.
///
/// Known keys are typed; everything else round-trips through `other`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenExtensions {
    /// Opaque identifier assigned by the design tool.
    pub variable_id: Option<String>,
    pub scopes: Option<VariableScopes>,
    /// The `WEB` code-syntax hint.
    pub code_syntax: Option<String>,
    pub alias_data: Option<AliasData>,
    pub other: Map<String, Value>,
}

impl TokenExtensions {
    fn from_json(map: &Map<String, Value>) -> Self {
        let mut ext = Self::default();
        for (key, value) in map {
            match key.as_str() {
                EXT_VARIABLE_ID if value.is_string() => {
                    ext.variable_id = value.as_str().map(str::to_owned);
                }
                EXT_SCOPES if value.is_array() => {
                    let names = value.as_array().into_iter().flatten().filter_map(Value::as_str);
                    ext.scopes = Some(VariableScopes::from_names(names));
                }
                EXT_CODE_SYNTAX => {
                    ext.code_syntax = value.get("WEB").and_then(Value::as_str).map(str::to_owned);
                }
                EXT_ALIAS_DATA => {
                    ext.alias_data = serde_json::from_value(value.clone()).ok();
                }
                _ => {
                    ext.other.insert(key.clone(), value.clone());
                }
            }
        }
        ext
    }

    fn to_json(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(id) = &self.variable_id {
            map.insert(EXT_VARIABLE_ID.into(), Value::String(id.clone()));
        }
        if let Some(scopes) = self.scopes {
            map.insert(EXT_SCOPES.into(), json!(scopes.names()));
        }
        if let Some(code) = &self.code_syntax {
            map.insert(EXT_CODE_SYNTAX.into(), json!({ "WEB": code }));
        }
        if let Some(alias) = &self.alias_data {
            map.insert(EXT_ALIAS_DATA.into(), json!(alias));
        }
        map.extend(self.other.iter().map(|(k, v)| (k.clone(), v.clone())));
        map
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// One leaf value.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenType,
    pub value: TokenValue,
    pub extensions: TokenExtensions,
}

impl Token {
    #[must_use]
    pub fn color(value: ColorValue) -> Self {
        Self {
            kind: TokenType::Color,
            value: TokenValue::Color(value),
            extensions: TokenExtensions::default(),
        }
    }

    /// A color-typed alias to the token at `path`.
    #[must_use]
    pub fn alias<S: AsRef<str>>(path: &[S]) -> Self {
        Self {
            kind: TokenType::Color,
            value: TokenValue::alias(path),
            extensions: TokenExtensions::default(),
        }
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: TokenType::String,
            value: TokenValue::Text(value.into()),
            extensions: TokenExtensions::default(),
        }
    }

    #[must_use]
    pub fn variable_id(&self) -> Option<&str> {
        self.extensions.variable_id.as_deref()
    }

    fn from_json(obj: &Map<String, Value>, inherited_type: Option<&str>) -> Self {
        let tag = obj
            .get("$type")
            .and_then(Value::as_str)
            .or(inherited_type)
            .unwrap_or("color");
        let value = obj.get("$value").map_or(TokenValue::Raw(Value::Null), TokenValue::from_json);
        let extensions = obj
            .get("$extensions")
            .and_then(Value::as_object)
            .map(TokenExtensions::from_json)
            .unwrap_or_default();

        Self {
            kind: TokenType::from_tag(tag),
            value,
            extensions,
        }
    }

    fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("$type".into(), Value::String(self.kind.as_str().to_owned()));
        obj.insert("$value".into(), self.value.to_json());
        let ext = self.extensions.to_json();
        if !ext.is_empty() {
            obj.insert("$extensions".into(), Value::Object(ext));
        }
        Value::Object(obj)
    }
}

// ---------------------------------------------------------------------------
// TokenNode
// ---------------------------------------------------------------------------

/// A tree node: its own value (written as `$root` when it also has
/// children), its named children in insertion order, and any `$`-prefixed
/// group metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenNode {
    pub token: Option<Token>,
    pub children: IndexMap<String, TokenNode>,
    pub metadata: Map<String, Value>,
}

impl TokenNode {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn child(&self, key: &str) -> Option<&Self> {
        self.children.get(key)
    }

    /// Insert-or-get the child at `key`.
    pub fn child_mut(&mut self, key: &str) -> &mut Self {
        self.children.entry(key.to_owned()).or_default()
    }

    fn from_json(
        path: &str,
        obj: &Map<String, Value>,
        inherited_type: Option<&str>,
    ) -> Result<Self, DocumentError> {
        if obj.contains_key("$value") {
            return Ok(Self {
                token: Some(Token::from_json(obj, inherited_type)),
                ..Self::default()
            });
        }

        let group_type = obj.get("$type").and_then(Value::as_str).or(inherited_type);
        let mut node = Self::default();

        for (key, value) in obj {
            let child_path = if path.is_empty() { key.clone() } else { format!("{path}/{key}") };
            if key == ROOT_KEY {
                let leaf = value
                    .as_object()
                    .ok_or_else(|| DocumentError::NodeNotObject(child_path.clone()))?;
                node.token = Some(Token::from_json(leaf, group_type));
            } else if key.starts_with('$') {
                node.metadata.insert(key.clone(), value.clone());
            } else {
                let child = value
                    .as_object()
                    .ok_or_else(|| DocumentError::NodeNotObject(child_path.clone()))?;
                node.children
                    .insert(key.clone(), Self::from_json(&child_path, child, group_type)?);
            }
        }

        Ok(node)
    }

    fn to_json(&self) -> Value {
        if self.children.is_empty() {
            if let Some(token) = &self.token {
                return token.to_json();
            }
        }

        let mut obj = Map::new();
        if let Some(token) = &self.token {
            obj.insert(ROOT_KEY.into(), token.to_json());
        }
        for (key, child) in &self.children {
            obj.insert(key.clone(), child.to_json());
        }
        obj.extend(self.metadata.iter().map(|(k, v)| (k.clone(), v.clone())));
        Value::Object(obj)
    }

    fn collect_tokens<'a>(&'a self, prefix: &mut Vec<String>, out: &mut Vec<(Vec<String>, &'a Token)>) {
        if let Some(token) = &self.token {
            out.push((prefix.clone(), token));
        }
        for (key, child) in &self.children {
            prefix.push(key.clone());
            child.collect_tokens(prefix, out);
            prefix.pop();
        }
    }
}

// ---------------------------------------------------------------------------
// TokenDocument
// ---------------------------------------------------------------------------

/// A whole exported (or to-be-exported) document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenDocument {
    pub root: TokenNode,
}

impl TokenDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse document text.
    ///
    /// # Errors
    ///
    /// Fails on invalid JSON, a non-object root, or a non-object node.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Build from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Fails on a non-object root or a non-object node.
    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        let obj = value.as_object().ok_or(DocumentError::RootNotObject)?;
        Ok(Self {
            root: TokenNode::from_json("", obj, None)?,
        })
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        self.root.to_json()
    }

    /// The document-level mode marker.
    #[must_use]
    pub fn mode_name(&self) -> Option<&str> {
        self.root
            .metadata
            .get("$extensions")?
            .get(EXT_MODE_NAME)?
            .as_str()
    }

    pub fn set_mode_name(&mut self, name: &str) {
        let ext = self
            .root
            .metadata
            .entry("$extensions")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = ext {
            map.insert(EXT_MODE_NAME.into(), Value::String(name.to_owned()));
        }
    }

    /// Insert a token at `path`, creating intermediate nodes as needed.
    ///
    /// A trailing `$root` segment addresses the parent node's own value.
    /// Inserting twice at the same path replaces the earlier token.
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], token: Token) {
        let mut node = &mut self.root;
        for segment in path.iter().map(AsRef::as_ref).filter(|s| *s != ROOT_KEY) {
            node = node.child_mut(segment);
        }
        node.token = Some(token);
    }

    /// The node at `path`, if every segment exists.
    #[must_use]
    pub fn node<S: AsRef<str>>(&self, path: &[S]) -> Option<&TokenNode> {
        path.iter()
            .map(AsRef::as_ref)
            .filter(|s| *s != ROOT_KEY)
            .try_fold(&self.root, |node, segment| node.child(segment))
    }

    /// The token at `path`. A path ending at a group resolves to the
    /// group's `$root` value.
    #[must_use]
    pub fn token<S: AsRef<str>>(&self, path: &[S]) -> Option<&Token> {
        self.node(path)?.token.as_ref()
    }

    /// The carried identifier at `path`, if any.
    #[must_use]
    pub fn variable_id<S: AsRef<str>>(&self, path: &[S]) -> Option<&str> {
        self.token(path)?.variable_id()
    }

    /// Every token with its path, depth first in insertion order.
    #[must_use]
    pub fn tokens(&self) -> Vec<(Vec<String>, &Token)> {
        let mut out = Vec::new();
        self.root.collect_tokens(&mut Vec::new(), &mut out);
        out
    }
}

impl fmt::Display for TokenDocument {
    /// Pretty-printed JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(&self.to_value()).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for TokenDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TokenDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

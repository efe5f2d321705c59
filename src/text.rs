//! Display text that is either a literal or a reference to a localized
//! resource.
//!
//! Resolution is deferred to presentation time through a [`TextResolver`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an externally provided resource (localized string, color).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKey(pub String);

impl ResourceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A text value. Only one form is active at a time; assigning a new value
/// replaces the previous one regardless of its form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringValue {
    /// Text used as-is.
    Literal(String),
    /// Text looked up by the resolver.
    Resource(ResourceKey),
}

impl StringValue {
    /// Returns the display string, or None when a resource is unknown to
    /// the resolver.
    pub fn resolve(&self, resolver: &dyn TextResolver) -> Option<String> {
        match self {
            StringValue::Literal(text) => Some(text.clone()),
            StringValue::Resource(key) => resolver.resolve(key),
        }
    }
}

impl From<&str> for StringValue {
    fn from(text: &str) -> Self {
        StringValue::Literal(text.to_string())
    }
}

impl From<String> for StringValue {
    fn from(text: String) -> Self {
        StringValue::Literal(text)
    }
}

impl From<ResourceKey> for StringValue {
    fn from(key: ResourceKey) -> Self {
        StringValue::Resource(key)
    }
}

/// Turns resource keys into display strings.
pub trait TextResolver {
    fn resolve(&self, key: &ResourceKey) -> Option<String>;
}

/// Map-backed resources: localized strings and hex colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceTable {
    #[serde(default)]
    pub strings: HashMap<String, String>,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl ResourceTable {
    /// Returns the raw color value (e.g. `#38bdf8`) registered under `key`.
    pub fn color(&self, key: &ResourceKey) -> Option<&str> {
        self.colors.get(key.as_str()).map(String::as_str)
    }
}

impl TextResolver for ResourceTable {
    fn resolve(&self, key: &ResourceKey) -> Option<String> {
        self.strings.get(key.as_str()).cloned()
    }
}

//! Tolerant lookups through untyped JSON trees
//!
//! Capture payloads are application-defined, so nothing here assumes a schema.
//! Every accessor returns `None` on a missing key, a non-object hop, or a value
//! of the wrong kind.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Absent-on-miss path accessors for [`serde_json::Value`]
pub trait ValueExt {
    /// Walk `path` through nested objects
    fn at(&self, path: &[&str]) -> Option<&Value>;

    /// String at `path`
    fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.at(path).and_then(Value::as_str)
    }

    /// Object at `path`
    fn object_at(&self, path: &[&str]) -> Option<&Map<String, Value>> {
        self.at(path).and_then(Value::as_object)
    }

    /// Array at `path`
    fn array_at(&self, path: &[&str]) -> Option<&Vec<Value>> {
        self.at(path).and_then(Value::as_array)
    }

    /// Scalar at `path` rendered as display text
    fn text_at(&self, path: &[&str]) -> Option<Cow<'_, str>> {
        self.at(path).and_then(scalar_text)
    }
}

impl ValueExt for Value {
    fn at(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |node, key| node.as_object()?.get(*key))
    }
}

/// Display text for scalars; `null`, objects and arrays have none
pub fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Treat empty strings the same as missing values
pub fn non_empty<'a>(text: Option<Cow<'a, str>>) -> Option<Cow<'a, str>> {
    text.filter(|t| !t.is_empty())
}

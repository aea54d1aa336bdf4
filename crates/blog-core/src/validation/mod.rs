//! Validation layer - per-operation rule sets evaluated before persistence.
//!
//! Submissions arrive as a [`Payload`], a field map that keeps "not
//! submitted" and "submitted as null" apart. Every rule runs and all failures
//! are collected into [`ValidationErrors`], keyed by field name.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod category;
mod post;
mod rules;

pub use category::validate_category;
pub use post::{is_valid_post_slug, validate_post};
pub(crate) use rules::taken as taken_message;

/// Maximum length of titles and slugs, in characters.
pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_SLUG_LEN: usize = 255;
pub const MAX_EXCERPT_LEN: usize = 500;

/// A submitted set of fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

/// A single field as seen by a rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Absent,
    Null,
    Present(&'a Value),
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON value; `None` unless it is an object.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Build from url-encoded form pairs. Empty strings are treated as null.
    pub fn from_form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| {
                let v: String = v.into();
                let value = if v.is_empty() {
                    Value::Null
                } else {
                    Value::String(v)
                };
                (k.into(), value)
            })
            .collect();
        Self(map)
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Field<'_> {
        match self.0.get(name) {
            None => Field::Absent,
            Some(Value::Null) => Field::Null,
            Some(value) => Field::Present(value),
        }
    }

    /// Raw string form of a field, for re-populating forms.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Field-keyed validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// A single-field error set.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, messages) in self.iter() {
            for message in messages {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(message)?;
                first = false;
            }
        }
        Ok(())
    }
}

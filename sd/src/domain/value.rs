//! Variable values and the flat dictionary handed to the renderer

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A single bound value: text, number or boolean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl VariableValue {
    /// Convert a top-level JSON value, skipping anything that is not a scalar
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// A numeric record field as it arrived.
///
/// Clerks sometimes type units or words into numeric inputs (`"250 m2"`,
/// `"dua"`). Those stay text and are printed as typed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Numbers go through `format`; text is returned unchanged
    pub fn display_with(&self, format: impl FnOnce(f64) -> String) -> String {
        match self {
            Self::Number(n) => format(*n),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) if !n.is_finite() => Ok(()),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for VariableValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for VariableValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Flat mapping of dot-namespaced keys to values.
///
/// Built fresh for every render and never persisted. Keys iterate in sorted
/// order so output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VariableDictionary(BTreeMap<String, VariableValue>);

impl VariableDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<VariableValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert optional text; a missing value becomes an empty string
    pub fn insert_text(&mut self, key: impl Into<String>, value: Option<&str>) {
        self.insert(key, value.unwrap_or_default());
    }

    /// Merge another dictionary in; its keys win on collision
    pub fn merge(&mut self, other: VariableDictionary) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&VariableValue> {
        self.0.get(key)
    }

    /// Display string for a key, if bound
    pub fn display(&self, key: &str) -> Option<String> {
        self.0.get(key).map(|v| v.to_string())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariableValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys under a namespace prefix, e.g. `saksi1`
    pub fn namespace<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.keys().filter(move |key| {
            key.strip_prefix(prefix)
                .map(|rest| rest.starts_with('.'))
                .unwrap_or(false)
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<VariableValue>> FromIterator<(K, V)> for VariableDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for VariableDictionary {
    type Item = (String, VariableValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, VariableValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

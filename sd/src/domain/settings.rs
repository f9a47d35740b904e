//! Settings snapshot supplied by the settings store

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::DocumentError;

/// Flat key-value view of the office settings (village identity, signing officer)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SettingsSnapshot(BTreeMap<String, String>);

impl SettingsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value for a key; blank values count as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Load a snapshot from a YAML file of `key: value` pairs
    pub fn load_yaml(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: Self = serde_yaml::from_str(&content)?;
        tracing::debug!(path = %path.display(), keys = snapshot.len(), "SettingsSnapshot::load_yaml: loaded");
        Ok(snapshot)
    }
}

impl<'de> Deserialize<'de> for SettingsSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
        let mut map = BTreeMap::new();
        for (key, value) in raw {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(D::Error::custom(format!("setting '{}' must be a scalar", key)));
                }
            };
            map.insert(key, text);
        }
        Ok(Self(map))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SettingsSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_count_as_absent() {
        let settings: SettingsSnapshot = [("namaDesa", "  "), ("kecamatan", "Cibiru")].into_iter().collect();
        assert_eq!(settings.get("namaDesa"), None);
        assert_eq!(settings.get("kecamatan"), Some("Cibiru"));
        assert_eq!(settings.get("provinsi"), None);
    }

    #[test]
    fn test_yaml_scalars_become_text() {
        let settings: SettingsSnapshot = serde_yaml::from_str("namaDesa: Sukamaju\nnipKepala: 196801011990031002\naktif: true\nkosong: ~\n").unwrap();
        assert_eq!(settings.get("nipKepala"), Some("196801011990031002"));
        assert_eq!(settings.get("aktif"), Some("true"));
        assert_eq!(settings.get("kosong"), None);
    }

    #[test]
    fn test_yaml_nested_rejected() {
        let err = serde_yaml::from_str::<SettingsSnapshot>("alamat:\n  jalan: Melati\n").unwrap_err();
        assert!(err.to_string().contains("must be a scalar"));
    }
}

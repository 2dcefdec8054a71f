// File: crates/grapher-core/src/yaml.rs
// Summary: Loosely-typed YAML access: load a top-level mapping, dot-path lookups, save.

use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::{GrapherError, Result};

/// A parsed YAML document whose top level is a mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct YamlDocument {
    root: Mapping,
}

impl YamlDocument {
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GrapherError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| GrapherError::io(path, e))?;
        Self::parse(&text, &format!("file {}", path.display()))
    }

    pub fn load_str(text: &str) -> Result<Self> {
        Self::parse(text, "string")
    }

    fn parse(text: &str, origin: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)
            .map_err(|source| GrapherError::Yaml { origin: origin.to_string(), source })?;
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            _ => Err(GrapherError::NotAMapping(origin.to_string())),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.root)
    }

    /// Look up a dot-separated key path such as `graph.x_axis.label`.
    pub fn get(&self, key_path: &str) -> Option<&Value> {
        let mut keys = key_path.split('.');
        let mut current = self.root.get(keys.next()?)?;
        for key in keys {
            current = current.as_mapping()?.get(key)?;
        }
        Some(current)
    }

    /// True when every key path resolves to a non-null value.
    pub fn validate_schema(&self, required_keys: &[&str]) -> bool {
        required_keys
            .iter()
            .all(|k| self.get(k).is_some_and(|v| !v.is_null()))
    }
}

/// Serialize `value` as YAML into `path`, creating parent directories.
pub fn save_file<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text = serde_yaml::to_string(value).map_err(|source| GrapherError::Yaml {
        origin: format!("file {}", path.display()),
        source,
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GrapherError::io(parent, e))?;
    }
    std::fs::write(path, text).map_err(|e| GrapherError::io(path, e))
}

//! Component configuration
//!
//! A component's configuration is an opaque key-value table. The library only
//! looks at two keys (`debug` on every component, `id` on models); everything
//! else is for the owning application. Any serde format that produces a table
//! can be loaded into it.

use crate::types::{ComponentError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the debug tracing flag
pub const DEBUG_KEY: &str = "debug";

/// Key holding a model's identifier
pub const ID_KEY: &str = "id";

/// Configuration table passed to `init`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    values: Map<String, Value>,
}

impl Config {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from any JSON value; it must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            Value::Null => Ok(Self::new()),
            other => Err(ComponentError::InvalidConfig(other.to_string())),
        }
    }

    /// Builder method: set a key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Builder method: set the debug flag
    pub fn with_debug(self, enabled: bool) -> Self {
        self.with(DEBUG_KEY, enabled)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a key, treating an explicit `null` the same as a missing key
    pub fn get_set(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|value| !value.is_null())
    }

    /// Deserialize a key into a typed value
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_set(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| ComponentError::InvalidConfigValue {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Convert to a JSON object value
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

impl From<Map<String, Value>> for Config {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, Value)> for Config {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

//! Tree Configuration
//!
//! Defines the configuration used by `DecisionTree`, and the helpers to read
//! and write it as json.
use crate::errors::CartError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_column_names() -> Option<Vec<String>> {
    None
}
fn default_parallel() -> bool {
    false
}
fn default_verbose() -> bool {
    false
}

/// Configuration for the `DecisionTree`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Names of the dataset columns, label included. Used when rendering questions.
    #[serde(default = "default_column_names")]
    pub column_names: Option<Vec<String>>,
    /// Search the feature columns of each node in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Log a summary after fitting.
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            column_names: None,
            parallel: false,
            verbose: false,
        }
    }
}

impl TreeConfig {
    /// Check the configured column names against the arity of a dataset.
    pub fn validate(&self, arity: usize) -> Result<(), CartError> {
        match &self.column_names {
            Some(names) if names.len() != arity => Err(CartError::HeaderMismatch {
                expected: arity,
                found: names.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// IO
pub trait ConfigIO: Serialize + DeserializeOwned + Sized {
    /// Dump the configuration as a json object.
    fn json_dump(&self) -> Result<String, CartError> {
        serde_json::to_string(self).map_err(|e| CartError::UnableToWrite(e.to_string()))
    }

    /// Load the configuration from a json string.
    ///
    /// * `json_str` - String object, which can be deserialized from json.
    fn from_json(json_str: &str) -> Result<Self, CartError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| CartError::UnableToRead(e.to_string()))
    }

    /// Load the configuration from a path to a json file.
    ///
    /// * `path` - Path to load the configuration from.
    fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, CartError> {
        let json_str = fs::read_to_string(path).map_err(|e| CartError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ConfigIO for TreeConfig {}

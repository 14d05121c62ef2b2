//! Declarative format descriptions loaded from YAML or JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use streamcheck_core::Policy;
use thiserror::Error;

/// Errors that can occur when loading a format description.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Failed to read format file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported format file extension: {0}")]
    UnsupportedExtension(String),

    #[error("Repeat count refers to unbound variable: {0}")]
    UnboundVariable(String),

    #[error("Invalid format: {0}")]
    Invalid(String),
}

/// How many times a `repeat` item runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Count {
    /// A fixed number of repetitions
    Fixed(u64),

    /// The value of an integer bound earlier with `bind`
    Variable(String),
}

/// One step of a format description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Space,

    Newline,

    /// Any token
    Token {
        #[serde(default)]
        label: Option<String>,
    },

    /// A token with a bounded byte length
    String { min_len: usize, max_len: usize },

    /// A fixed token, compared according to the case policy
    Literal { value: String },

    /// A 64-bit integer, optionally bounded and optionally bound to a name
    Integer {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
        #[serde(default)]
        bind: Option<String>,
    },

    Repeat { count: Count, items: Vec<Item> },

    /// Items that only run when the next character is `when`
    Optional { when: String, items: Vec<Item> },
}

/// A complete format description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Format {
    /// Human-readable name
    #[serde(default)]
    pub name: Option<String>,

    /// Policy switches the format always wants on
    #[serde(default)]
    pub policy: Policy,

    pub items: Vec<Item>,
}

impl Format {
    /// Parse a format from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, FormatError> {
        let format: Format = serde_yaml::from_str(yaml)?;
        format.validate()?;
        Ok(format)
    }

    /// Parse a format from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let format: Format = serde_json::from_str(json)?;
        format.validate()?;
        Ok(format)
    }

    /// Load a format file, picking the parser from the extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&fs::read_to_string(path)?),
            "json" => Self::from_json(&fs::read_to_string(path)?),
            other => Err(FormatError::UnsupportedExtension(other.to_string())),
        }
    }

    /// Check bounds and variable references.
    fn validate(&self) -> Result<(), FormatError> {
        let mut bound = HashSet::new();
        validate_items(&self.items, &mut bound)
    }
}

fn validate_items<'a>(items: &'a [Item], bound: &mut HashSet<&'a str>) -> Result<(), FormatError> {
    for item in items {
        match item {
            Item::String { min_len, max_len } if min_len > max_len => {
                return Err(FormatError::Invalid(format!(
                    "string min_len {} exceeds max_len {}",
                    min_len, max_len
                )));
            }
            Item::Integer { min, max, bind } => {
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(FormatError::Invalid(format!(
                            "integer min {} exceeds max {}",
                            min, max
                        )));
                    }
                }
                if let Some(name) = bind {
                    bound.insert(name.as_str());
                }
            }
            Item::Repeat { count, items } => {
                if let Count::Variable(name) = count {
                    if !bound.contains(name.as_str()) {
                        return Err(FormatError::UnboundVariable(name.clone()));
                    }
                }
                if items.is_empty() {
                    return Err(FormatError::Invalid("repeat needs at least one item".to_string()));
                }
                // The body may run zero times, so its bindings stay local to it.
                validate_items(items, &mut bound.clone())?;
            }
            Item::Optional { when, items } => {
                if when.len() != 1 || !when.is_ascii() {
                    return Err(FormatError::Invalid(format!(
                        "optional `when` must be a single ASCII character, got {:?}",
                        when
                    )));
                }
                // Bindings made only when the branch runs stay local to it.
                validate_items(items, &mut bound.clone())?;
            }
            _ => {}
        }
    }
    Ok(())
}

//! JSON export and import of transition models
//!
//! Keys are written in their `.`-joined id form, outcomes by category name.
//! `BTreeMap`s keep the output stable across runs.

use crate::algorithm::key::PatternKey;
use crate::algorithm::learner::{Distribution, TransitionModel};
use crate::io::error::{Result, SynthesisError, model_error};
use crate::spatial::category::CategoryInfo;
use crate::spatial::{CategorySet, NeighborhoodWindow, WindowMode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Serialized window configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDocument {
    /// Window side length
    pub size: usize,
    /// `"full"` or `"causal"`
    pub mode: String,
}

/// Serialized category entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDocument {
    /// Category name
    pub name: String,
    /// RGBA color
    pub color: [u8; 4],
}

/// Serialized transition model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Window the model was learned with
    pub window: WindowDocument,
    /// Palette, in id order
    pub categories: Vec<CategoryDocument>,
    /// Encoded key to outcome name to probability
    pub rules: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ModelDocument {
    /// Describe a model in serializable form
    pub fn from_model(model: &TransitionModel) -> Self {
        let categories = model.categories();
        let rules = model
            .rules()
            .map(|(key, distribution)| {
                let outcomes = distribution
                    .outcomes()
                    .iter()
                    .map(|&(category, p)| (categories.name(category).to_string(), p))
                    .collect();
                (key.encode(), outcomes)
            })
            .collect();

        Self {
            window: WindowDocument {
                size: model.window().size(),
                mode: model.window().mode().as_str().to_string(),
            },
            categories: categories
                .entries()
                .iter()
                .map(|info| CategoryDocument {
                    name: info.name.clone(),
                    color: info.color,
                })
                .collect(),
            rules,
        }
    }

    /// Rebuild the model, validating every key and distribution
    ///
    /// # Errors
    ///
    /// Returns an error if the window or palette is invalid, a key does not
    /// match the window or repeats another key, an outcome names an unknown
    /// category, or a distribution violates the probability invariants
    pub fn into_model(self) -> Result<TransitionModel> {
        let mode = WindowMode::parse(&self.window.mode)
            .ok_or_else(|| model_error(&format!("unknown window mode '{}'", self.window.mode)))?;
        let window = NeighborhoodWindow::new(self.window.size, mode)?;
        let categories = CategorySet::new(
            self.categories
                .into_iter()
                .map(|doc| CategoryInfo {
                    name: doc.name,
                    color: doc.color,
                })
                .collect(),
        )?;

        let empty = TransitionModel::empty(window.clone(), categories.clone());
        let keys = empty.key_builder();

        let mut rules: HashMap<PatternKey, Distribution> = HashMap::new();
        for (encoded, outcomes) in self.rules {
            let key = keys
                .decode(&encoded)
                .ok_or_else(|| model_error(&format!("key '{encoded}' does not fit the window")))?;
            let outcomes = outcomes
                .into_iter()
                .map(|(name, p)| {
                    categories
                        .by_name(&name)
                        .map(|category| (category, p))
                        .ok_or_else(|| model_error(&format!("unknown category '{name}'")))
                })
                .collect::<Result<Vec<_>>>()?;
            let distribution = Distribution::new(outcomes)?;
            if distribution.outcomes().is_empty() {
                return Err(model_error(&format!("key '{encoded}' has no outcomes")));
            }
            // Differently written ids such as "01" and "1" decode to the same key
            if rules.insert(key, distribution).is_some() {
                return Err(model_error(&format!(
                    "key '{encoded}' repeats an earlier key"
                )));
            }
        }

        Ok(TransitionModel::from_rules(window, categories, rules))
    }
}

/// Serialize a model to pretty-printed JSON
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn model_to_json(model: &TransitionModel) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ModelDocument::from_model(model))?)
}

/// Parse a model from JSON
///
/// # Errors
///
/// Returns an error if the JSON is malformed or describes an invalid model
pub fn model_from_json(json: &str) -> Result<TransitionModel> {
    serde_json::from_str::<ModelDocument>(json)?.into_model()
}

/// Write a model as JSON to `path`
///
/// # Errors
///
/// Returns an error if serialization or the file write fails
pub fn save_model(model: &TransitionModel, path: &Path) -> Result<()> {
    let json = model_to_json(model)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    std::fs::write(path, json).map_err(|e| SynthesisError::FileSystem {
        path: path.to_path_buf(),
        operation: "write model",
        source: e,
    })
}

/// Read a JSON model from `path`
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds an invalid model
pub fn load_model(path: &Path) -> Result<TransitionModel> {
    let json = std::fs::read_to_string(path).map_err(|e| SynthesisError::FileSystem {
        path: path.to_path_buf(),
        operation: "read model",
        source: e,
    })?;
    model_from_json(&json)
}

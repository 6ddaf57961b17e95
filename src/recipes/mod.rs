//! Recipe collection with favorites and recommendations.
//!
//! All state lives in a [`RecipeStore`] value that callers own and pass
//! around. Mutations consume the current snapshot and return the next one;
//! the visible list is always recomputed with [`filter`] instead of being
//! stored next to the recipes.

mod store;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use store::{filter, RecipeStore};

pub type RecipeId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
}

impl Recipe {
    pub fn new(id: RecipeId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            ingredients: Vec::new(),
            instructions: String::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid recipe file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Reads a JSON array of recipes.
pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>, RecipeError> {
    let raw = fs::read_to_string(path).map_err(|source| RecipeError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| RecipeError::Parse {
        path: path.display().to_string(),
        source,
    })
}

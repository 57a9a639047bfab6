//! Code repository types

use serde::{Deserialize, Serialize};

/// A code repository implementing a paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository URL
    pub url: String,

    /// Whether this is the authors' own implementation
    #[serde(default)]
    pub is_official: bool,

    /// Repository description
    #[serde(default)]
    pub description: String,

    /// Number of stars
    #[serde(default)]
    pub stars: u64,

    /// Implementation framework (PyTorch, TensorFlow, JAX, ...)
    #[serde(default)]
    pub framework: String,
}

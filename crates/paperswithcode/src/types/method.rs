//! Method types

use paperswithcode_core::resource::{Identified, LazyResource};
use serde::{Deserialize, Serialize};

use super::Paper;

/// A machine learning method, e.g. "Dropout".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Method ID
    pub id: String,

    /// Short name
    pub name: String,

    /// Full name
    #[serde(default)]
    pub full_name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Paper that introduced the method. Usually a bare ID until loaded.
    #[serde(default)]
    pub paper: Option<LazyResource<Paper>>,
}

impl Identified for Method {
    fn id(&self) -> &str {
        &self.id
    }
}

//! Author types

use paperswithcode_core::resource::Identified;
use serde::{Deserialize, Serialize};

/// A paper author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Author ID
    pub id: String,

    /// Full name
    #[serde(default)]
    pub full_name: String,
}

impl Identified for Author {
    fn id(&self) -> &str {
        &self.id
    }
}

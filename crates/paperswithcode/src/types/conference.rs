//! Conference and proceeding types

use paperswithcode_core::resource::Identified;
use serde::{Deserialize, Serialize};

/// A conference series, e.g. NeurIPS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conference {
    /// Conference ID
    pub id: String,

    /// Conference name
    pub name: String,
}

impl Identified for Conference {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One edition of a conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proceeding {
    /// Proceeding ID
    pub id: String,

    /// Year the proceeding was held
    #[serde(default)]
    pub year: Option<u16>,

    /// Month the proceeding was held (1-12)
    #[serde(default)]
    pub month: Option<u8>,
}

impl Identified for Proceeding {
    fn id(&self) -> &str {
        &self.id
    }
}

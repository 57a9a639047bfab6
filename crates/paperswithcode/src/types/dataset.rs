//! Dataset types

use crate::error::Result;
use crate::validation::{validate_optional, validate_required, validate_url};
use derive_builder::Builder;
use paperswithcode_core::resource::Identified;
use serde::{Deserialize, Serialize};

/// A dataset, e.g. "ImageNet".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset ID
    pub id: String,

    /// Short name
    pub name: String,

    /// Full name
    #[serde(default)]
    pub full_name: Option<String>,

    /// Download or landing page URL
    #[serde(default)]
    pub url: Option<String>,
}

impl Identified for Dataset {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Request body for creating a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct DatasetCreateRequest {
    /// Short name
    pub name: String,

    /// Full name
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub full_name: Option<String>,

    /// Download or landing page URL
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub url: Option<String>,
}

impl DatasetCreateRequest {
    /// Create a builder for constructing a DatasetCreateRequest.
    pub fn builder() -> DatasetCreateRequestBuilder {
        DatasetCreateRequestBuilder::default()
    }
}

impl DatasetCreateRequestBuilder {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_required("name", name)?;
        }
        validate_optional("full_name", self.full_name.as_ref().and_then(|v| v.as_deref()))?;
        validate_url("url", self.url.as_ref().and_then(|v| v.as_deref()))
    }
}

/// Request body for a partial dataset update. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    default,
    setter(into, strip_option),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct DatasetUpdateRequest {
    /// Short name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Download or landing page URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl DatasetUpdateRequest {
    /// Create a builder for constructing a DatasetUpdateRequest.
    pub fn builder() -> DatasetUpdateRequestBuilder {
        DatasetUpdateRequestBuilder::default()
    }
}

impl DatasetUpdateRequestBuilder {
    fn validate(&self) -> Result<()> {
        validate_optional("name", self.name.as_ref().and_then(|v| v.as_deref()))?;
        validate_optional("full_name", self.full_name.as_ref().and_then(|v| v.as_deref()))?;
        validate_url("url", self.url.as_ref().and_then(|v| v.as_deref()))
    }
}

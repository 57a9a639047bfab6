//! Research area and task types

use crate::error::Result;
use crate::validation::{validate_id, validate_optional, validate_required};
use derive_builder::Builder;
use paperswithcode_core::resource::Identified;
use serde::{Deserialize, Serialize};

/// A research area, e.g. "Computer Vision".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Area ID
    pub id: String,

    /// Area name
    pub name: String,
}

impl Identified for Area {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A task, e.g. "Image Classification".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task ID
    pub id: String,

    /// Task name
    pub name: String,

    /// Task description
    #[serde(default)]
    pub description: String,
}

impl Identified for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Request body for creating a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct TaskCreateRequest {
    /// Task name
    pub name: String,

    /// Task description
    #[builder(default)]
    pub description: String,

    /// Area the task belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub area: Option<String>,

    /// Parent task ID
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub parent_task: Option<String>,
}

impl TaskCreateRequest {
    /// Create a builder for constructing a TaskCreateRequest.
    pub fn builder() -> TaskCreateRequestBuilder {
        TaskCreateRequestBuilder::default()
    }
}

impl TaskCreateRequestBuilder {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_required("name", name)?;
        }
        if let Some(Some(area)) = &self.area {
            validate_id("area", area)?;
        }
        if let Some(Some(parent)) = &self.parent_task {
            validate_id("parent_task", parent)?;
        }
        Ok(())
    }
}

/// Request body for a partial task update. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    default,
    setter(into, strip_option),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct TaskUpdateRequest {
    /// Task name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Task description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Area the task belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    /// Parent task ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<String>,
}

impl TaskUpdateRequest {
    /// Create a builder for constructing a TaskUpdateRequest.
    pub fn builder() -> TaskUpdateRequestBuilder {
        TaskUpdateRequestBuilder::default()
    }
}

impl TaskUpdateRequestBuilder {
    fn validate(&self) -> Result<()> {
        validate_optional("name", self.name.as_ref().and_then(|n| n.as_deref()))?;
        if let Some(Some(area)) = &self.area {
            validate_id("area", area)?;
        }
        if let Some(Some(parent)) = &self.parent_task {
            validate_id("parent_task", parent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    #[test]
    fn test_create_request_serialization() {
        let request = TaskCreateRequest::builder()
            .name("Semantic Segmentation")
            .area("computer-vision")
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "Semantic Segmentation",
                "description": "",
                "area": "computer-vision"
            })
        );
    }

    #[test]
    fn test_create_request_requires_name() {
        let err = TaskCreateRequest::builder().description("x").build().unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(msg) if msg.contains("name")));

        assert!(TaskCreateRequest::builder().name("   ").build().is_err());
    }

    #[test]
    fn test_create_request_rejects_bad_parent() {
        let result = TaskCreateRequest::builder()
            .name("Depth Estimation")
            .parent_task("a/b")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_skips_unset_fields() {
        let request = TaskUpdateRequest::builder()
            .description("Updated")
            .build()
            .unwrap();
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"description": "Updated"}));

        assert!(TaskUpdateRequest::builder().name("").build().is_err());
    }
}

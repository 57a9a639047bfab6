//! Typed data model of the Papers with Code API
//!
//! Response types are plain serde structs. Create and update requests are
//! built with `derive_builder` builders that validate their input when
//! `build()` is called. References to other catalog objects that the server
//! sends as bare IDs are [`LazyResource`](paperswithcode_core::resource::LazyResource)
//! values and are only fetched on an explicit `load()`.

// Re-export commonly used types from submodules
pub use author::*;
pub use conference::*;
pub use dataset::*;
pub use evaluation::*;
pub use method::*;
pub use paper::*;
pub use repository::*;
pub use sync::*;
pub use task::*;

// Submodules
pub mod author;
pub mod conference;
mod date;
pub mod dataset;
pub mod evaluation;
pub mod method;
pub mod paper;
pub mod repository;
pub mod sync;
pub mod task;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paper_repo_deserialization() {
        let entry: PaperRepo = serde_json::from_value(json!({
            "paper": {
                "id": "deep-residual-learning",
                "title": "Deep Residual Learning for Image Recognition",
                "published": "2015-12-10"
            },
            "repository": {
                "url": "https://github.com/KaimingHe/deep-residual-networks",
                "is_official": true,
                "description": "Deep Residual Learning for Image Recognition",
                "stars": 6000,
                "framework": "caffe2"
            },
            "is_official": true
        }))
        .unwrap();

        assert_eq!(entry.paper.id, "deep-residual-learning");
        assert_eq!(entry.repository.unwrap().stars, 6000);
        assert!(entry.is_official);
    }

    #[test]
    fn test_proceeding_optional_fields() {
        let proceeding: Proceeding =
            serde_json::from_value(json!({"id": "neurips-2017-12", "year": 2017})).unwrap();
        assert_eq!(proceeding.year, Some(2017));
        assert_eq!(proceeding.month, None);
    }

    #[test]
    fn test_author_and_area() {
        let author: Author =
            serde_json::from_value(json!({"id": "kaiming-he", "full_name": "Kaiming He"})).unwrap();
        assert_eq!(author.full_name, "Kaiming He");

        let area: Area =
            serde_json::from_value(json!({"id": "computer-vision", "name": "Computer Vision"}))
                .unwrap();
        assert_eq!(area.name, "Computer Vision");
    }
}

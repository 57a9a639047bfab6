//! API resource endpoints
//!
//! One handle per catalog collection. Handles are cheap clones of the
//! [`Client`] they came from; each method is one blocking request.
//!
//! Handles that serve single objects also implement
//! [`Loader`](paperswithcode_core::resource::Loader), so an unloaded
//! reference can be resolved explicitly:
//!
//! ```rust,no_run
//! use paperswithcode::Client;
//!
//! let client = Client::public()?;
//! let mut method = client.methods().get("resnet")?;
//! if let Some(paper) = method.paper.as_mut() {
//!     let paper = paper.load(client.papers())?;
//!     println!("introduced in {}", paper.title);
//! }
//! # Ok::<(), paperswithcode::Error>(())
//! ```

pub mod areas;
pub mod authors;
pub mod conferences;
pub mod datasets;
pub mod evaluations;
pub mod methods;
pub mod papers;
pub mod tasks;

pub use areas::Areas;
pub use authors::Authors;
pub use conferences::Conferences;
pub use datasets::Datasets;
pub use evaluations::Evaluations;
pub use methods::Methods;
pub use papers::Papers;
pub use tasks::Tasks;

use crate::client::Client;
use crate::error::Result;
use crate::http::{Method, Request, RequestBuilder};
use crate::validation::validate_id;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}

/// Check an identifier before it becomes a path segment.
pub(crate) fn segment<'a>(field: &str, id: &'a str) -> Result<&'a str> {
    validate_id(field, id)?;
    Ok(id)
}

/// GET request for a listing, with the optional full-text filter.
pub(crate) fn listing(path: impl Into<String>, q: Option<&str>) -> RequestBuilder {
    Request::builder(Method::Get, path).query_opt("q", q)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_segment_rejects_path_injection() {
        assert_eq!(segment("task", "image-classification").unwrap(), "image-classification");
        assert!(matches!(segment("task", "../admin"), Err(Error::InvalidRequest(_))));
        assert!(matches!(segment("task", ""), Err(Error::InvalidRequest(_))));
    }

    fn ping(resource: &impl Resource) -> Result<serde_json::Value> {
        resource.client().get("ping/")
    }

    #[test]
    fn test_resources_share_the_client_transport() {
        let (client, recorder) =
            testing::Recorder::client(vec![serde_json::json!({"ok": true}); 8]);

        ping(&client.papers()).unwrap();
        ping(&client.conferences()).unwrap();
        ping(&client.areas()).unwrap();
        ping(&client.tasks()).unwrap();
        ping(&client.datasets()).unwrap();
        ping(&client.methods()).unwrap();
        ping(&client.authors()).unwrap();
        assert_eq!(ping(&client.evaluations()).unwrap()["ok"], true);

        assert_eq!(recorder.calls(), 8);
        assert_eq!(recorder.last().path(), "ping/");
    }

    #[test]
    fn test_listing_query() {
        let request = listing("tasks/", Some("segmentation")).build();
        assert_eq!(request.path(), "tasks/");
        assert_eq!(testing::query(&request), vec![("q", "segmentation")]);

        assert!(listing("tasks/", None).build().query().is_empty());
    }
}

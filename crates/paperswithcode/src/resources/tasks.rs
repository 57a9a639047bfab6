//! Tasks API endpoint

use paperswithcode_core::resource::Loader;
use serde::de::DeserializeOwned;

use super::{Resource, listing, segment};
use crate::{
    client::Client,
    error::{Error, Result},
    http::{Method, Request},
    pagination::{Page, PageRequest},
    types::{EvaluationTable, Paper, Task, TaskCreateRequest, TaskUpdateRequest},
};

/// Tasks API resource.
///
/// Tasks form a hierarchy: [`parents`](Tasks::parents) and
/// [`children`](Tasks::children) walk it one level at a time.
#[derive(Debug, Clone)]
pub struct Tasks {
    client: Client,
}

impl Tasks {
    /// Create a new Tasks resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List tasks, optionally filtered by a search string.
    pub fn list(&self, q: Option<&str>, page: PageRequest) -> Result<Page<Task>> {
        self.client.list(listing("tasks/", q), page)
    }

    /// Get a task by ID.
    pub fn get(&self, task_id: &str) -> Result<Task> {
        let id = segment("task_id", task_id)?;
        self.client.get(&format!("tasks/{id}/"))
    }

    /// Create a task. Requires an authenticated client.
    pub fn create(&self, request: &TaskCreateRequest) -> Result<Task> {
        self.client.send(Method::Post, "tasks/", request)
    }

    /// Update the fields set in `request`.
    pub fn update(&self, task_id: &str, request: &TaskUpdateRequest) -> Result<Task> {
        let id = segment("task_id", task_id)?;
        self.client.send(Method::Patch, &format!("tasks/{id}/"), request)
    }

    /// Delete a task.
    pub fn delete(&self, task_id: &str) -> Result<()> {
        let id = segment("task_id", task_id)?;
        self.client.delete(&format!("tasks/{id}/"))
    }

    /// Direct parents of a task.
    pub fn parents(&self, task_id: &str, page: PageRequest) -> Result<Page<Task>> {
        self.sublist(task_id, "parents", page)
    }

    /// Direct children of a task.
    pub fn children(&self, task_id: &str, page: PageRequest) -> Result<Page<Task>> {
        self.sublist(task_id, "children", page)
    }

    /// Papers addressing a task.
    pub fn papers(&self, task_id: &str, page: PageRequest) -> Result<Page<Paper>> {
        self.sublist(task_id, "papers", page)
    }

    /// Evaluation tables benchmarking a task.
    pub fn evaluations(&self, task_id: &str, page: PageRequest) -> Result<Page<EvaluationTable>> {
        self.sublist(task_id, "evaluations", page)
    }

    fn sublist<T: DeserializeOwned>(
        &self,
        task_id: &str,
        collection: &str,
        page: PageRequest,
    ) -> Result<Page<T>> {
        let id = segment("task_id", task_id)?;
        let builder = Request::builder(Method::Get, format!("tasks/{id}/{collection}/"));
        self.client.list(builder, page)
    }
}

impl Resource for Tasks {
    fn client(&self) -> &Client {
        &self.client
    }
}

impl Loader<Task> for Tasks {
    type Error = Error;

    fn load(&self, id: &str) -> Result<Task> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::{Recorder, page};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn task(id: &str, name: &str) -> serde_json::Value {
        json!({"id": id, "name": name, "description": ""})
    }

    #[test]
    fn test_create_update_delete() {
        let (client, recorder) = Recorder::client(vec![
            task("depth-estimation", "Depth Estimation"),
            task("depth-estimation", "Monocular Depth Estimation"),
            json!({}),
        ]);
        let tasks = client.tasks();

        let created = tasks
            .create(
                &TaskCreateRequest::builder()
                    .name("Depth Estimation")
                    .area("computer-vision")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(created.id, "depth-estimation");

        let updated = tasks
            .update(
                "depth-estimation",
                &TaskUpdateRequest::builder()
                    .name("Monocular Depth Estimation")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(updated.name, "Monocular Depth Estimation");

        tasks.delete("depth-estimation").unwrap();

        let requests = recorder.requests();
        assert_eq!(requests[0].method(), Method::Post);
        assert_eq!(requests[0].path(), "tasks/");
        assert_eq!(
            requests[0].body(),
            Some(&json!({"name": "Depth Estimation", "description": "", "area": "computer-vision"}))
        );
        assert_eq!(requests[1].method(), Method::Patch);
        assert_eq!(requests[1].path(), "tasks/depth-estimation/");
        assert_eq!(
            requests[1].body(),
            Some(&json!({"name": "Monocular Depth Estimation"}))
        );
        assert_eq!(requests[2].method(), Method::Delete);
        assert_eq!(requests[2].path(), "tasks/depth-estimation/");
    }

    #[test]
    fn test_hierarchy_and_evaluations() {
        let (client, recorder) = Recorder::client(vec![
            page(vec![task("computer-vision-tasks", "Computer Vision")]),
            page(vec![task("fine-grained-image-classification", "Fine-Grained")]),
            page(vec![json!({
                "id": "image-classification-on-imagenet",
                "task": "image-classification",
                "dataset": "imagenet"
            })]),
        ]);
        let tasks = client.tasks();

        let parents = tasks.parents("image-classification", PageRequest::default()).unwrap();
        assert_eq!(parents.results[0].name, "Computer Vision");
        let children = tasks.children("image-classification", PageRequest::default()).unwrap();
        assert_eq!(children.len(), 1);
        let tables = tasks
            .evaluations("image-classification", PageRequest::default())
            .unwrap();
        assert_eq!(tables.results[0].dataset.id(), "imagenet");

        assert_eq!(
            recorder.last().path(),
            "tasks/image-classification/evaluations/"
        );
    }

    #[test]
    fn test_unauthenticated_write() {
        let (client, _) = Recorder::client_with_status(vec![(
            401,
            json!({"detail": "Authentication credentials were not provided."}),
        )]);
        let request = TaskCreateRequest::builder().name("X").build().unwrap();

        let err = client.tasks().create(&request).unwrap_err();
        assert_eq!(err.status(), Some(401));
    }
}

//! Paper-related types

use chrono::NaiveDate;
use paperswithcode_core::resource::{Identified, LazyResource};
use serde::{Deserialize, Serialize};

use super::{Conference, Repository};

/// A research paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Paper ID
    pub id: String,

    /// ArXiv ID
    #[serde(default)]
    pub arxiv_id: Option<String>,

    /// NeurIPS conference ID
    #[serde(default)]
    pub nips_id: Option<String>,

    /// URL to the paper abstract
    #[serde(default)]
    pub url_abs: String,

    /// URL to the paper PDF
    #[serde(default)]
    pub url_pdf: String,

    /// Paper title
    pub title: String,

    /// Paper abstract
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,

    /// Author names, in paper order
    #[serde(default)]
    pub authors: Vec<String>,

    /// Publication date
    #[serde(default, deserialize_with = "super::date::deserialize_opt")]
    pub published: Option<NaiveDate>,

    /// Conference the paper was published at
    #[serde(default)]
    pub conference: Option<LazyResource<Conference>>,

    /// URL to the conference paper page
    #[serde(default)]
    pub conference_url_abs: Option<String>,

    /// URL to the conference paper PDF
    #[serde(default)]
    pub conference_url_pdf: Option<String>,

    /// Conference proceeding the paper appeared in
    #[serde(default)]
    pub proceeding: Option<String>,
}

impl Identified for Paper {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A paper together with one of its implementations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRepo {
    /// The paper
    pub paper: Paper,

    /// The implementing repository, if known
    #[serde(default)]
    pub repository: Option<Repository>,

    /// Whether this is the authors' own implementation
    #[serde(default)]
    pub is_official: bool,
}

/// Filters for listing papers.
///
/// All filters are optional and combined by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperQuery {
    /// Full-text search
    pub q: Option<String>,
    /// Exact ArXiv ID
    pub arxiv_id: Option<String>,
    /// Title search
    pub title: Option<String>,
    /// Abstract search
    pub abstract_text: Option<String>,
}

impl PaperQuery {
    /// Full-text search query.
    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    /// Look a paper up by its ArXiv ID.
    pub fn arxiv_id(arxiv_id: impl Into<String>) -> Self {
        Self {
            arxiv_id: Some(arxiv_id.into()),
            ..Default::default()
        }
    }

    /// Restrict by title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Restrict by abstract.
    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = Some(abstract_text.into());
        self
    }

    /// Query parameters in a stable order.
    pub(crate) fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("q", &self.q),
            ("arxiv_id", &self.arxiv_id),
            ("title", &self.title),
            ("abstract", &self.abstract_text),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

//! Main client for the Papers with Code API

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    http::{HttpTransport, Method, Request, RequestBuilder, RetryingTransport, Transport},
    pagination::{Page, PageRequest},
    resources::{Areas, Authors, Conferences, Datasets, Evaluations, Methods, Papers, Tasks},
};

/// Client for the Papers with Code API.
///
/// Cheap to clone: clones share one connection pool and one configuration.
/// Every call is a single blocking HTTP exchange, plus retries for the
/// configured statuses.
///
/// # Example
///
/// ```rust,no_run
/// use paperswithcode::{Client, PageRequest};
/// use paperswithcode::types::PaperQuery;
///
/// let client = Client::public()?;
/// let page = client
///     .papers()
///     .list(&PaperQuery::search("residual"), PageRequest::default())?;
/// for paper in page {
///     println!("{}: {}", paper.id, paper.title);
/// }
/// # Ok::<(), paperswithcode::Error>(())
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.inner.transport)
            .finish()
    }
}

impl Client {
    /// Create a client from a configuration value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] when the configured base URL cannot be
    /// used, or [`Error::Transport`] when the HTTP client fails to start.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = RetryingTransport::new(Transport::new(&config)?, config.retry.clone());
        Ok(Self::from_transport(Arc::new(transport)))
    }

    /// Create an anonymous client with the default configuration.
    ///
    /// Anonymous clients can read the public catalog but every write is
    /// rejected by the server.
    pub fn public() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Create an authenticated client with otherwise default configuration.
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::with_token(token))
    }

    /// Create a client configured from `PAPERSWITHCODE_*` environment variables.
    #[cfg(feature = "env")]
    #[cfg_attr(docsrs, doc(cfg(feature = "env")))]
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client over an arbitrary transport.
    ///
    /// The transport is used as is; wrap it in a
    /// [`RetryingTransport`] if retries are wanted.
    pub fn from_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            inner: Arc::new(ClientInner { transport }),
        }
    }

    /// Exchange a username and password for an API token.
    ///
    /// The token is returned, not stored: build a new client with
    /// [`Client::with_token`] to use it.
    ///
    /// # Errors
    ///
    /// Besides the usual request errors, [`Error::Parse`] when the server
    /// answers without a token.
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let request = Request::builder(Method::Post, "auth/token/")
            .body(json!({ "username": username, "password": password }))
            .build();

        let body = self.execute(&request)?;
        match body.get("token").and_then(Value::as_str) {
            Some(token) => Ok(token.to_string()),
            None => Err(Error::Parse {
                message: "Login response did not contain a token".to_string(),
                response: None,
            }),
        }
    }

    /// Papers, their implementations and their links to the rest of the catalog.
    pub fn papers(&self) -> Papers {
        Papers::new(self.clone())
    }

    /// Conferences and their proceedings.
    pub fn conferences(&self) -> Conferences {
        Conferences::new(self.clone())
    }

    /// Research areas.
    pub fn areas(&self) -> Areas {
        Areas::new(self.clone())
    }

    /// Tasks and the task hierarchy.
    pub fn tasks(&self) -> Tasks {
        Tasks::new(self.clone())
    }

    /// Datasets.
    pub fn datasets(&self) -> Datasets {
        Datasets::new(self.clone())
    }

    /// Methods.
    pub fn methods(&self) -> Methods {
        Methods::new(self.clone())
    }

    /// Authors.
    pub fn authors(&self) -> Authors {
        Authors::new(self.clone())
    }

    /// Evaluation tables, their metrics and results.
    pub fn evaluations(&self) -> Evaluations {
        Evaluations::new(self.clone())
    }

    pub(crate) fn execute(&self, request: &Request) -> Result<Value> {
        self.inner.transport.execute(request)
    }

    /// GET a single object.
    pub(crate) fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        decode(self.execute(&Request::get(path))?)
    }

    /// GET one page of a listing.
    pub(crate) fn list<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        page: PageRequest,
    ) -> Result<Page<T>> {
        let request = page.apply(builder).build();
        Page::decode(self.execute(&request)?)
    }

    /// Send a JSON body and decode the answer.
    pub(crate) fn send<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = Request::builder(method, path).json(body)?.build();
        decode(self.execute(&request)?)
    }

    /// DELETE an object; the answer body is ignored.
    pub(crate) fn delete(&self, path: &str) -> Result<()> {
        self.execute(&Request::delete(path)).map(drop)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(Error::from)
}

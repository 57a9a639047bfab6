//! Explicit lazy references to remote resources.
//!
//! Catalog objects often refer to each other by identifier only: a method
//! names the paper that introduced it, an evaluation table names its task and
//! dataset. [`LazyResource`] keeps that distinction visible in the type
//! system. A reference starts out as a [`LazyResource::Stub`] holding only the
//! identifier and becomes [`LazyResource::Loaded`] once somebody explicitly
//! calls [`LazyResource::load`] with a [`Loader`]. Reading a stub never
//! performs I/O.

use serde::{Deserialize, Serialize};

/// A value that knows its own identifier.
pub trait Identified {
    /// Identifier used to fetch this value from its loader.
    fn id(&self) -> &str;
}

/// Something able to fetch a full value from its identifier.
///
/// # Examples
///
/// ```rust
/// use paperswithcode_core::resource::{Identified, LazyResource, Loader};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Task {
///     id: String,
///     name: String,
/// }
///
/// impl Identified for Task {
///     fn id(&self) -> &str {
///         &self.id
///     }
/// }
///
/// struct StaticLoader;
///
/// impl Loader<Task> for StaticLoader {
///     type Error = std::io::Error;
///
///     fn load(&self, id: &str) -> Result<Task, Self::Error> {
///         Ok(Task { id: id.to_string(), name: "Image Classification".to_string() })
///     }
/// }
///
/// let mut task = LazyResource::<Task>::stub("image-classification");
/// assert!(!task.is_loaded());
///
/// let loaded = task.load(&StaticLoader).unwrap();
/// assert_eq!(loaded.name, "Image Classification");
/// assert!(task.is_loaded());
/// ```
pub trait Loader<T> {
    /// Error produced when the value cannot be fetched.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the value identified by `id`.
    fn load(&self, id: &str) -> Result<T, Self::Error>;
}

impl<T, L: Loader<T> + ?Sized> Loader<T> for &L {
    type Error = L::Error;

    fn load(&self, id: &str) -> Result<T, Self::Error> {
        (**self).load(id)
    }
}

/// A reference to a remote value that is either unloaded or fully loaded.
///
/// Deserializes from either a bare identifier string (stub) or a full object
/// (loaded), and serializes back to the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LazyResource<T> {
    /// Only the identifier is known.
    Stub(String),
    /// The full value has been fetched.
    Loaded(T),
}

impl<T> LazyResource<T> {
    /// Create an unloaded reference.
    pub fn stub(id: impl Into<String>) -> Self {
        LazyResource::Stub(id.into())
    }

    /// Whether the full value is available without I/O.
    pub fn is_loaded(&self) -> bool {
        matches!(self, LazyResource::Loaded(_))
    }

    /// The loaded value, if any. Never triggers a fetch.
    pub fn get(&self) -> Option<&T> {
        match self {
            LazyResource::Loaded(value) => Some(value),
            LazyResource::Stub(_) => None,
        }
    }

    /// Consume the reference, returning the loaded value if any.
    pub fn into_loaded(self) -> Option<T> {
        match self {
            LazyResource::Loaded(value) => Some(value),
            LazyResource::Stub(_) => None,
        }
    }
}

impl<T: Identified> LazyResource<T> {
    /// Identifier of the referenced value, loaded or not.
    pub fn id(&self) -> &str {
        match self {
            LazyResource::Stub(id) => id,
            LazyResource::Loaded(value) => value.id(),
        }
    }

    /// Resolve the reference, fetching it through `loader` when still a stub.
    ///
    /// A loaded reference is returned as is; the loader is not consulted. On
    /// failure the reference stays a stub.
    pub fn load<L: Loader<T>>(&mut self, loader: L) -> Result<&T, L::Error> {
        if let LazyResource::Stub(id) = self {
            let value = loader.load(id)?;
            *self = LazyResource::Loaded(value);
        }
        match self {
            LazyResource::Loaded(value) => Ok(value),
            LazyResource::Stub(_) => unreachable!("stub replaced above"),
        }
    }
}

impl<T> From<T> for LazyResource<T> {
    fn from(value: T) -> Self {
        LazyResource::Loaded(value)
    }
}

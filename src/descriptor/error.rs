use super::types::HttpMethod;
use std::io;
use std::path::PathBuf;

/// Rejection of a structurally conflicting or malformed `add_route` /
/// `add_middleware` call. The descriptor is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// Another entity in the same handler namespace already uses the name,
    /// or a name that becomes the same generated method.
    #[error("handler with the same name already exists: {0}")]
    DuplicateHandler(String),

    /// Another route already serves this path for this method.
    #[error("route with path {0:?} and method {1} already used")]
    DuplicateRouteMethod(String, HttpMethod),

    #[error("route path {0:?} must begin with '/'")]
    InvalidPath(String),

    #[error("route with path {0:?} lists method {1} more than once")]
    RepeatedMethod(String, HttpMethod),

    /// Handler names become method identifiers in the generated code.
    #[error("handler name {0:?} is not a valid identifier")]
    InvalidHandlerName(String),
}

/// Returned when a string does not name one of the nine standard methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown HTTP method: {0:?}")]
pub struct UnknownMethod(pub String);

/// Failure reading, writing or decoding a serialized descriptor.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed accessing descriptor {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML descriptor")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON descriptor")]
    Json(#[from] serde_json::Error),

    #[error("descriptor violates its invariants")]
    Descriptor(#[from] DescriptorError),
}

use super::error::UnknownMethod;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generic metadata attached to every descriptor entity: a simple name, a
/// one-sentence summary and an optional longer description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Summary", default)]
    pub summary: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

impl Info {
    pub fn new(name: impl Into<String>) -> Self {
        Info {
            name: name.into(),
            ..Info::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// HTTP methods a route can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
    Connect,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Connect,
        HttpMethod::Trace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// An endpoint on which the service serves content, the methods it accepts,
/// and the name of the service method that handles it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(flatten)]
    pub info: Info,

    /// URI relative to the root URL. Starts with a slash; the root itself is `/`.
    #[serde(rename = "Path")]
    pub path: String,

    /// When set, a request whose path differs from `path` only by a trailing
    /// slash is redirected permanently to `path`. Otherwise it is not found.
    #[serde(rename = "StrictSlash", default)]
    pub strict_slash: bool,

    /// Empty means the route answers every method that no other route on
    /// the same path lists.
    #[serde(rename = "HttpMethods", default)]
    pub http_methods: Vec<HttpMethod>,

    /// Name of the service method holding the business logic for this route.
    #[serde(rename = "HandlerName")]
    pub handler_name: String,
}

impl Route {
    pub fn new(path: impl Into<String>, handler_name: impl Into<String>) -> Self {
        Route {
            info: Info::default(),
            path: path.into(),
            strict_slash: false,
            http_methods: Vec::new(),
            handler_name: handler_name.into(),
        }
    }

    /// Adds a method, ignoring it if the route already lists it.
    pub fn method(mut self, method: HttpMethod) -> Self {
        if !self.http_methods.contains(&method) {
            self.http_methods.push(method);
        }
        self
    }

    pub fn methods(self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        methods.into_iter().fold(self, Route::method)
    }

    pub fn strict_slash(mut self, strict: bool) -> Self {
        self.strict_slash = strict;
        self
    }

    pub fn info(mut self, info: Info) -> Self {
        self.info = info;
        self
    }

    pub fn accepts(&self, method: HttpMethod) -> bool {
        self.http_methods.contains(&method)
    }

    pub fn serves_every_method(&self) -> bool {
        self.http_methods.is_empty()
    }
}

/// A middleware wrapped around the request chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Middleware {
    #[serde(flatten)]
    pub info: Info,

    /// Endpoints the middleware applies to; `*` stands for every route.
    #[serde(rename = "Paths", default)]
    pub paths: Vec<String>,

    #[serde(rename = "HandlerName")]
    pub handler_name: String,

    /// Relative ordering key. Middlewares are added from the highest to the
    /// lowest priority, so a higher priority sees the request first.
    #[serde(rename = "Priority", default)]
    pub priority: i64,
}

impl Middleware {
    pub const ALL_PATHS: &'static str = "*";

    pub fn new(handler_name: impl Into<String>) -> Self {
        Middleware {
            info: Info::default(),
            paths: Vec::new(),
            handler_name: handler_name.into(),
            priority: 0,
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn info(mut self, info: Info) -> Self {
        self.info = info;
        self
    }

    pub fn applies_to_all(&self) -> bool {
        self.paths.is_empty() || self.paths.iter().any(|p| p == Self::ALL_PATHS)
    }
}

/// Describes what the generated service looks like.
///
/// A descriptor is seeded with [`ServiceDescriptor::base`] and grown only
/// through [`ServiceDescriptor::add_route`] and
/// [`ServiceDescriptor::add_middleware`], so the route and middleware lists
/// always satisfy the handler-name and path/method uniqueness rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    #[serde(flatten)]
    pub info: Info,

    #[serde(rename = "Routes")]
    pub(crate) routes: Vec<Route>,

    #[serde(rename = "Middlewares")]
    pub(crate) middlewares: Vec<Middleware>,
}

impl ServiceDescriptor {
    /// Empty descriptor carrying `info`.
    pub fn base(info: Info) -> Self {
        ServiceDescriptor {
            info,
            routes: Vec::new(),
            middlewares: Vec::new(),
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn middlewares(&self) -> &[Middleware] {
        &self.middlewares
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.middlewares.is_empty()
    }
}

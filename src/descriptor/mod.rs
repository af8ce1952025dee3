//! # Descriptor Module
//!
//! The declarative description of a service: its metadata, the routes it
//! serves and the middlewares wrapped around them.
//!
//! ## Invariants
//!
//! The route and middleware lists can only grow through
//! [`ServiceDescriptor::add_route`] and [`ServiceDescriptor::add_middleware`],
//! which reject:
//!
//! - a route handler name already used by another route,
//! - a middleware handler name already used by another middleware,
//! - a route sharing its path and at least one HTTP method with another route,
//! - malformed input (paths not starting with `/`, repeated methods, handler
//!   names that are not identifiers).
//!
//! Route and middleware handler names live in separate namespaces. Within a
//! namespace, names are compared by the method they generate, so `GetShip`
//! and `get_ship` are the same handler. A route listing no methods shares
//! none with its neighbours.
//!
//! ## Serialized Form
//!
//! ```yaml
//! Name: admiral
//! Summary: Fleet status service
//! Description: ''
//! Routes:
//! - Name: Root request handler
//!   Summary: Responds to GET requests on the root URI
//!   Description: ''
//!   Path: /
//!   StrictSlash: true
//!   HttpMethods:
//!   - GET
//!   HandlerName: Index
//! Middlewares:
//! - Name: Logger middleware
//!   Summary: Logs every request
//!   Description: ''
//!   Paths:
//!   - '*'
//!   HandlerName: LoggerMw
//!   Priority: 1
//! ```
//!
//! Loading a file replays each entry through the mutation API, so a loaded
//! descriptor upholds the same invariants as one built in code.

mod build;
mod error;
mod load;
mod types;

pub use error::{DescriptorError, LoadError, UnknownMethod};
pub use load::DescriptorFormat;
pub use types::{HttpMethod, Info, Middleware, Route, ServiceDescriptor};

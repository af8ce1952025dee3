//! # seed
//!
//! **seed** scaffolds a runnable [axum](https://docs.rs/axum) service from a
//! declarative description of its routes and middlewares.
//!
//! ## Overview
//!
//! A [`ServiceDescriptor`](descriptor::ServiceDescriptor) lists the routes
//! (path, HTTP methods, handler name) and middlewares (handler name, priority)
//! of a service. Building one enforces the structural rules up front: no two
//! routes share a handler name, and no two routes on the same path share a
//! method. From a valid descriptor the generator synthesizes a complete crate:
//! an interface contract, a router bootstrap, a service stub to fill in, an
//! entrypoint and a `Cargo.toml`.
//!
//! ## Architecture
//!
//! - **[`descriptor`]** - descriptor model, its invariants, YAML/JSON persistence
//! - **[`generator`]** - symbol registry, statement trees, synthesis, rendering
//!   and the materializer that writes and formats the project
//! - **[`cli`]** - command-line front end of the `seed` binary
//! - **[`runtime_config`]** - environment-provided defaults
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(seed)
//!     participant Desc as descriptor
//!     participant Synth as generator::synthesize
//!     participant Render as generator::render
//!     participant Project as generator::generate_project
//!     participant FS as File System
//!
//!     User->>CLI: seed --init --name admiral
//!     CLI->>Desc: ServiceDescriptor::base(info)<br/>or ServiceDescriptor::load(path)
//!     Desc-->>CLI: validated descriptor
//!     CLI->>Project: generate_project(&desc, &config)
//!     Project->>Synth: synthesize(&desc)
//!     Synth-->>Project: five artifact trees
//!     loop every artifact
//!         Project->>Render: render(&artifact)
//!         Render-->>Project: source text
//!         Project->>FS: write file
//!     end
//!     Project->>FS: write admiral.yml
//!     Project->>FS: cargo fmt
//!     Project-->>CLI: project directory
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use seed::descriptor::{HttpMethod, Info, Middleware, Route, ServiceDescriptor};
//! use seed::generator::{generate_project, MaterializeConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut desc = ServiceDescriptor::base(Info::new("admiral"));
//! desc.add_route(
//!     Route::new("/", "Root")
//!         .method(HttpMethod::Get)
//!         .strict_slash(true),
//! )?;
//! desc.add_middleware(Middleware::new("LoggerMw").priority(10))?;
//!
//! generate_project(&desc, &MaterializeConfig::new("."))?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod descriptor;
pub mod generator;
pub mod logging;
pub mod runtime_config;

pub use descriptor::{
    DescriptorError, HttpMethod, Info, LoadError, Middleware, Route, ServiceDescriptor,
};
pub use generator::{generate_project, synthesize, MaterializeConfig, ProjectError};

//! # Generator Module
//!
//! The generator turns a validated [`ServiceDescriptor`](crate::descriptor::ServiceDescriptor)
//! into a runnable `axum` service crate.
//!
//! ## Overview
//!
//! Every run synthesizes a complete, fresh set of five artifacts:
//!
//! - **Service stub** - the crate root, a `Server` type implementing every
//!   handler and middleware method with a placeholder body
//! - **Interface contract** - the `<Name>Handler` and `<Name>Middleware`
//!   traits and the `<Name>Service` trait composed from them
//! - **Bootstrap router** - builds the `axum::Router` from a service
//!   implementation: routes in descriptor order, middlewares by priority
//! - **Entrypoint** - `main` binding the listener and serving the router
//! - **Dependency manifest** - `Cargo.toml` with pinned dependencies
//!
//! ## Architecture
//!
//! ```text
//! Descriptor → synthesize → statement trees → render → text → Materializer
//! ```
//!
//! 1. **Synthesis** ([`synthesize`]) - pure; builds one [`SourceFile`] per
//!    Rust artifact, registering every external reference in that file's
//!    [`ImportRegistry`]
//! 2. **Rendering** ([`render`]) - pure; walks a tree and emits text, with
//!    imports sorted and colliding names aliased
//! 3. **Materialization** ([`generate_project`]) - writes the files, the
//!    descriptor, and runs `cargo fmt`
//!
//! ## Generated Structure
//!
//! ```text
//! admiral/
//! ├── Cargo.toml          # Dependency manifest
//! ├── admiral.rs          # Service stub (crate root), edit freely
//! ├── admiral.yml         # The descriptor the project was generated from
//! ├── cmd/
//! │   └── main.rs         # Entrypoint
//! └── gen/
//!     ├── bootstrap.rs    # Router bootstrap, regenerated
//!     └── interface.rs    # Interface contract, regenerated
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,no_run
//! use seed::descriptor::{HttpMethod, Info, Route, ServiceDescriptor};
//! use seed::generator::{generate_project, MaterializeConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut desc = ServiceDescriptor::base(Info::new("admiral"));
//! desc.add_route(Route::new("/", "Root").method(HttpMethod::Get))?;
//! let dir = generate_project(&desc, &MaterializeConfig::new("."))?;
//! println!("generated {}", dir.display());
//! # Ok(())
//! # }
//! ```

mod artifact;
mod ast;
mod imports;
mod manifest;
pub mod naming;
mod project;
mod render;
mod synthesis;
#[cfg(test)]
mod tests;

pub use artifact::{Artifact, ArtifactBody, ArtifactKind, Artifacts, CMD_FOLDER, GEN_FOLDER};
pub use ast::{
    Attr, BinOp, Block, Expr, Field, FnDecl, FnSig, GenericParam, Item, Lit, MatchArm, Param,
    Receiver, SourceFile, Stmt, Type, Vis,
};
pub use imports::{ImportRegistry, Symbol};
pub use manifest::{
    dependency_manifest, BinTarget, DependencySpec, LibTarget, Manifest, Package,
    PinnedDependency, GENERATED_EDITION, GENERATED_VERSION, PINNED_DEPENDENCIES,
};
pub use project::{
    descriptor_file_name, format_project, generate_project, generate_project_from_descriptor,
    ExistingPolicy, MaterializeConfig, ProjectError, DEFAULT_CARGO_BIN, DEFAULT_DIR_MODE,
    DEFAULT_FILE_MODE,
};
pub use render::{render, render_all, render_manifest, render_source, RenderError, MANIFEST_HEADER};
pub use synthesis::{
    synthesize, ServiceNames, DEFAULT_ADDRESS, REQUEST_HANDLER, ROUTER_TYPE, SERVER_TYPE,
};

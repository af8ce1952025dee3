#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use seed::descriptor::{HttpMethod, Info, Middleware, Route, ServiceDescriptor};
use std::fs;
use std::path::{Path, PathBuf};

/// Descriptor used across the integration tests.
pub const ADMIRAL_YAML: &str = r#"Name: admiral
Summary: Fleet status service
Description: ''
Routes:
- Name: Root request handler
  Summary: Responds to GET requests on the root URI
  Description: ''
  Path: /
  StrictSlash: true
  HttpMethods:
  - GET
  HandlerName: Root
- Name: Ship updates
  Path: /ships/{id}
  HttpMethods:
  - PUT
  - PATCH
  HandlerName: UpdateShip
Middlewares:
- Name: Request logger
  Paths:
  - '*'
  HandlerName: LoggerMw
  Priority: 10
- Name: Auth
  Paths:
  - /ships
  HandlerName: AuthMw
  Priority: 20
"#;

pub fn admiral() -> ServiceDescriptor {
    let mut desc = ServiceDescriptor::base(
        Info::new("admiral").with_summary("Fleet status service"),
    );
    desc.add_route(
        Route::new("/", "Root")
            .method(HttpMethod::Get)
            .strict_slash(true),
    )
    .unwrap();
    desc.add_route(
        Route::new("/ships/{id}", "UpdateShip").methods([HttpMethod::Put, HttpMethod::Patch]),
    )
    .unwrap();
    desc.add_middleware(Middleware::new("LoggerMw").priority(10))
        .unwrap();
    desc
}

/// Writes an executable `cargo` stand-in whose `fmt` subcommand exits with
/// `fmt_exit` after touching a marker file in the working directory.
#[cfg(unix)]
pub fn stub_cargo(dir: &Path, fmt_exit: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let stub = dir.join("cargo");
    fs::write(
        &stub,
        format!(
            "#!/bin/sh\nif [ \"$1\" = \"fmt\" ]; then\n    touch .formatted\n    exit {fmt_exit}\nfi\nexit 0\n"
        ),
    )
    .unwrap();
    let mut perms = fs::metadata(&stub).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&stub, perms).unwrap();
    stub
}

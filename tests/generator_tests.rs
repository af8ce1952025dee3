#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use seed::descriptor::ServiceDescriptor;
use seed::generator::{render, render_all, synthesize, ArtifactKind};

fn render_descriptor(desc: &ServiceDescriptor) -> Vec<(ArtifactKind, String)> {
    synthesize(desc)
        .into_vec()
        .into_iter()
        .map(|artifact| (artifact.kind, render(&artifact).unwrap()))
        .collect()
}

#[test]
fn test_artifact_order() {
    let kinds: Vec<ArtifactKind> = render_descriptor(&common::admiral())
        .into_iter()
        .map(|(kind, _)| kind)
        .collect();
    assert_eq!(kinds, ArtifactKind::ALL.to_vec());
}

#[test]
fn test_entrypoint_output() {
    let rendered = render_descriptor(&common::admiral());
    let (_, main) = &rendered[3];
    let expected = "\
//! Process entrypoint of `admiral`.

use admiral::Server;
use admiral::gen::bootstrap::Service;
use axum::serve;
use tokio::net::TcpListener;

/// Address the service listens on.
const DEFAULT_ADDRESS: &str = \"0.0.0.0:8080\";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let service = Service::new(Server::default());
    let listener = TcpListener::bind(DEFAULT_ADDRESS).await?;

    // A listener failure ends the process; it is never retried.
    serve(listener, service.into_router()).await
}
";
    assert_eq!(main, expected);
}

#[test]
fn test_loaded_descriptor_renders_like_built_one() {
    let loaded = ServiceDescriptor::from_yaml(common::ADMIRAL_YAML).unwrap();
    let reloaded = ServiceDescriptor::from_yaml(&loaded.to_yaml().unwrap()).unwrap();
    assert_eq!(
        render_all(&synthesize(&loaded).into_vec()).unwrap(),
        render_all(&synthesize(&reloaded).into_vec()).unwrap()
    );
}

#[test]
fn test_import_blocks_are_sorted() {
    for (kind, text) in render_descriptor(&common::admiral()) {
        if !kind.is_source() {
            continue;
        }
        let uses: Vec<&str> = text.lines().filter(|l| l.starts_with("use ")).collect();
        let mut sorted = uses.clone();
        sorted.sort_by_key(|line| {
            line.trim_start_matches("use ")
                .split(" as ")
                .next()
                .unwrap_or_default()
                .trim_end_matches(';')
                .to_string()
        });
        assert_eq!(uses, sorted, "unsorted imports in the {kind}");
        assert!(!uses.is_empty(), "no imports in the {kind}");
    }
}

#[test]
fn test_strict_slash_is_documented() {
    let rendered = render_descriptor(&common::admiral());
    let (_, interface) = &rendered[1];
    // "/" has no trailing-slash variant to redirect.
    assert!(!interface.contains("trailing-slash variant"));

    let mut desc = common::admiral();
    desc.add_route(
        seed::Route::new("/ships", "ListShips")
            .method(seed::HttpMethod::Get)
            .strict_slash(true),
    )
    .unwrap();
    let rendered = render_descriptor(&desc);
    let (_, interface) = &rendered[1];
    assert!(interface.contains("The trailing-slash variant of the path redirects here."));
}

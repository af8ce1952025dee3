#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::ast::{ident, local_ty};
use super::naming::{
    is_valid_identifier, is_valid_project_name, method_name, title_case, to_snake_case,
};
use super::*;
use crate::descriptor::{HttpMethod, Info, Middleware, Route, ServiceDescriptor};

fn admiral() -> ServiceDescriptor {
    let mut desc = ServiceDescriptor::base(
        Info::new("admiral").with_summary("Fleet status service"),
    );
    desc.add_route(
        Route::new("/", "Root")
            .method(HttpMethod::Get)
            .strict_slash(true)
            .info(
                Info::new("Root request handler")
                    .with_summary("Responds to GET requests on the root URI"),
            ),
    )
    .unwrap();
    desc.add_route(
        Route::new("/ships", "CreateShip")
            .methods([HttpMethod::Post, HttpMethod::Put])
            .strict_slash(true),
    )
    .unwrap();
    desc.add_middleware(Middleware::new("LoggerMw").priority(10))
        .unwrap();
    desc
}

fn rendered(desc: &ServiceDescriptor) -> Vec<String> {
    render_all(&synthesize(desc).into_vec()).unwrap()
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in:\n{haystack}"))
}

#[test]
fn test_title_case() {
    assert_eq!(title_case("admiral"), "Admiral");
    assert_eq!(title_case("pet-store"), "PetStore");
    assert_eq!(title_case("fleet_ops api"), "FleetOpsApi");
}

#[test]
fn test_to_snake_case() {
    assert_eq!(to_snake_case("Root"), "root");
    assert_eq!(to_snake_case("LoggerMw"), "logger_mw");
    assert_eq!(to_snake_case("getHTTPStatus"), "get_http_status");
    assert_eq!(to_snake_case("already_snake"), "already_snake");
    assert_eq!(to_snake_case("Route2Handler"), "route2_handler");
}

#[test]
fn test_method_name_escapes_keywords() {
    assert_eq!(method_name("Type"), "r#type");
    assert_eq!(method_name("Match"), "r#match");
    assert_eq!(method_name("Self"), "self_");
    assert_eq!(method_name("Crate"), "crate_");
    assert!(is_valid_identifier(&method_name("Type")));
    assert!(is_valid_identifier(&method_name("Self")));
}

#[test]
fn test_identifier_validation() {
    assert!(is_valid_identifier("root"));
    assert!(is_valid_identifier("r#type"));
    assert!(is_valid_identifier("gen"));
    assert!(!is_valid_identifier("type"));
    assert!(!is_valid_identifier("r#self"));
    assert!(!is_valid_identifier("_"));
    assert!(!is_valid_identifier("9lives"));
    assert!(!is_valid_identifier("has space"));
}

#[test]
fn test_project_name_validation() {
    assert!(is_valid_project_name("admiral"));
    assert!(is_valid_project_name("pet-store"));
    assert!(is_valid_project_name("svc_2"));
    assert!(!is_valid_project_name(""));
    assert!(!is_valid_project_name("2fast"));
    assert!(!is_valid_project_name("-dash"));
    assert!(!is_valid_project_name("has space"));
    assert!(!is_valid_project_name("../escape"));
    assert!(!is_valid_project_name("match"));
}

#[test]
fn test_import_registry_dedups() {
    let mut imports = ImportRegistry::new();
    imports.register("axum", "Router");
    imports.register("axum", "Router");
    imports.register("axum::routing", "MethodFilter");
    assert_eq!(imports.symbols().count(), 2);
    assert_eq!(
        imports.import_block(),
        vec![
            "use axum::Router;".to_string(),
            "use axum::routing::MethodFilter;".to_string(),
        ]
    );
}

#[test]
fn test_import_block_independent_of_registration_order() {
    let mut forward = ImportRegistry::new();
    let mut backward = ImportRegistry::new();
    let symbols = [
        ("tower::util", "BoxCloneSyncService"),
        ("axum::extract", "Request"),
        ("std::sync", "Arc"),
        ("my::extract", "Request"),
    ];
    for (path, name) in symbols {
        forward.register(path, name);
    }
    for (path, name) in symbols.iter().rev() {
        backward.register(*path, *name);
    }
    assert_eq!(forward.import_block(), backward.import_block());
    let block = forward.import_block();
    let mut sorted = block.clone();
    sorted.sort();
    assert_eq!(block, sorted);
}

#[test]
fn test_import_collision_aliases() {
    let mut imports = ImportRegistry::new();
    let axum_route = imports.register("axum::routing", "Route");
    let other_route = imports.register("my::routing", "Route");
    assert_eq!(imports.local_name(&axum_route).as_deref(), Some("Route"));
    assert_eq!(
        imports.local_name(&other_route).as_deref(),
        Some("RoutingRoute")
    );
    assert!(imports
        .import_block()
        .contains(&"use my::routing::Route as RoutingRoute;".to_string()));
}

#[test]
fn test_import_reserved_name_aliases_every_symbol() {
    let mut imports = ImportRegistry::new();
    imports.reserve("Route");
    let axum_route = imports.register("axum::routing", "Route");
    let other_route = imports.register("my::routing", "Route");
    assert_eq!(
        imports.local_name(&axum_route).as_deref(),
        Some("RoutingRoute")
    );
    assert_eq!(
        imports.local_name(&other_route).as_deref(),
        Some("RoutingRoute2")
    );
    assert_eq!(imports.local_name(&Symbol::new("x", "Y")), None);
}

#[test]
fn test_service_names() {
    let names = ServiceNames::new("pet-store");
    assert_eq!(names.crate_ident, "pet_store");
    assert_eq!(names.service, "PetStoreService");
    assert_eq!(names.handler, "PetStoreHandler");
    assert_eq!(names.middleware, "PetStoreMiddleware");
}

#[test]
fn test_artifact_paths() {
    let paths: Vec<String> = ArtifactKind::ALL
        .iter()
        .map(|k| k.relative_path("admiral").to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        paths,
        vec![
            "admiral.rs",
            "gen/interface.rs",
            "gen/bootstrap.rs",
            "cmd/main.rs",
            "Cargo.toml"
        ]
    );
    assert!(!ArtifactKind::DependencyManifest.is_source());
    assert!(ArtifactKind::Entrypoint.is_source());
}

#[test]
fn test_interface_contract() {
    let interface = &rendered(&admiral())[1];
    assert!(interface.starts_with("//! Service contract of `admiral`."));
    assert!(interface.contains("use axum::extract::Request;"));
    assert!(interface.contains("use tower::util::BoxCloneSyncService;"));
    assert!(interface.contains(
        "pub type RequestHandler = BoxCloneSyncService<Request, Response, Infallible>;"
    ));
    assert!(interface.contains("pub trait AdmiralService: AdmiralHandler + AdmiralMiddleware {}"));
    assert!(interface
        .contains("impl<T: AdmiralHandler + AdmiralMiddleware> AdmiralService for T {}"));
    assert!(interface.contains("pub trait AdmiralHandler: Send + Sync + 'static {"));
    assert!(interface.contains("    fn root(&self) -> RequestHandler;"));
    assert!(interface.contains("    fn create_ship(&self) -> RequestHandler;"));
    assert!(interface.contains("pub trait AdmiralMiddleware: Send + Sync + 'static {"));
    assert!(interface.contains("    fn logger_mw(&self, next: RequestHandler) -> RequestHandler;"));
    assert!(interface
        .contains("    /// Root request handler: Responds to GET requests on the root URI"));
    assert!(interface.contains("    /// Serves `POST, PUT /ships`."));
}

#[test]
fn test_service_stub() {
    let stub = &rendered(&admiral())[0];
    assert!(stub.starts_with("//! admiral: Fleet status service\n"));
    assert!(stub.contains("pub mod gen {\n    pub mod bootstrap;\n    pub mod interface;\n}"));
    assert!(stub.contains("#[derive(Debug, Clone, Copy, Default)]\npub struct Server;"));
    assert!(stub.contains("use crate::gen::interface::AdmiralHandler;"));
    assert!(stub.contains("use tower::ServiceExt;"));
    assert!(stub.contains("use axum::response::IntoResponse;"));
    assert!(stub.contains("impl AdmiralHandler for Server {"));
    assert!(stub.contains("    fn root(&self) -> RequestHandler {"));
    assert!(stub.contains("let message = \"Root is not implemented yet\";"));
    assert!(stub.contains(
        "BoxCloneSyncService::new(service_fn(move |_request: Request| async move {"
    ));
    assert!(stub.contains(
        "Ok::<_, Infallible>((StatusCode::NOT_IMPLEMENTED, message).into_response())"
    ));
    assert!(stub.contains("impl AdmiralMiddleware for Server {"));
    assert!(stub.contains("    fn logger_mw(&self, next: RequestHandler) -> RequestHandler {"));
    assert!(stub.contains("let next = next.clone();"));
    assert!(stub.contains("next.oneshot(request).await"));
}

#[test]
fn test_bootstrap_router() {
    let bootstrap = &rendered(&admiral())[2];
    assert!(bootstrap.contains("pub struct Service<S> {\n    router: Router,\n    service_impl: Arc<S>,\n}"));
    assert!(bootstrap.contains("impl<S: AdmiralService> Service<S> {"));
    assert!(bootstrap.contains("pub fn new(service: S) -> Self {"));
    assert!(bootstrap.contains("pub fn into_router(self) -> Router {"));
    assert!(bootstrap
        .contains("fn routes<S: AdmiralService>(mut router: Router, service: &S) -> Router {"));
    assert!(bootstrap.contains("path: \"/ships\","));
    assert!(bootstrap.contains("methods: Some(MethodFilter::POST.or(MethodFilter::PUT)),"));
    assert!(bootstrap.contains("strict_slash: true,"));
    assert!(bootstrap.contains("handler: <S as AdmiralHandler>::create_ship(service),"));
    assert!(bootstrap.contains(
        "        let route = match endpoint.methods {\n\
         \x20           Some(methods) => on_service(methods, endpoint.handler),\n\
         \x20           None => any_service(endpoint.handler),\n\
         \x20       };\n\
         \x20       router = router.route(endpoint.path, route);\n"
    ));
    assert!(bootstrap.contains("if endpoint.strict_slash && endpoint.path != \"/\" {"));
    assert!(bootstrap.contains("None => any(redirect_to_canonical),"));
    assert!(bootstrap
        .contains("router = router.route(&toggle_trailing_slash(endpoint.path), redirect);"));
    assert!(bootstrap.contains("let mws: Vec<MiddlewareFn<S>> = vec![\n"));
    assert!(bootstrap.contains("<S as AdmiralMiddleware>::logger_mw,"));
    assert!(bootstrap.contains("for mw in mws.into_iter().rev() {"));
    assert!(bootstrap.contains(
        "router = router.layer(layer_fn(move |inner: Route| mw(&service, BoxCloneSyncService::new(inner))));"
    ));
    assert!(bootstrap.contains("type MiddlewareFn<S> = fn(&S, RequestHandler) -> RequestHandler;"));
    assert!(bootstrap.contains("path.strip_suffix('/').map_or_else(|| format!(\"{path}/\"), str::to_string)"));
    assert!(bootstrap.contains("async fn redirect_to_canonical(uri: Uri) -> Redirect {"));
    assert!(bootstrap.contains("let path = toggle_trailing_slash(uri.path());"));
    assert!(bootstrap.contains(
        "Some(query) => Redirect::permanent(&format!(\"{path}?{query}\")),"
    ));
    assert!(bootstrap.contains("None => Redirect::permanent(&path),"));
}

#[test]
fn test_root_never_redirects() {
    let bootstrap = &rendered(&admiral())[2];
    let root = position(bootstrap, "path: \"/\",");
    let flag = root + bootstrap[root..].find("strict_slash:").unwrap();
    assert!(bootstrap[flag..].starts_with("strict_slash: false,"));
}

#[test]
fn test_route_without_methods_is_a_fallback() {
    let mut desc = ServiceDescriptor::base(Info::new("admiral"));
    desc.add_route(Route::new("/ships", "ShipFallback")).unwrap();
    desc.add_route(Route::new("/ships", "ListShips").method(HttpMethod::Get))
        .unwrap();
    let files = rendered(&desc);

    let bootstrap = &files[2];
    assert!(bootstrap.contains("methods: None,"));
    assert!(bootstrap.contains("methods: Some(MethodFilter::GET),"));
    assert!(bootstrap.contains("methods: Option<MethodFilter>,"));

    let interface = &files[1];
    assert!(interface
        .contains("/// Serves `/ships` for every method no other route on the path lists."));
}

#[test]
fn test_second_fallback_on_a_path_is_not_routed() {
    let mut desc = ServiceDescriptor::base(Info::new("admiral"));
    desc.add_route(Route::new("/ships", "First")).unwrap();
    desc.add_route(Route::new("/ships", "Second")).unwrap();
    let files = rendered(&desc);

    let bootstrap = &files[2];
    assert!(bootstrap.contains("<S as AdmiralHandler>::first(service)"));
    assert!(!bootstrap.contains("<S as AdmiralHandler>::second(service)"));

    // still part of the contract, and implemented by the stub
    assert!(files[1].contains("fn second(&self) -> RequestHandler;"));
    assert!(files[1].contains("Not routed: `First` already answers every method on this path."));
    assert!(files[0].contains("fn second(&self) -> RequestHandler {"));
}

#[test]
fn test_strict_slash_yields_to_declared_variant() {
    let mut desc = ServiceDescriptor::base(Info::new("slashy"));
    desc.add_route(
        Route::new("/x", "Plain")
            .method(HttpMethod::Get)
            .strict_slash(true),
    )
    .unwrap();
    desc.add_route(Route::new("/x/", "Slashed").method(HttpMethod::Get))
        .unwrap();
    desc.add_route(
        Route::new("/y", "Other")
            .method(HttpMethod::Get)
            .strict_slash(true),
    )
    .unwrap();
    desc.add_route(Route::new("/y/", "OtherPost").method(HttpMethod::Post))
        .unwrap();
    let files = rendered(&desc);

    let bootstrap = &files[2];
    let flags: Vec<&str> = bootstrap
        .lines()
        .filter_map(|l| l.trim().strip_prefix("strict_slash: "))
        .filter(|flag| *flag != "bool,")
        .collect();
    // /x/ is taken for GET; /y/ only for POST, so GET /y/ still redirects
    assert_eq!(flags, vec!["false,", "false,", "true,", "false,"]);

    let interface = &files[1];
    assert!(interface.contains(
        "The trailing-slash variant of the path is routed on its own and does not redirect here."
    ));
}

#[test]
fn test_fallback_redirect_yields_to_declared_fallback() {
    let mut desc = ServiceDescriptor::base(Info::new("slashy"));
    desc.add_route(Route::new("/x", "Plain").strict_slash(true))
        .unwrap();
    desc.add_route(Route::new("/x/", "Slashed")).unwrap();
    let bootstrap = &rendered(&desc)[2];
    assert!(!bootstrap.contains("strict_slash: true,"));
}

#[test]
fn test_multiline_info_stays_in_doc_comments() {
    let mut desc = ServiceDescriptor::base(
        Info::new("admiral").with_summary("line one\nfn broken() {"),
    );
    desc.add_route(
        Route::new("/", "Root")
            .method(HttpMethod::Get)
            .info(Info::new("Root\nstill root").with_summary("first\r\nsecond")),
    )
    .unwrap();
    desc.add_middleware(Middleware::new("LoggerMw").info(Info::new("Logs\nrequests")))
        .unwrap();

    for text in rendered(&desc).iter().take(4) {
        for line in text.lines() {
            let code = line.trim_start();
            assert!(
                !code.starts_with("fn broken")
                    && !code.starts_with("still root")
                    && !code.starts_with("second")
                    && !code.starts_with("requests"),
                "doc text leaked into code: {line:?}"
            );
        }
    }

    let files = rendered(&desc);
    assert!(files[0].starts_with("//! admiral: line one\n//! fn broken() {\n"));
    assert!(files[1].contains("    /// Root\n    /// still root: first\n    /// second\n"));
    assert!(files[1].contains("    /// Logs\n    /// requests\n"));
}

#[test]
fn test_routes_follow_descriptor_order() {
    let mut desc = ServiceDescriptor::base(Info::new("admiral"));
    for (path, handler) in [("/c", "Charlie"), ("/a", "Alpha"), ("/b", "Bravo")] {
        desc.add_route(Route::new(path, handler).method(HttpMethod::Get))
            .unwrap();
    }
    let bootstrap = &rendered(&desc)[2];
    let c = position(bootstrap, "<S as AdmiralHandler>::charlie");
    let a = position(bootstrap, "<S as AdmiralHandler>::alpha");
    let b = position(bootstrap, "<S as AdmiralHandler>::bravo");
    assert!(c < a && a < b);
}

#[test]
fn test_middleware_registration_order_by_priority() {
    let mut desc = ServiceDescriptor::base(Info::new("admiral"));
    for (name, priority) in [("P1", 1), ("P5", 5), ("P3", 3)] {
        desc.add_middleware(Middleware::new(name).priority(priority))
            .unwrap();
    }
    let bootstrap = &rendered(&desc)[2];
    let p5 = position(bootstrap, "<S as AdmiralMiddleware>::p5");
    let p3 = position(bootstrap, "<S as AdmiralMiddleware>::p3");
    let p1 = position(bootstrap, "<S as AdmiralMiddleware>::p1");
    assert!(p5 < p3 && p3 < p1);

    // The interface keeps descriptor order.
    let interface = &rendered(&desc)[1];
    let p1 = position(interface, "fn p1(");
    let p5 = position(interface, "fn p5(");
    assert!(p1 < p5);
}

#[test]
fn test_equal_priority_keeps_insertion_order() {
    let mut desc = ServiceDescriptor::base(Info::new("admiral"));
    desc.add_middleware(Middleware::new("First").priority(2))
        .unwrap();
    desc.add_middleware(Middleware::new("Second").priority(2))
        .unwrap();
    desc.add_middleware(Middleware::new("Top").priority(9))
        .unwrap();
    let bootstrap = &rendered(&desc)[2];
    let top = position(bootstrap, "<S as AdmiralMiddleware>::top");
    let first = position(bootstrap, "<S as AdmiralMiddleware>::first");
    let second = position(bootstrap, "<S as AdmiralMiddleware>::second");
    assert!(top < first && first < second);
}

#[test]
fn test_entrypoint() {
    let desc = ServiceDescriptor::base(Info::new("pet-store"));
    let main = &rendered(&desc)[3];
    assert!(main.contains("use pet_store::Server;"));
    assert!(main.contains("use pet_store::gen::bootstrap::Service;"));
    assert!(main.contains("use tokio::net::TcpListener;"));
    assert!(main.contains("const DEFAULT_ADDRESS: &str = \"0.0.0.0:8080\";"));
    assert!(main.contains("#[tokio::main]\nasync fn main() -> std::io::Result<()> {"));
    assert!(main.contains("let service = Service::new(Server::default());"));
    assert!(main.contains("let listener = TcpListener::bind(DEFAULT_ADDRESS).await?;"));
    assert!(main.contains("serve(listener, service.into_router()).await\n"));
}

#[test]
fn test_dependency_manifest() {
    let manifest = &rendered(&admiral())[4];
    assert!(manifest.starts_with(MANIFEST_HEADER));
    let value: toml::Value = toml::from_str(manifest).unwrap();
    assert_eq!(value["package"]["name"].as_str(), Some("admiral"));
    assert_eq!(value["package"]["edition"].as_str(), Some("2021"));
    assert_eq!(
        value["package"]["description"].as_str(),
        Some("Fleet status service")
    );
    assert_eq!(value["lib"]["path"].as_str(), Some("admiral.rs"));
    assert_eq!(value["bin"][0]["path"].as_str(), Some("cmd/main.rs"));
    assert_eq!(value["dependencies"]["axum"].as_str(), Some("0.8.4"));
    let tokio_features = value["dependencies"]["tokio"]["features"]
        .as_array()
        .unwrap();
    assert!(tokio_features.iter().any(|f| f.as_str() == Some("macros")));
    assert_eq!(
        value["dependencies"]["tower"]["version"].as_str(),
        Some("0.5.2")
    );
}

#[test]
fn test_manifest_omits_empty_description() {
    let manifest = dependency_manifest(&ServiceDescriptor::base(Info::new("admiral")));
    assert!(manifest.package.description.is_none());
    let text = render_manifest(&manifest).unwrap();
    assert!(!text.contains("description"));
}

#[test]
fn test_empty_descriptor_renders() {
    let desc = ServiceDescriptor::base(Info::new("admiral"));
    let files = rendered(&desc);
    assert_eq!(files.len(), 5);

    let stub = &files[0];
    assert!(stub.contains("impl AdmiralHandler for Server {}"));
    assert!(stub.contains("impl AdmiralMiddleware for Server {}"));
    assert!(!stub.contains("IntoResponse"));
    assert!(!stub.contains("ServiceExt"));
    assert!(!stub.contains("service_fn"));

    let interface = &files[1];
    assert!(interface.contains("pub trait AdmiralHandler: Send + Sync + 'static {}"));

    let bootstrap = &files[2];
    assert!(bootstrap.contains("let endpoints: Vec<Endpoint> = vec![];"));
    assert!(bootstrap.contains("let mws: Vec<MiddlewareFn<S>> = vec![];"));
    assert!(bootstrap
        .contains("fn routes<S: AdmiralService>(mut router: Router, _service: &S) -> Router {"));
}

#[test]
fn test_render_is_deterministic() {
    let desc = admiral();
    assert_eq!(rendered(&desc), rendered(&desc));
}

#[test]
fn test_stub_and_interface_method_names_agree() {
    let artifacts = synthesize(&admiral());

    fn trait_methods(file: &SourceFile, name: &str) -> Vec<String> {
        file.items
            .iter()
            .find_map(|item| match item {
                Item::Trait {
                    name: n, methods, ..
                } if n == name => Some(methods.iter().map(|m| m.name.clone()).collect()),
                _ => None,
            })
            .unwrap()
    }

    fn impl_methods(file: &SourceFile, trait_name: &str) -> Vec<String> {
        file.items
            .iter()
            .find_map(|item| match item {
                Item::Impl {
                    trait_ty: Some(Type::Qual(symbol, _)),
                    methods,
                    ..
                } if symbol.name == trait_name => {
                    Some(methods.iter().map(|m| m.sig.name.clone()).collect())
                }
                _ => None,
            })
            .unwrap()
    }

    for capability in ["AdmiralHandler", "AdmiralMiddleware"] {
        assert_eq!(
            trait_methods(&artifacts.interface_contract, capability),
            impl_methods(&artifacts.service_stub, capability)
        );
    }
}

#[test]
fn test_keyword_handler_names_are_escaped() {
    let mut desc = ServiceDescriptor::base(Info::new("admiral"));
    desc.add_route(Route::new("/type", "Type").method(HttpMethod::Get))
        .unwrap();
    let files = rendered(&desc);
    assert!(files[1].contains("fn r#type(&self) -> RequestHandler;"));
    assert!(files[0].contains("fn r#type(&self) -> RequestHandler {"));
    assert!(files[2].contains("<S as AdmiralHandler>::r#type(service)"));
}

#[test]
fn test_match_renders_one_arm_per_line() {
    let mut file = SourceFile::new();
    file.push(Item::Fn(
        FnSig::new("pick")
            .param(Param::new("value", Type::Local("Option".to_string(), vec![local_ty("u8")])))
            .returns(local_ty("bool"))
            .body(vec![Stmt::Expr(Expr::Match {
                scrutinee: Box::new(ident("value")),
                arms: vec![
                    MatchArm::new("Some", Expr::Lit(Lit::Bool(true))).binding("_inner"),
                    MatchArm::new("None", Expr::Lit(Lit::Bool(false))),
                ],
            })]),
    ));
    assert_eq!(
        render_source(&file).unwrap(),
        "fn pick(value: Option<u8>) -> bool {\n    match value {\n        Some(_inner) => true,\n        None => false,\n    }\n}\n"
    );
}

#[test]
fn test_comment_lines_are_split() {
    let mut file = SourceFile::new();
    file.push(Item::Fn(
        FnSig::new("noop").body(vec![Stmt::Comment("first\nsecond".to_string())]),
    ));
    assert_eq!(
        render_source(&file).unwrap(),
        "fn noop() {\n    // first\n    // second\n}\n"
    );
}

#[test]
fn test_multiline_description_becomes_doc_lines() {
    let mut desc = ServiceDescriptor::base(Info::new("admiral"));
    desc.add_route(
        Route::new("/", "Root")
            .method(HttpMethod::Get)
            .info(Info::new("Root").with_description("First line\nSecond line")),
    )
    .unwrap();
    let interface = &rendered(&desc)[1];
    assert!(interface.contains("    /// First line\n    /// Second line\n"));
}

#[test]
fn test_string_literals_are_escaped() {
    let mut file = SourceFile::new();
    file.push(Item::Const {
        doc: Vec::new(),
        vis: Vis::Private,
        name: "GREETING".to_string(),
        ty: Type::Ref(Box::new(Type::Local("str".to_string(), Vec::new()))),
        value: Expr::Lit(Lit::Str("say \"hi\"\n".to_string())),
    });
    let text = render_source(&file).unwrap();
    assert_eq!(text, "const GREETING: &str = \"say \\\"hi\\\"\\n\";\n");
}

#[test]
fn test_unregistered_symbol_is_rejected() {
    let mut file = SourceFile::new();
    file.push(Item::TypeAlias {
        doc: Vec::new(),
        vis: Vis::Pub,
        name: "Handler".to_string(),
        generics: Vec::new(),
        ty: Type::Qual(Symbol::new("axum::routing", "Route"), Vec::new()),
    });
    match render_source(&file) {
        Err(RenderError::UnregisteredSymbol(path)) => assert_eq!(path, "axum::routing::Route"),
        other => panic!("expected an unregistered symbol, got {other:?}"),
    }
}

#[test]
fn test_invalid_identifier_is_rejected() {
    let mut file = SourceFile::new();
    file.push(Item::Fn(FnSig::new("not valid").body(Vec::new())));
    assert!(matches!(
        render_source(&file),
        Err(RenderError::InvalidIdentifier(name)) if name == "not valid"
    ));
}

#[test]
fn test_duplicate_trait_member_is_rejected() {
    let mut file = SourceFile::new();
    file.push(Item::Trait {
        doc: Vec::new(),
        vis: Vis::Pub,
        name: "Twice".to_string(),
        supertraits: Vec::new(),
        methods: vec![FnSig::new("same"), FnSig::new("same")],
    });
    assert!(matches!(
        render_source(&file),
        Err(RenderError::DuplicateMember { owner, member }) if owner == "Twice" && member == "same"
    ));
}

//! Descriptor → statement trees.
//!
//! Every artifact is built independently from the same borrowed descriptor.
//! Method names in the interface contract, the service stub and the bootstrap
//! router all come from [`method_name`], which keeps them in agreement
//! without any cross-artifact check.

use super::artifact::Artifacts;
use super::ast::{
    call, doc_lines, field, ident, lit_str, local_ty, method, reference, Attr, BinOp, Expr,
    Field, FnDecl, FnSig, GenericParam, Item, Lit, MatchArm, Param, Receiver, SourceFile, Stmt,
    Type, Vis,
};
use super::manifest::dependency_manifest;
use super::naming::{crate_ident, method_name, title_case};
use crate::descriptor::{HttpMethod, Info, Middleware, Route, ServiceDescriptor};
use tracing::debug;

/// Address the generated entrypoint listens on.
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";

/// Concrete service type declared by the service stub.
pub const SERVER_TYPE: &str = "Server";

/// Router wrapper declared by the bootstrap.
pub const ROUTER_TYPE: &str = "Service";

/// Type-erased handler alias declared by the interface contract.
pub const REQUEST_HANDLER: &str = "RequestHandler";

const INTERFACE_MODULE: &str = "crate::gen::interface";

/// Names derived from the project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceNames {
    pub project: String,
    pub crate_ident: String,
    /// `<Title>Service`, the composed capability.
    pub service: String,
    /// `<Title>Handler`, one method per route.
    pub handler: String,
    /// `<Title>Middleware`, one method per middleware.
    pub middleware: String,
}

impl ServiceNames {
    pub fn new(project: &str) -> Self {
        let title = title_case(project);
        ServiceNames {
            project: project.to_string(),
            crate_ident: crate_ident(project),
            service: format!("{title}Service"),
            handler: format!("{title}Handler"),
            middleware: format!("{title}Middleware"),
        }
    }
}

/// Builds the five artifact trees for `desc`.
pub fn synthesize(desc: &ServiceDescriptor) -> Artifacts {
    let names = ServiceNames::new(&desc.info.name);
    debug!(
        project = %names.project,
        routes = desc.routes().len(),
        middlewares = desc.middlewares().len(),
        "synthesizing artifacts"
    );
    Artifacts {
        service_stub: service_stub(desc, &names),
        interface_contract: interface_contract(desc, &names),
        bootstrap_router: bootstrap_router(desc, &names),
        entrypoint: entrypoint(&names),
        dependency_manifest: dependency_manifest(desc),
    }
}

fn info_doc(info: &Info, fallback: &str) -> Vec<String> {
    let name = info.name.trim();
    let summary = info.summary.trim();
    let mut doc = vec![match (name.is_empty(), summary.is_empty()) {
        (false, false) => format!("{name}: {summary}"),
        (true, false) => summary.to_string(),
        (false, true) => name.to_string(),
        (true, true) => fallback.to_string(),
    }];
    let description = info.description.trim();
    if !description.is_empty() {
        doc.push(String::new());
        doc.extend(doc_lines(description));
    }
    doc
}

/// How the bootstrap registers one route of the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Wiring {
    /// Earlier route on the same path that already answers every method.
    shadowed_by: Option<String>,
    /// The trailing-slash variant of the path redirects to the route.
    redirect: bool,
}

/// Adds a trailing slash to `path`, or removes the one it has.
fn toggle_trailing_slash(path: &str) -> String {
    path.strip_suffix('/')
        .map_or_else(|| format!("{path}/"), str::to_string)
}

/// Two registrations on one path that axum refuses to merge: both answer
/// every method, or both list a common method.
fn overlaps(methods: &[HttpMethod], other: &Route) -> bool {
    if methods.is_empty() {
        other.serves_every_method()
    } else {
        methods.iter().any(|m| other.accepts(*m))
    }
}

/// One entry per route, in descriptor order.
fn wiring(desc: &ServiceDescriptor) -> Vec<Wiring> {
    let routes = desc.routes();
    let shadowed: Vec<Option<String>> = routes
        .iter()
        .enumerate()
        .map(|(i, route)| {
            if !route.serves_every_method() {
                return None;
            }
            routes[..i]
                .iter()
                .find(|r| r.path == route.path && r.serves_every_method())
                .map(|r| r.handler_name.clone())
        })
        .collect();

    routes
        .iter()
        .zip(&shadowed)
        .map(|(route, shadowed_by)| {
            let redirect = shadowed_by.is_none()
                && route.strict_slash
                && route.path != "/"
                && !toggled_path_taken(route, routes, &shadowed);
            Wiring {
                shadowed_by: shadowed_by.clone(),
                redirect,
            }
        })
        .collect()
}

/// A redirect from the toggled path would collide with a route registered
/// there.
fn toggled_path_taken(route: &Route, routes: &[Route], shadowed: &[Option<String>]) -> bool {
    let toggled = toggle_trailing_slash(&route.path);
    routes
        .iter()
        .zip(shadowed)
        .filter(|(r, s)| s.is_none() && r.path == toggled)
        .any(|(r, _)| overlaps(&route.http_methods, r))
}

fn route_doc(route: &Route, wiring: &Wiring) -> Vec<String> {
    let mut doc = info_doc(&route.info, &route.handler_name);
    doc.push(String::new());
    if route.serves_every_method() {
        doc.push(format!(
            "Serves `{}` for every method no other route on the path lists.",
            route.path
        ));
    } else {
        let methods: Vec<&str> = route.http_methods.iter().map(|m| m.as_str()).collect();
        doc.push(format!("Serves `{} {}`.", methods.join(", "), route.path));
    }
    if let Some(other) = &wiring.shadowed_by {
        doc.push(format!(
            "Not routed: `{other}` already answers every method on this path."
        ));
    } else if wiring.redirect {
        doc.push("The trailing-slash variant of the path redirects here.".to_string());
    } else if route.strict_slash && route.path != "/" {
        doc.push(
            "The trailing-slash variant of the path is routed on its own and does not redirect here."
                .to_string(),
        );
    }
    doc
}

fn middleware_doc(mw: &Middleware) -> Vec<String> {
    let mut doc = info_doc(&mw.info, &mw.handler_name);
    doc.push(String::new());
    if mw.applies_to_all() {
        doc.push(format!("Priority {}. Applies to every route.", mw.priority));
    } else {
        let paths: Vec<String> = mw.paths.iter().map(|p| format!("`{p}`")).collect();
        doc.push(format!(
            "Priority {}. Declared for {}; the generated router wraps every route.",
            mw.priority,
            paths.join(", ")
        ));
    }
    doc
}

fn comments(lines: &[&str]) -> Vec<Stmt> {
    lines.iter().map(|l| Stmt::Comment(l.to_string())).collect()
}

fn let_(name: &str, value: Expr) -> Stmt {
    Stmt::Let {
        name: name.to_string(),
        mutable: false,
        ty: None,
        value,
    }
}

fn let_typed(name: &str, ty: Type, value: Expr) -> Stmt {
    Stmt::Let {
        name: name.to_string(),
        mutable: false,
        ty: Some(ty),
        value,
    }
}

fn self_field(name: &str) -> Expr {
    field(ident("self"), name)
}

fn service_stub(desc: &ServiceDescriptor, names: &ServiceNames) -> SourceFile {
    let mut file = SourceFile::new();
    file.doc = info_doc(&desc.info, &names.project);
    file.declare(SERVER_TYPE);
    file.declare("gen");

    let submodule = |name: &str| Item::Mod {
        doc: Vec::new(),
        vis: Vis::Pub,
        name: name.to_string(),
        body: None,
    };
    file.push(Item::Mod {
        doc: Vec::new(),
        vis: Vis::Pub,
        name: "gen".to_string(),
        body: Some(vec![submodule("bootstrap"), submodule("interface")]),
    });

    file.push(Item::Struct {
        doc: vec![
            format!(
                "{SERVER_TYPE} is the concrete implementation of [`gen::interface::{}`].",
                names.service
            ),
            String::new(),
            "It provides the handler capability through one method per route and".to_string(),
            "the middleware capability through one method per middleware.".to_string(),
        ],
        attrs: vec![Attr::Derive(
            ["Debug", "Clone", "Copy", "Default"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
        )],
        vis: Vis::Pub,
        name: SERVER_TYPE.to_string(),
        generics: Vec::new(),
        fields: None,
    });

    let handler_trait = file.qual_ty(INTERFACE_MODULE, &names.handler, Vec::new());
    let route_methods: Vec<FnDecl> = desc
        .routes()
        .iter()
        .zip(&wiring(desc))
        .map(|(route, wiring)| route_stub(&mut file, route, wiring))
        .collect();
    file.push(Item::Impl {
        doc: Vec::new(),
        generics: Vec::new(),
        trait_ty: Some(handler_trait),
        self_ty: local_ty(SERVER_TYPE),
        methods: route_methods,
    });

    let middleware_trait = file.qual_ty(INTERFACE_MODULE, &names.middleware, Vec::new());
    let mw_methods: Vec<FnDecl> = desc
        .middlewares()
        .iter()
        .map(|mw| middleware_stub(&mut file, mw))
        .collect();
    file.push(Item::Impl {
        doc: Vec::new(),
        generics: Vec::new(),
        trait_ty: Some(middleware_trait),
        self_ty: local_ty(SERVER_TYPE),
        methods: mw_methods,
    });

    file
}

fn route_stub(file: &mut SourceFile, route: &Route, wiring: &Wiring) -> FnDecl {
    let handler_ty = file.qual_ty(INTERFACE_MODULE, REQUEST_HANDLER, Vec::new());
    let request_ty = file.qual_ty("axum::extract", "Request", Vec::new());
    let infallible = file.qual_ty("std::convert", "Infallible", Vec::new());
    let not_implemented = file.qual_member("axum::http", "StatusCode", "NOT_IMPLEMENTED");
    let boxed = file.qual_member("tower::util", "BoxCloneSyncService", "new");
    let service_fn = file.qual("tower", "service_fn");
    file.use_trait("axum::response", "IntoResponse");

    let ok = Expr::Turbofish(Box::new(ident("Ok")), vec![Type::Infer, infallible]);
    let response = method(
        Expr::Tuple(vec![not_implemented, ident("message")]),
        "into_response",
        Vec::new(),
    );
    let handler = Expr::Closure {
        is_move: true,
        params: vec![Param::new("_request", request_ty)],
        body: Box::new(Expr::Async {
            is_move: true,
            body: vec![Stmt::Expr(call(ok, vec![response]))],
        }),
    };

    let mut body = comments(&[
        "Anything you add here runs once, while the router is being built.",
        "The returned handler can use these values by moving them into its",
        "closure.",
    ]);
    body.push(Stmt::Blank);
    body.push(let_(
        "message",
        lit_str(format!("{} is not implemented yet", route.handler_name)),
    ));
    body.push(Stmt::Expr(call(boxed, vec![call(service_fn, vec![handler])])));

    FnSig::new(method_name(&route.handler_name))
        .doc(route_doc(route, wiring))
        .receiver(Receiver::Ref)
        .returns(handler_ty)
        .body(body)
}

fn middleware_stub(file: &mut SourceFile, mw: &Middleware) -> FnDecl {
    let handler_ty = file.qual_ty(INTERFACE_MODULE, REQUEST_HANDLER, Vec::new());
    let request_ty = file.qual_ty("axum::extract", "Request", Vec::new());
    let boxed = file.qual_member("tower::util", "BoxCloneSyncService", "new");
    let service_fn = file.qual("tower", "service_fn");
    file.use_trait("tower", "ServiceExt");

    let forward = Expr::Closure {
        is_move: true,
        params: vec![Param::new("request", request_ty)],
        body: Box::new(Expr::Block(vec![
            let_("next", method(ident("next"), "clone", Vec::new())),
            Stmt::Expr(Expr::Async {
                is_move: true,
                body: vec![Stmt::Expr(Expr::Await(Box::new(method(
                    ident("next"),
                    "oneshot",
                    vec![ident("request")],
                ))))],
            }),
        ])),
    };

    let mut body = comments(&[
        "Anything you add here runs once, while the router is being built.",
        "Code placed before `oneshot` sees the request on its way in; code",
        "after the `.await` sees the response on its way out.",
    ]);
    body.push(Stmt::Blank);
    body.push(Stmt::Expr(call(boxed, vec![call(service_fn, vec![forward])])));

    FnSig::new(method_name(&mw.handler_name))
        .doc(middleware_doc(mw))
        .receiver(Receiver::Ref)
        .param(Param::new("next", handler_ty.clone()))
        .returns(handler_ty)
        .body(body)
}

fn interface_contract(desc: &ServiceDescriptor, names: &ServiceNames) -> SourceFile {
    let mut file = SourceFile::new();
    file.doc = vec![
        format!("Service contract of `{}`.", names.project),
        String::new(),
        "Regenerated from the descriptor on every run; change the descriptor, not".to_string(),
        "this file.".to_string(),
    ];
    for name in [
        REQUEST_HANDLER,
        names.service.as_str(),
        names.handler.as_str(),
        names.middleware.as_str(),
    ] {
        file.declare(name);
    }

    let request = file.qual_ty("axum::extract", "Request", Vec::new());
    let response = file.qual_ty("axum::response", "Response", Vec::new());
    let infallible = file.qual_ty("std::convert", "Infallible", Vec::new());
    let boxed = file.qual_ty(
        "tower::util",
        "BoxCloneSyncService",
        vec![request, response, infallible],
    );
    file.push(Item::TypeAlias {
        doc: vec![
            "A type-erased, cloneable request handler.".to_string(),
            String::new(),
            "Route handlers return one; middlewares take the next handler of the".to_string(),
            "chain and return the handler wrapping it.".to_string(),
        ],
        vis: Vis::Pub,
        name: REQUEST_HANDLER.to_string(),
        generics: Vec::new(),
        ty: boxed,
    });

    let capabilities = vec![local_ty(&names.handler), local_ty(&names.middleware)];
    file.push(Item::Trait {
        doc: vec![
            format!(
                "{} encapsulates the handler capability, which holds all the methods",
                names.service
            ),
            "called by the router, and the middleware capability, which holds all".to_string(),
            "the middlewares wrapped around it.".to_string(),
        ],
        vis: Vis::Pub,
        name: names.service.clone(),
        supertraits: capabilities.clone(),
        methods: Vec::new(),
    });
    file.push(Item::Impl {
        doc: Vec::new(),
        generics: vec![GenericParam::new("T", capabilities)],
        trait_ty: Some(local_ty(&names.service)),
        self_ty: local_ty("T"),
        methods: Vec::new(),
    });

    let handler_ty = local_ty(REQUEST_HANDLER);
    let thread_safe = vec![local_ty("Send"), local_ty("Sync"), Type::Static];

    file.push(Item::Trait {
        doc: vec![
            format!(
                "{} is the handler capability. Every route of the descriptor adds",
                names.handler
            ),
            "one method returning the handler for that route.".to_string(),
        ],
        vis: Vis::Pub,
        name: names.handler.clone(),
        supertraits: thread_safe.clone(),
        methods: desc
            .routes()
            .iter()
            .zip(&wiring(desc))
            .map(|(route, wiring)| {
                FnSig::new(method_name(&route.handler_name))
                    .doc(route_doc(route, wiring))
                    .receiver(Receiver::Ref)
                    .returns(handler_ty.clone())
            })
            .collect(),
    });

    file.push(Item::Trait {
        doc: vec![
            format!(
                "{} is the middleware capability. Every middleware of the",
                names.middleware
            ),
            "descriptor adds one method wrapping the next handler of the chain.".to_string(),
        ],
        vis: Vis::Pub,
        name: names.middleware.clone(),
        supertraits: thread_safe,
        methods: desc
            .middlewares()
            .iter()
            .map(|mw| {
                FnSig::new(method_name(&mw.handler_name))
                    .doc(middleware_doc(mw))
                    .receiver(Receiver::Ref)
                    .param(Param::new("next", handler_ty.clone()))
                    .returns(handler_ty.clone())
            })
            .collect(),
    });

    file
}

/// `Some(MethodFilter::A.or(MethodFilter::B))`, or `None` for a route
/// serving every method.
fn method_filter(file: &mut SourceFile, methods: &[HttpMethod]) -> Expr {
    let mut filters = methods
        .iter()
        .map(|m| file.qual_member("axum::routing", "MethodFilter", m.as_str()));
    let Some(first) = filters.next() else {
        return ident("None");
    };
    let rest: Vec<Expr> = filters.collect();
    let filter = rest
        .into_iter()
        .fold(first, |acc, filter| method(acc, "or", vec![filter]));
    call(ident("Some"), vec![filter])
}

fn bootstrap_router(desc: &ServiceDescriptor, names: &ServiceNames) -> SourceFile {
    let mut file = SourceFile::new();
    file.doc = vec![
        format!("Router bootstrap of `{}`.", names.project),
        String::new(),
        "Regenerated from the descriptor on every run; change the descriptor, not".to_string(),
        "this file.".to_string(),
    ];
    for name in [
        ROUTER_TYPE,
        "Endpoint",
        "MiddlewareFn",
        "routes",
        "middlewares",
        "toggle_trailing_slash",
        "redirect_to_canonical",
    ] {
        file.declare(name);
    }

    let router_ty = file.qual_ty("axum", "Router", Vec::new());
    let handler_ty = file.qual_ty(INTERFACE_MODULE, REQUEST_HANDLER, Vec::new());
    let service_trait = file.qual_ty(INTERFACE_MODULE, &names.service, Vec::new());
    let arc_s = file.qual_ty("std::sync", "Arc", vec![local_ty("S")]);
    let bound = GenericParam::new("S", vec![service_trait.clone()]);

    file.push(Item::Struct {
        doc: vec![
            format!("{ROUTER_TYPE} is the value exposed to serve HTTP traffic."),
            String::new(),
            "It owns the router built from the descriptor and the service".to_string(),
            "implementation its routes and middlewares were taken from.".to_string(),
        ],
        attrs: Vec::new(),
        vis: Vis::Pub,
        name: ROUTER_TYPE.to_string(),
        generics: vec![GenericParam::new("S", Vec::new())],
        fields: Some(vec![
            Field {
                doc: Vec::new(),
                vis: Vis::Private,
                name: "router".to_string(),
                ty: router_ty.clone(),
            },
            Field {
                doc: Vec::new(),
                vis: Vis::Private,
                name: "service_impl".to_string(),
                ty: arc_s.clone(),
            },
        ]),
    });

    let method_filter_ty = file.qual_ty("axum::routing", "MethodFilter", Vec::new());
    file.push(Item::Struct {
        doc: vec![
            "Endpoint holds the path, the handler called when that path is hit,".to_string(),
            "and the methods it serves.".to_string(),
        ],
        attrs: Vec::new(),
        vis: Vis::Private,
        name: "Endpoint".to_string(),
        generics: Vec::new(),
        fields: Some(vec![
            Field {
                doc: Vec::new(),
                vis: Vis::Private,
                name: "path".to_string(),
                ty: Type::StaticRef(Box::new(local_ty("str"))),
            },
            Field {
                doc: vec!["`None` serves every method.".to_string()],
                vis: Vis::Private,
                name: "methods".to_string(),
                ty: Type::Local("Option".to_string(), vec![method_filter_ty]),
            },
            Field {
                doc: Vec::new(),
                vis: Vis::Private,
                name: "strict_slash".to_string(),
                ty: local_ty("bool"),
            },
            Field {
                doc: Vec::new(),
                vis: Vis::Private,
                name: "handler".to_string(),
                ty: handler_ty.clone(),
            },
        ]),
    });

    file.push(Item::TypeAlias {
        doc: vec!["A middleware method of the service implementation.".to_string()],
        vis: Vis::Private,
        name: "MiddlewareFn".to_string(),
        generics: vec![GenericParam::new("S", Vec::new())],
        ty: Type::FnPtr(
            vec![Type::Ref(Box::new(local_ty("S"))), handler_ty.clone()],
            Box::new(handler_ty),
        ),
    });

    let arc_new = file.qual_member("std::sync", "Arc", "new");
    let router_new = file.qual_member("axum", "Router", "new");
    let new = FnSig::new("new")
        .doc([
            "New wraps `service`, registering its routes and then its middlewares.".to_string(),
        ])
        .public()
        .param(Param::new("service", local_ty("S")))
        .returns(local_ty("Self"))
        .body(vec![
            let_("service_impl", call(arc_new, vec![ident("service")])),
            let_(
                "router",
                call(
                    ident("routes"),
                    vec![
                        call(router_new, Vec::new()),
                        method(ident("service_impl"), "as_ref", Vec::new()),
                    ],
                ),
            ),
            let_(
                "router",
                call(
                    ident("middlewares"),
                    vec![ident("router"), reference(ident("service_impl"))],
                ),
            ),
            Stmt::Blank,
            Stmt::Expr(Expr::StructLit {
                name: local_ty("Self"),
                fields: vec![
                    ("router".to_string(), ident("router")),
                    ("service_impl".to_string(), ident("service_impl")),
                ],
            }),
        ]);
    let service_impl = FnSig::new("service_impl")
        .doc(["The implementation the routes and middlewares were taken from.".to_string()])
        .public()
        .receiver(Receiver::Ref)
        .returns(Type::Ref(Box::new(local_ty("S"))))
        .body(vec![Stmt::Expr(method(
            self_field("service_impl"),
            "as_ref",
            Vec::new(),
        ))]);
    let into_router = FnSig::new("into_router")
        .doc([
            "Hands over the router every request is delegated to, ready for".to_string(),
            "`axum::serve`.".to_string(),
        ])
        .public()
        .receiver(Receiver::Value)
        .returns(router_ty.clone())
        .body(vec![Stmt::Expr(self_field("router"))]);
    file.push(Item::Impl {
        doc: Vec::new(),
        generics: vec![bound.clone()],
        trait_ty: None,
        self_ty: Type::Local(ROUTER_TYPE.to_string(), vec![local_ty("S")]),
        methods: vec![new, service_impl, into_router],
    });

    let routes = routes_fn(&mut file, desc, names, &bound, &router_ty);
    file.push(Item::Fn(routes));
    let middlewares = middlewares_fn(&mut file, desc, names, &bound, &router_ty, arc_s);
    file.push(Item::Fn(middlewares));
    file.push(Item::Fn(toggle_trailing_slash_fn()));
    let redirect = redirect_fn(&mut file);
    file.push(Item::Fn(redirect));

    file
}

fn routes_fn(
    file: &mut SourceFile,
    desc: &ServiceDescriptor,
    names: &ServiceNames,
    bound: &GenericParam,
    router_ty: &Type,
) -> FnDecl {
    let endpoints: Vec<Expr> = desc
        .routes()
        .iter()
        .zip(wiring(desc))
        .filter(|(_, wiring)| wiring.shadowed_by.is_none())
        .map(|(route, wiring)| {
            let handler_trait = file.qual_ty(INTERFACE_MODULE, &names.handler, Vec::new());
            let methods = method_filter(file, &route.http_methods);
            Expr::StructLit {
                name: local_ty("Endpoint"),
                fields: vec![
                    ("path".to_string(), lit_str(route.path.clone())),
                    ("methods".to_string(), methods),
                    (
                        "strict_slash".to_string(),
                        Expr::Lit(Lit::Bool(wiring.redirect)),
                    ),
                    (
                        "handler".to_string(),
                        call(
                            Expr::TraitItem {
                                self_ty: local_ty("S"),
                                trait_ty: handler_trait,
                                item: method_name(&route.handler_name),
                            },
                            vec![ident("service")],
                        ),
                    ),
                ],
            }
        })
        .collect();
    let service_param = if endpoints.is_empty() {
        "_service"
    } else {
        "service"
    };

    let on_service = file.qual("axum::routing", "on_service");
    let any_service = file.qual("axum::routing", "any_service");
    let on = file.qual("axum::routing", "on");
    let any = file.qual("axum::routing", "any");
    let endpoint = |name: &str| field(ident("endpoint"), name);
    let by_methods = |some: Expr, none: Expr| Expr::Match {
        scrutinee: Box::new(endpoint("methods")),
        arms: vec![
            MatchArm::new("Some", some).binding("methods"),
            MatchArm::new("None", none),
        ],
    };

    let register = vec![
        let_(
            "route",
            by_methods(
                call(on_service, vec![ident("methods"), endpoint("handler")]),
                call(any_service, vec![endpoint("handler")]),
            ),
        ),
        Stmt::Assign(
            ident("router"),
            method(
                ident("router"),
                "route",
                vec![endpoint("path"), ident("route")],
            ),
        ),
    ];
    let redirect = Stmt::If {
        cond: Expr::Binary(
            Box::new(endpoint("strict_slash")),
            BinOp::And,
            Box::new(Expr::Binary(
                Box::new(endpoint("path")),
                BinOp::Ne,
                Box::new(lit_str("/")),
            )),
        ),
        then: vec![
            let_(
                "redirect",
                by_methods(
                    call(on, vec![ident("methods"), ident("redirect_to_canonical")]),
                    call(any, vec![ident("redirect_to_canonical")]),
                ),
            ),
            Stmt::Assign(
                ident("router"),
                method(
                    ident("router"),
                    "route",
                    vec![
                        reference(call(
                            ident("toggle_trailing_slash"),
                            vec![endpoint("path")],
                        )),
                        ident("redirect"),
                    ],
                ),
            ),
        ],
    };

    FnSig::new("routes")
        .doc([
            "routes registers every route, in descriptor order. A route listing".to_string(),
            "no methods becomes the fallback for the methods its path leaves free.".to_string(),
        ])
        .generic(bound.clone())
        .param(Param::new("router", router_ty.clone()).mutable())
        .param(Param::new(service_param, Type::Ref(Box::new(local_ty("S")))))
        .returns(router_ty.clone())
        .body(vec![
            let_typed(
                "endpoints",
                Type::Local("Vec".to_string(), vec![local_ty("Endpoint")]),
                Expr::Macro("vec".to_string(), endpoints),
            ),
            Stmt::Blank,
            Stmt::For {
                pat: "endpoint".to_string(),
                iter: ident("endpoints"),
                body: register.into_iter().chain([redirect]).collect(),
            },
            Stmt::Blank,
            Stmt::Expr(ident("router")),
        ])
}

fn middlewares_fn(
    file: &mut SourceFile,
    desc: &ServiceDescriptor,
    names: &ServiceNames,
    bound: &GenericParam,
    router_ty: &Type,
    arc_s: Type,
) -> FnDecl {
    let ordered: Vec<Expr> = desc
        .middlewares_by_priority()
        .into_iter()
        .map(|mw| {
            let middleware_trait = file.qual_ty(INTERFACE_MODULE, &names.middleware, Vec::new());
            Expr::TraitItem {
                self_ty: local_ty("S"),
                trait_ty: middleware_trait,
                item: method_name(&mw.handler_name),
            }
        })
        .collect();

    let arc_clone = file.qual_member("std::sync", "Arc", "clone");
    let layer_fn = file.qual("tower::layer", "layer_fn");
    let boxed = file.qual_member("tower::util", "BoxCloneSyncService", "new");
    let route_ty = file.qual_ty("axum::routing", "Route", Vec::new());

    let wrap = Expr::Closure {
        is_move: true,
        params: vec![Param::new("inner", route_ty)],
        body: Box::new(call(
            ident("mw"),
            vec![reference(ident("service")), call(boxed, vec![ident("inner")])],
        )),
    };

    FnSig::new("middlewares")
        .doc([
            "middlewares wraps the router in every middleware, highest priority first.".to_string(),
        ])
        .generic(bound.clone())
        .param(Param::new("router", router_ty.clone()).mutable())
        .param(Param::new("service", Type::Ref(Box::new(arc_s))))
        .returns(router_ty.clone())
        .body(vec![
            let_typed(
                "mws",
                Type::Local(
                    "Vec".to_string(),
                    vec![Type::Local("MiddlewareFn".to_string(), vec![local_ty("S")])],
                ),
                Expr::Macro("vec".to_string(), ordered),
            ),
            Stmt::Blank,
            Stmt::Comment("A layer wraps everything added before it, so the list is applied in".to_string()),
            Stmt::Comment("reverse to make its first entry the outermost one.".to_string()),
            Stmt::For {
                pat: "mw".to_string(),
                iter: method(
                    method(ident("mws"), "into_iter", Vec::new()),
                    "rev",
                    Vec::new(),
                ),
                body: vec![
                    let_("service", call(arc_clone, vec![ident("service")])),
                    Stmt::Assign(
                        ident("router"),
                        method(ident("router"), "layer", vec![call(layer_fn, vec![wrap])]),
                    ),
                ],
            },
            Stmt::Blank,
            Stmt::Expr(ident("router")),
        ])
}

fn toggle_trailing_slash_fn() -> FnDecl {
    let strip = method(
        ident("path"),
        "strip_suffix",
        vec![Expr::Lit(Lit::Char('/'))],
    );
    let append = Expr::Closure {
        is_move: false,
        params: Vec::new(),
        body: Box::new(Expr::Macro(
            "format".to_string(),
            vec![lit_str("{path}/")],
        )),
    };
    FnSig::new("toggle_trailing_slash")
        .doc(["Adds a trailing slash to `path`, or removes the one it has.".to_string()])
        .param(Param::new("path", Type::Ref(Box::new(local_ty("str")))))
        .returns(local_ty("String"))
        .body(vec![Stmt::Expr(method(
            strip,
            "map_or_else",
            vec![append, ident("str::to_string")],
        ))])
}

fn redirect_fn(file: &mut SourceFile) -> FnDecl {
    let uri_ty = file.qual_ty("axum::http", "Uri", Vec::new());
    let redirect_ty = file.qual_ty("axum::response", "Redirect", Vec::new());
    let permanent = file.qual_member("axum::response", "Redirect", "permanent");
    FnSig::new("redirect_to_canonical")
        .doc([
            "Answers the trailing-slash variant of a strict-slash route with a".to_string(),
            "permanent redirect to the registered path, keeping the query.".to_string(),
        ])
        .asyncness()
        .param(Param::new("uri", uri_ty))
        .returns(redirect_ty)
        .body(vec![
            let_(
                "path",
                call(
                    ident("toggle_trailing_slash"),
                    vec![method(ident("uri"), "path", Vec::new())],
                ),
            ),
            Stmt::Expr(Expr::Match {
                scrutinee: Box::new(method(ident("uri"), "query", Vec::new())),
                arms: vec![
                    MatchArm::new(
                        "Some",
                        call(
                            permanent.clone(),
                            vec![reference(Expr::Macro(
                                "format".to_string(),
                                vec![lit_str("{path}?{query}")],
                            ))],
                        ),
                    )
                    .binding("query"),
                    MatchArm::new("None", call(permanent, vec![reference(ident("path"))])),
                ],
            }),
        ])
}

fn entrypoint(names: &ServiceNames) -> SourceFile {
    let mut file = SourceFile::new();
    file.doc = vec![format!("Process entrypoint of `{}`.", names.project)];
    file.declare("DEFAULT_ADDRESS");
    file.declare("main");

    let server_default = file.qual_member(&names.crate_ident, SERVER_TYPE, "default");
    let service_new = file.qual_member(
        &format!("{}::gen::bootstrap", names.crate_ident),
        ROUTER_TYPE,
        "new",
    );
    let bind = file.qual_member("tokio::net", "TcpListener", "bind");
    let serve = file.qual("axum", "serve");

    file.push(Item::Const {
        doc: vec!["Address the service listens on.".to_string()],
        vis: Vis::Private,
        name: "DEFAULT_ADDRESS".to_string(),
        ty: Type::Ref(Box::new(local_ty("str"))),
        value: lit_str(DEFAULT_ADDRESS),
    });

    let main = FnSig::new("main")
        .attr(Attr::Path("tokio::main".to_string()))
        .asyncness()
        .returns(Type::Local(
            "std::io::Result".to_string(),
            vec![Type::Tuple(Vec::new())],
        ))
        .body(vec![
            let_("service", call(service_new, vec![call(server_default, Vec::new())])),
            let_(
                "listener",
                Expr::Try(Box::new(Expr::Await(Box::new(call(
                    bind,
                    vec![ident("DEFAULT_ADDRESS")],
                ))))),
            ),
            Stmt::Blank,
            Stmt::Comment("A listener failure ends the process; it is never retried.".to_string()),
            Stmt::Expr(Expr::Await(Box::new(call(
                serve,
                vec![
                    ident("listener"),
                    method(ident("service"), "into_router", Vec::new()),
                ],
            )))),
        ]);
    file.push(Item::Fn(main));

    file
}

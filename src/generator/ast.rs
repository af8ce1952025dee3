//! Statement tree the synthesis engine builds and the renderer walks.
//!
//! Nodes are plain data. Anything that names an item from another module is a
//! [`Symbol`] obtained from the artifact's [`ImportRegistry`], which is how the
//! renderer knows what to import and under which local name.

use super::imports::{ImportRegistry, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lit {
    Str(String),
    Char(char),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A name in scope without an import: a generic parameter, a local item,
    /// a prelude type or an absolute path such as `std::io::Result`.
    Local(String, Vec<Type>),
    /// An imported item.
    Qual(Symbol, Vec<Type>),
    Ref(Box<Type>),
    /// `&'static T`
    StaticRef(Box<Type>),
    FnPtr(Vec<Type>, Box<Type>),
    Tuple(Vec<Type>),
    /// `_`
    Infer,
    /// `'static`
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    And,
    Eq,
    Ne,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Lit(Lit),
    /// Local identifier or path (`router`, `str::to_string`).
    Ident(String),
    /// Imported item, optionally followed by an associated item
    /// (`Router::new`, `StatusCode::NOT_IMPLEMENTED`).
    Qual(Symbol, Option<String>),
    /// `<SelfTy as Trait>::item`
    TraitItem {
        self_ty: Type,
        trait_ty: Type,
        item: String,
    },
    /// `base::<A, B>`
    Turbofish(Box<Expr>, Vec<Type>),
    Call(Box<Expr>, Vec<Expr>),
    MethodCall {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    Field(Box<Expr>, String),
    Ref(Box<Expr>),
    Binary(Box<Expr>, BinOp, Box<Expr>),
    Tuple(Vec<Expr>),
    Closure {
        is_move: bool,
        params: Vec<Param>,
        body: Box<Expr>,
    },
    Async {
        is_move: bool,
        body: Block,
    },
    Await(Box<Expr>),
    Try(Box<Expr>),
    StructLit {
        name: Type,
        fields: Vec<(String, Expr)>,
    },
    Macro(String, Vec<Expr>),
    Block(Block),
    Match {
        scrutinee: Box<Expr>,
        arms: Vec<MatchArm>,
    },
}

/// `Variant(binding) => body` or `Variant => body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchArm {
    pub variant: String,
    pub binding: Option<String>,
    pub body: Expr,
}

impl MatchArm {
    pub fn new(variant: impl Into<String>, body: Expr) -> Self {
        MatchArm {
            variant: variant.into(),
            binding: None,
            body,
        }
    }

    pub fn binding(mut self, name: impl Into<String>) -> Self {
        self.binding = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Let {
        name: String,
        mutable: bool,
        ty: Option<Type>,
        value: Expr,
    },
    Assign(Expr, Expr),
    /// Expression without a trailing semicolon (block value).
    Expr(Expr),
    Comment(String),
    Blank,
    For {
        pat: String,
        iter: Expr,
        body: Block,
    },
    If {
        cond: Expr,
        then: Block,
    },
}

pub type Block = Vec<Stmt>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vis {
    #[default]
    Private,
    Pub,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attr {
    Derive(Vec<String>),
    /// Attribute path such as `tokio::main`.
    Path(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub mutable: bool,
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Param {
            name: name.into(),
            mutable: false,
            ty,
        }
    }

    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParam {
    pub name: String,
    pub bounds: Vec<Type>,
}

impl GenericParam {
    pub fn new(name: impl Into<String>, bounds: Vec<Type>) -> Self {
        GenericParam {
            name: name.into(),
            bounds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Ref,
    Value,
}

/// Function signature, used bare inside traits and with a body elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FnSig {
    pub doc: Vec<String>,
    pub attrs: Vec<Attr>,
    pub vis: Vis,
    pub is_async: bool,
    pub name: String,
    pub generics: Vec<GenericParam>,
    pub receiver: Option<Receiver>,
    pub params: Vec<Param>,
    pub ret: Option<Type>,
}

impl FnSig {
    pub fn new(name: impl Into<String>) -> Self {
        FnSig {
            name: name.into(),
            ..FnSig::default()
        }
    }

    pub fn doc(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.doc.extend(lines);
        self
    }

    pub fn public(mut self) -> Self {
        self.vis = Vis::Pub;
        self
    }

    pub fn asyncness(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn attr(mut self, attr: Attr) -> Self {
        self.attrs.push(attr);
        self
    }

    pub fn generic(mut self, param: GenericParam) -> Self {
        self.generics.push(param);
        self
    }

    pub fn receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: Type) -> Self {
        self.ret = Some(ty);
        self
    }

    pub fn body(self, body: Block) -> FnDecl {
        FnDecl { sig: self, body }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnDecl {
    pub sig: FnSig,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub doc: Vec<String>,
    pub vis: Vis,
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// `mod name;` when `body` is `None`, an inline module otherwise.
    Mod {
        doc: Vec<String>,
        vis: Vis,
        name: String,
        body: Option<Vec<Item>>,
    },
    Struct {
        doc: Vec<String>,
        attrs: Vec<Attr>,
        vis: Vis,
        name: String,
        generics: Vec<GenericParam>,
        /// `None` declares a unit struct.
        fields: Option<Vec<Field>>,
    },
    TypeAlias {
        doc: Vec<String>,
        vis: Vis,
        name: String,
        generics: Vec<GenericParam>,
        ty: Type,
    },
    Const {
        doc: Vec<String>,
        vis: Vis,
        name: String,
        ty: Type,
        value: Expr,
    },
    Trait {
        doc: Vec<String>,
        vis: Vis,
        name: String,
        supertraits: Vec<Type>,
        methods: Vec<FnSig>,
    },
    Impl {
        doc: Vec<String>,
        generics: Vec<GenericParam>,
        trait_ty: Option<Type>,
        self_ty: Type,
        methods: Vec<FnDecl>,
    },
    Fn(FnDecl),
}

/// One generated Rust source file: inner docs, the registry its tree was
/// built against, and the items.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub doc: Vec<String>,
    pub imports: ImportRegistry,
    pub items: Vec<Item>,
}

impl SourceFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path::name` and returns it as an expression.
    pub fn qual(&mut self, path: &str, name: &str) -> Expr {
        Expr::Qual(self.imports.register(path, name), None)
    }

    /// Registers `path::name` and returns `Name::member`.
    pub fn qual_member(&mut self, path: &str, name: &str, member: &str) -> Expr {
        Expr::Qual(self.imports.register(path, name), Some(member.to_string()))
    }

    /// Registers `path::name` and returns it as a type.
    pub fn qual_ty(&mut self, path: &str, name: &str, generics: Vec<Type>) -> Type {
        Type::Qual(self.imports.register(path, name), generics)
    }

    /// Brings a trait into scope for method-call syntax.
    pub fn use_trait(&mut self, path: &str, name: &str) {
        self.imports.register(path, name);
    }

    /// Declares a local item name imports must not shadow.
    pub fn declare(&mut self, name: &str) {
        self.imports.reserve(name);
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }
}

pub fn ident(name: impl Into<String>) -> Expr {
    Expr::Ident(name.into())
}

pub fn lit_str(s: impl Into<String>) -> Expr {
    Expr::Lit(Lit::Str(s.into()))
}

pub fn call(func: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call(Box::new(func), args)
}

pub fn method(receiver: Expr, name: &str, args: Vec<Expr>) -> Expr {
    Expr::MethodCall {
        receiver: Box::new(receiver),
        method: name.to_string(),
        args,
    }
}

pub fn field(base: Expr, name: &str) -> Expr {
    Expr::Field(Box::new(base), name.to_string())
}

pub fn reference(expr: Expr) -> Expr {
    Expr::Ref(Box::new(expr))
}

pub fn local_ty(name: &str) -> Type {
    Type::Local(name.to_string(), Vec::new())
}

pub fn doc_lines(text: &str) -> Vec<String> {
    text.lines().map(|l| l.trim_end().to_string()).collect()
}

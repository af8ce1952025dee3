//! Statement tree → source text.
//!
//! Output is plain four-space indented Rust with no line-width handling;
//! `cargo fmt` owns the final layout. The renderer never decides names on its
//! own: imported items are spoken by the local name their registry resolved.

use super::artifact::{Artifact, ArtifactBody};
use super::ast::{
    Attr, BinOp, Block, Expr, Field, FnDecl, FnSig, GenericParam, Item, Lit, Param, Receiver,
    SourceFile, Stmt, Type, Vis,
};
use super::imports::Symbol;
use super::manifest::Manifest;
use super::naming::is_valid_identifier;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Failures here are defects of the synthesis engine, never user errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("symbol {0} is referenced but was never registered")]
    UnregisteredSymbol(String),
    #[error("{0:?} is not a valid identifier")]
    InvalidIdentifier(String),
    #[error("{owner} declares {member} more than once")]
    DuplicateMember { owner: String, member: String },
    #[error("failed to serialize the dependency manifest: {0}")]
    Manifest(#[from] toml::ser::Error),
}

pub const MANIFEST_HEADER: &str =
    "# Generated by seed. Dependency versions are pinned by the generator.";

const INDENT: &str = "    ";

/// Path segments that are keywords yet legal inside a path.
const PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

pub fn render(artifact: &Artifact) -> Result<String, RenderError> {
    match &artifact.body {
        ArtifactBody::Source(file) => render_source(file),
        ArtifactBody::Manifest(manifest) => render_manifest(manifest),
    }
}

/// Renders every artifact, stopping at the first failure.
pub fn render_all(artifacts: &[Artifact]) -> Result<Vec<String>, RenderError> {
    artifacts.iter().map(render).collect()
}

pub fn render_manifest(manifest: &Manifest) -> Result<String, RenderError> {
    let body = toml::to_string(manifest)?;
    Ok(format!("{MANIFEST_HEADER}\n\n{body}"))
}

pub fn render_source(file: &SourceFile) -> Result<String, RenderError> {
    let renderer = Renderer {
        names: file.imports.resolve(),
    };
    renderer.file(file)
}

struct Renderer {
    names: BTreeMap<Symbol, String>,
}

fn pad(indent: usize) -> String {
    INDENT.repeat(indent)
}

fn check_ident(name: &str) -> Result<&str, RenderError> {
    if is_valid_identifier(name) {
        Ok(name)
    } else {
        Err(RenderError::InvalidIdentifier(name.to_string()))
    }
}

fn check_path(path: &str) -> Result<&str, RenderError> {
    let valid = path
        .split("::")
        .all(|segment| PATH_KEYWORDS.contains(&segment) || is_valid_identifier(segment));
    if valid {
        Ok(path)
    } else {
        Err(RenderError::InvalidIdentifier(path.to_string()))
    }
}

fn check_unique<'a>(
    owner: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), RenderError> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(RenderError::DuplicateMember {
                owner: owner.to_string(),
                member: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Every entry may itself span several lines; each one gets its own marker.
fn doc_block(out: &mut String, marker: &str, lines: &[String], indent: usize) {
    for line in lines.iter().flat_map(|l| l.split('\n')) {
        let line = line.trim_end();
        out.push_str(&pad(indent));
        out.push_str(marker);
        if !line.is_empty() {
            out.push(' ');
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn vis(v: Vis) -> &'static str {
    match v {
        Vis::Private => "",
        Vis::Pub => "pub ",
    }
}

fn precedence(op: BinOp) -> u8 {
    match op {
        BinOp::And => 1,
        BinOp::Eq | BinOp::Ne => 2,
    }
}

impl Renderer {
    fn file(&self, file: &SourceFile) -> Result<String, RenderError> {
        let mut out = String::new();
        doc_block(&mut out, "//!", &file.doc, 0);
        if !file.doc.is_empty() {
            out.push('\n');
        }

        for symbol in file.imports.symbols() {
            check_path(&symbol.path)?;
            check_ident(&symbol.name)?;
        }
        let imports = file.imports.import_block();
        for line in &imports {
            out.push_str(line);
            out.push('\n');
        }
        if !imports.is_empty() {
            out.push('\n');
        }

        self.items(&mut out, &file.items, 0)?;
        Ok(out)
    }

    fn items(&self, out: &mut String, items: &[Item], indent: usize) -> Result<(), RenderError> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.item(out, item, indent)?;
        }
        Ok(())
    }

    fn item(&self, out: &mut String, item: &Item, indent: usize) -> Result<(), RenderError> {
        let p = pad(indent);
        match item {
            Item::Mod {
                doc,
                vis: v,
                name,
                body,
            } => {
                doc_block(out, "///", doc, indent);
                let name = check_ident(name)?;
                match body {
                    None => out.push_str(&format!("{p}{}mod {name};\n", vis(*v))),
                    Some(items) => {
                        out.push_str(&format!("{p}{}mod {name} {{\n", vis(*v)));
                        for item in items {
                            self.item(out, item, indent + 1)?;
                        }
                        out.push_str(&format!("{p}}}\n"));
                    }
                }
            }
            Item::Struct {
                doc,
                attrs,
                vis: v,
                name,
                generics,
                fields,
            } => {
                doc_block(out, "///", doc, indent);
                self.attrs(out, attrs, indent)?;
                let head = format!(
                    "{p}{}struct {}{}",
                    vis(*v),
                    check_ident(name)?,
                    self.generics(generics)?
                );
                match fields {
                    None => out.push_str(&format!("{head};\n")),
                    Some(fields) => {
                        check_unique(name, fields.iter().map(|f| f.name.as_str()))?;
                        out.push_str(&format!("{head} {{\n"));
                        for f in fields {
                            self.field_decl(out, f, indent + 1)?;
                        }
                        out.push_str(&format!("{p}}}\n"));
                    }
                }
            }
            Item::TypeAlias {
                doc,
                vis: v,
                name,
                generics,
                ty,
            } => {
                doc_block(out, "///", doc, indent);
                out.push_str(&format!(
                    "{p}{}type {}{} = {};\n",
                    vis(*v),
                    check_ident(name)?,
                    self.generics(generics)?,
                    self.ty(ty)?
                ));
            }
            Item::Const {
                doc,
                vis: v,
                name,
                ty,
                value,
            } => {
                doc_block(out, "///", doc, indent);
                out.push_str(&format!(
                    "{p}{}const {}: {} = {};\n",
                    vis(*v),
                    check_ident(name)?,
                    self.ty(ty)?,
                    self.expr(value, indent)?
                ));
            }
            Item::Trait {
                doc,
                vis: v,
                name,
                supertraits,
                methods,
            } => {
                check_unique(name, methods.iter().map(|m| m.name.as_str()))?;
                doc_block(out, "///", doc, indent);
                let bounds = self.bounds(supertraits)?;
                let head = format!("{p}{}trait {}{}", vis(*v), check_ident(name)?, bounds);
                if methods.is_empty() {
                    out.push_str(&format!("{head} {{}}\n"));
                } else {
                    out.push_str(&format!("{head} {{\n"));
                    for (i, sig) in methods.iter().enumerate() {
                        if i > 0 {
                            out.push('\n');
                        }
                        let sig = self.sig(out, sig, indent + 1)?;
                        out.push_str(&format!("{sig};\n"));
                    }
                    out.push_str(&format!("{p}}}\n"));
                }
            }
            Item::Impl {
                doc,
                generics,
                trait_ty,
                self_ty,
                methods,
            } => {
                let self_text = self.ty(self_ty)?;
                let head = match trait_ty {
                    Some(t) => format!(
                        "{p}impl{} {} for {self_text}",
                        self.generics(generics)?,
                        self.ty(t)?
                    ),
                    None => format!("{p}impl{} {self_text}", self.generics(generics)?),
                };
                check_unique(
                    head.trim(),
                    methods.iter().map(|m| m.sig.name.as_str()),
                )?;
                doc_block(out, "///", doc, indent);
                if methods.is_empty() {
                    out.push_str(&format!("{head} {{}}\n"));
                } else {
                    out.push_str(&format!("{head} {{\n"));
                    for (i, decl) in methods.iter().enumerate() {
                        if i > 0 {
                            out.push('\n');
                        }
                        self.fn_decl(out, decl, indent + 1)?;
                    }
                    out.push_str(&format!("{p}}}\n"));
                }
            }
            Item::Fn(decl) => self.fn_decl(out, decl, indent)?,
        }
        Ok(())
    }

    fn attrs(&self, out: &mut String, attrs: &[Attr], indent: usize) -> Result<(), RenderError> {
        for attr in attrs {
            let text = match attr {
                Attr::Derive(names) => {
                    for name in names {
                        check_path(name)?;
                    }
                    format!("derive({})", names.join(", "))
                }
                Attr::Path(path) => check_path(path)?.to_string(),
            };
            out.push_str(&format!("{}#[{text}]\n", pad(indent)));
        }
        Ok(())
    }

    fn field_decl(&self, out: &mut String, f: &Field, indent: usize) -> Result<(), RenderError> {
        doc_block(out, "///", &f.doc, indent);
        out.push_str(&format!(
            "{}{}{}: {},\n",
            pad(indent),
            vis(f.vis),
            check_ident(&f.name)?,
            self.ty(&f.ty)?
        ));
        Ok(())
    }

    /// Writes docs and attributes, returns the signature line without a
    /// terminator.
    fn sig(&self, out: &mut String, sig: &FnSig, indent: usize) -> Result<String, RenderError> {
        doc_block(out, "///", &sig.doc, indent);
        self.attrs(out, &sig.attrs, indent)?;

        let mut params: Vec<String> = Vec::new();
        match sig.receiver {
            Some(Receiver::Ref) => params.push("&self".to_string()),
            Some(Receiver::Value) => params.push("self".to_string()),
            None => {}
        }
        for param in &sig.params {
            params.push(self.param(param)?);
        }
        let ret = match &sig.ret {
            Some(ty) => format!(" -> {}", self.ty(ty)?),
            None => String::new(),
        };
        Ok(format!(
            "{}{}{}fn {}{}({}){ret}",
            pad(indent),
            vis(sig.vis),
            if sig.is_async { "async " } else { "" },
            check_ident(&sig.name)?,
            self.generics(&sig.generics)?,
            params.join(", ")
        ))
    }

    fn fn_decl(&self, out: &mut String, decl: &FnDecl, indent: usize) -> Result<(), RenderError> {
        let sig = self.sig(out, &decl.sig, indent)?;
        out.push_str(&sig);
        out.push(' ');
        out.push_str(&self.block(&decl.body, indent)?);
        out.push('\n');
        Ok(())
    }

    fn param(&self, param: &Param) -> Result<String, RenderError> {
        let name = check_ident(&param.name)?;
        let mutability = if param.mutable { "mut " } else { "" };
        Ok(format!("{mutability}{name}: {}", self.ty(&param.ty)?))
    }

    fn generics(&self, generics: &[GenericParam]) -> Result<String, RenderError> {
        if generics.is_empty() {
            return Ok(String::new());
        }
        let params = generics
            .iter()
            .map(|g| -> Result<String, RenderError> {
                Ok(format!("{}{}", check_ident(&g.name)?, self.bounds(&g.bounds)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("<{}>", params.join(", ")))
    }

    fn bounds(&self, bounds: &[Type]) -> Result<String, RenderError> {
        if bounds.is_empty() {
            return Ok(String::new());
        }
        Ok(format!(": {}", self.types(bounds, " + ")?))
    }

    fn types(&self, types: &[Type], sep: &str) -> Result<String, RenderError> {
        Ok(types
            .iter()
            .map(|t| self.ty(t))
            .collect::<Result<Vec<_>, _>>()?
            .join(sep))
    }

    fn type_args(&self, args: &[Type]) -> Result<String, RenderError> {
        if args.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("<{}>", self.types(args, ", ")?))
        }
    }

    fn symbol(&self, symbol: &Symbol) -> Result<&str, RenderError> {
        self.names
            .get(symbol)
            .map(String::as_str)
            .ok_or_else(|| RenderError::UnregisteredSymbol(symbol.full_path()))
    }

    fn ty(&self, ty: &Type) -> Result<String, RenderError> {
        Ok(match ty {
            Type::Local(name, args) => format!("{}{}", check_path(name)?, self.type_args(args)?),
            Type::Qual(symbol, args) => format!("{}{}", self.symbol(symbol)?, self.type_args(args)?),
            Type::Ref(inner) => format!("&{}", self.ty(inner)?),
            Type::StaticRef(inner) => format!("&'static {}", self.ty(inner)?),
            Type::FnPtr(params, ret) => {
                format!("fn({}) -> {}", self.types(params, ", ")?, self.ty(ret)?)
            }
            Type::Tuple(items) if items.len() == 1 => format!("({},)", self.types(items, ", ")?),
            Type::Tuple(items) => format!("({})", self.types(items, ", ")?),
            Type::Infer => "_".to_string(),
            Type::Static => "'static".to_string(),
        })
    }

    fn exprs(&self, exprs: &[Expr], indent: usize) -> Result<String, RenderError> {
        Ok(exprs
            .iter()
            .map(|e| self.expr(e, indent))
            .collect::<Result<Vec<_>, _>>()?
            .join(", "))
    }

    /// Renders `expr` starting mid-line; continuation lines are indented
    /// relative to `indent`.
    fn expr(&self, expr: &Expr, indent: usize) -> Result<String, RenderError> {
        Ok(match expr {
            Expr::Lit(lit) => match lit {
                Lit::Str(s) => format!("{s:?}"),
                Lit::Char(c) => format!("{c:?}"),
                Lit::Bool(b) => b.to_string(),
            },
            Expr::Ident(name) => check_path(name)?.to_string(),
            Expr::Qual(symbol, member) => match member {
                Some(member) => format!("{}::{}", self.symbol(symbol)?, check_ident(member)?),
                None => self.symbol(symbol)?.to_string(),
            },
            Expr::TraitItem {
                self_ty,
                trait_ty,
                item,
            } => format!(
                "<{} as {}>::{}",
                self.ty(self_ty)?,
                self.ty(trait_ty)?,
                check_ident(item)?
            ),
            Expr::Turbofish(base, args) => {
                format!("{}::<{}>", self.expr(base, indent)?, self.types(args, ", ")?)
            }
            Expr::Call(func, args) => format!(
                "{}({})",
                self.operand(func, indent)?,
                self.exprs(args, indent)?
            ),
            Expr::MethodCall {
                receiver,
                method,
                args,
            } => format!(
                "{}.{}({})",
                self.operand(receiver, indent)?,
                check_ident(method)?,
                self.exprs(args, indent)?
            ),
            Expr::Field(base, name) => {
                format!("{}.{}", self.operand(base, indent)?, check_ident(name)?)
            }
            Expr::Ref(inner) => format!("&{}", self.expr(inner, indent)?),
            Expr::Binary(lhs, op, rhs) => format!(
                "{} {} {}",
                self.binary_side(lhs, *op, indent)?,
                op.as_str(),
                self.binary_side(rhs, *op, indent)?
            ),
            Expr::Tuple(items) if items.len() == 1 => {
                format!("({},)", self.exprs(items, indent)?)
            }
            Expr::Tuple(items) => format!("({})", self.exprs(items, indent)?),
            Expr::Closure {
                is_move,
                params,
                body,
            } => {
                let params = params
                    .iter()
                    .map(|p| self.param(p))
                    .collect::<Result<Vec<_>, _>>()?;
                format!(
                    "{}|{}| {}",
                    if *is_move { "move " } else { "" },
                    params.join(", "),
                    self.expr(body, indent)?
                )
            }
            Expr::Async { is_move, body } => format!(
                "async {}{}",
                if *is_move { "move " } else { "" },
                self.block(body, indent)?
            ),
            Expr::Await(inner) => format!("{}.await", self.operand(inner, indent)?),
            Expr::Try(inner) => format!("{}?", self.operand(inner, indent)?),
            Expr::StructLit { name, fields } => {
                check_unique(&self.ty(name)?, fields.iter().map(|(f, _)| f.as_str()))?;
                let mut text = format!("{} {{\n", self.ty(name)?);
                for (field, value) in fields {
                    let field = check_ident(field)?;
                    let value = self.expr(value, indent + 1)?;
                    if value == field {
                        text.push_str(&format!("{}{field},\n", pad(indent + 1)));
                    } else {
                        text.push_str(&format!("{}{field}: {value},\n", pad(indent + 1)));
                    }
                }
                text.push_str(&format!("{}}}", pad(indent)));
                text
            }
            Expr::Macro(name, args) if name == "vec" => {
                if args.is_empty() {
                    "vec![]".to_string()
                } else {
                    let mut text = "vec![\n".to_string();
                    for arg in args {
                        text.push_str(&format!(
                            "{}{},\n",
                            pad(indent + 1),
                            self.expr(arg, indent + 1)?
                        ));
                    }
                    text.push_str(&format!("{}]", pad(indent)));
                    text
                }
            }
            Expr::Macro(name, args) => {
                format!("{}!({})", check_path(name)?, self.exprs(args, indent)?)
            }
            Expr::Block(body) => self.block(body, indent)?,
            Expr::Match { scrutinee, arms } => {
                let mut text = format!("match {} {{\n", self.expr(scrutinee, indent)?);
                for arm in arms {
                    let pattern = match &arm.binding {
                        Some(binding) => {
                            format!("{}({})", check_path(&arm.variant)?, check_ident(binding)?)
                        }
                        None => check_path(&arm.variant)?.to_string(),
                    };
                    text.push_str(&format!(
                        "{}{pattern} => {},\n",
                        pad(indent + 1),
                        self.expr(&arm.body, indent + 1)?
                    ));
                }
                text.push_str(&format!("{}}}", pad(indent)));
                text
            }
        })
    }

    /// Operand of a postfix or call form, parenthesized when it would
    /// otherwise bind wrongly.
    fn operand(&self, expr: &Expr, indent: usize) -> Result<String, RenderError> {
        let text = self.expr(expr, indent)?;
        Ok(match expr {
            Expr::Ref(_) | Expr::Binary(..) | Expr::Closure { .. } | Expr::Match { .. } => {
                format!("({text})")
            }
            _ => text,
        })
    }

    fn binary_side(&self, side: &Expr, parent: BinOp, indent: usize) -> Result<String, RenderError> {
        let text = self.expr(side, indent)?;
        Ok(match side {
            Expr::Binary(_, op, _) if precedence(*op) <= precedence(parent) => format!("({text})"),
            Expr::Closure { .. } => format!("({text})"),
            _ => text,
        })
    }

    /// `{ ... }` with the closing brace at `indent`.
    fn block(&self, body: &Block, indent: usize) -> Result<String, RenderError> {
        if body.is_empty() {
            return Ok("{}".to_string());
        }
        let mut text = "{\n".to_string();
        for stmt in body {
            self.stmt(&mut text, stmt, indent + 1)?;
        }
        text.push_str(&format!("{}}}", pad(indent)));
        Ok(text)
    }

    fn stmt(&self, out: &mut String, stmt: &Stmt, indent: usize) -> Result<(), RenderError> {
        let p = pad(indent);
        match stmt {
            Stmt::Let {
                name,
                mutable,
                ty,
                value,
            } => {
                let ty = match ty {
                    Some(ty) => format!(": {}", self.ty(ty)?),
                    None => String::new(),
                };
                out.push_str(&format!(
                    "{p}let {}{}{ty} = {};\n",
                    if *mutable { "mut " } else { "" },
                    check_ident(name)?,
                    self.expr(value, indent)?
                ));
            }
            Stmt::Assign(target, value) => out.push_str(&format!(
                "{p}{} = {};\n",
                self.expr(target, indent)?,
                self.expr(value, indent)?
            )),
            Stmt::Expr(expr) => out.push_str(&format!("{p}{}\n", self.expr(expr, indent)?)),
            Stmt::Comment(text) => {
                for line in text.split('\n') {
                    let line = line.trim_end();
                    if line.is_empty() {
                        out.push_str(&format!("{p}//\n"));
                    } else {
                        out.push_str(&format!("{p}// {line}\n"));
                    }
                }
            }
            Stmt::Blank => out.push('\n'),
            Stmt::For { pat, iter, body } => out.push_str(&format!(
                "{p}for {} in {} {}\n",
                check_ident(pat)?,
                self.expr(iter, indent)?,
                self.block(body, indent)?
            )),
            Stmt::If { cond, then } => out.push_str(&format!(
                "{p}if {} {}\n",
                self.expr(cond, indent)?,
                self.block(then, indent)?
            )),
        }
        Ok(())
    }
}

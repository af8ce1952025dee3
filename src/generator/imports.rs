//! Per-artifact registry of external symbols and the `use` block built from it.

use super::naming::title_case;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A qualified reference to an item exported by another module, e.g.
/// `axum::routing` / `MethodFilter`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    /// Module path the item lives in, without the item itself.
    pub path: String,
    /// Exported name of the item.
    pub name: String,
}

impl Symbol {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Symbol {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Full import path, `path::name`.
    pub fn full_path(&self) -> String {
        format!("{}::{}", self.path, self.name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.path, self.name)
    }
}

/// Collects every symbol an artifact references and decides the local name
/// each one is spoken by.
///
/// Names are resolved from the set of registered symbols only, never from
/// registration order, so the same set always yields the same import block.
#[derive(Debug, Clone, Default)]
pub struct ImportRegistry {
    symbols: BTreeSet<Symbol>,
    reserved: BTreeSet<String>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a reference to `path::name` and returns the symbol to embed in
    /// the statement tree. Registering the same path twice is a no-op.
    pub fn register(&mut self, path: impl Into<String>, name: impl Into<String>) -> Symbol {
        let symbol = Symbol::new(path, name);
        self.symbols.insert(symbol.clone());
        symbol
    }

    /// Marks `name` as declared by the artifact itself, so no import may use
    /// it as its local name.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    /// Registered symbols, ordered by module path then name.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Local name of every registered symbol.
    ///
    /// Within a group of symbols sharing an exported name, the one with the
    /// smallest full path keeps the bare name (unless the artifact reserved
    /// it); the others are aliased as `<ParentModule><Name>`.
    pub fn resolve(&self) -> BTreeMap<Symbol, String> {
        let mut groups: BTreeMap<&str, Vec<&Symbol>> = BTreeMap::new();
        for symbol in &self.symbols {
            groups.entry(symbol.name.as_str()).or_default().push(symbol);
        }

        let mut used: BTreeSet<String> = self.reserved.clone();
        used.extend(groups.keys().map(|name| name.to_string()));

        let mut resolved = BTreeMap::new();
        for (name, mut members) in groups {
            members.sort_by_key(|s| s.full_path());
            let mut members = members.into_iter();
            if !self.reserved.contains(name) {
                if let Some(first) = members.next() {
                    resolved.insert(first.clone(), name.to_string());
                }
            }
            for symbol in members {
                let alias = unique_alias(&mut used, symbol);
                resolved.insert(symbol.clone(), alias);
            }
        }
        resolved
    }

    /// Local name the renderer must emit for `symbol`.
    pub fn local_name(&self, symbol: &Symbol) -> Option<String> {
        if !self.symbols.contains(symbol) {
            return None;
        }
        self.resolve().remove(symbol)
    }

    /// `use` lines sorted by full import path.
    pub fn import_block(&self) -> Vec<String> {
        let mut lines: Vec<(String, String)> = self
            .resolve()
            .into_iter()
            .map(|(symbol, local)| {
                let full = symbol.full_path();
                let line = if local == symbol.name {
                    format!("use {full};")
                } else {
                    format!("use {full} as {local};")
                };
                (full, line)
            })
            .collect();
        lines.sort();
        lines.into_iter().map(|(_, line)| line).collect()
    }
}

fn unique_alias(used: &mut BTreeSet<String>, symbol: &Symbol) -> String {
    let parent = symbol.path.rsplit("::").next().unwrap_or_default();
    let base = format!("{}{}", title_case(parent), symbol.name);
    let mut alias = base.clone();
    let mut n = 2;
    while used.contains(&alias) {
        alias = format!("{base}{n}");
        n += 1;
    }
    used.insert(alias.clone());
    alias
}

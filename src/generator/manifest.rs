//! Dependency manifest (`Cargo.toml`) of the generated project.

use crate::descriptor::ServiceDescriptor;
use serde::Serialize;
use std::collections::BTreeMap;

/// Rust edition of the generated crate. `gen` is a module name there, which
/// rules out 2024.
pub const GENERATED_EDITION: &str = "2021";

pub const GENERATED_VERSION: &str = "0.1.0";

/// A dependency pinned by the generator, independent of the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedDependency {
    pub name: &'static str,
    pub version: &'static str,
    pub features: &'static [&'static str],
}

pub const PINNED_DEPENDENCIES: &[PinnedDependency] = &[
    PinnedDependency {
        name: "axum",
        version: "0.8.4",
        features: &[],
    },
    PinnedDependency {
        name: "tokio",
        version: "1.45.1",
        features: &["macros", "net", "rt-multi-thread"],
    },
    PinnedDependency {
        name: "tower",
        version: "0.5.2",
        features: &["util"],
    },
];

/// Dependency specification for Cargo.toml
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DependencySpec {
    /// Simple version string: "0.8.4"
    Version(String),
    /// Version plus features: { version = "1.45.1", features = ["macros"] }
    Full {
        version: String,
        features: Vec<String>,
    },
}

impl From<&PinnedDependency> for DependencySpec {
    fn from(dep: &PinnedDependency) -> Self {
        if dep.features.is_empty() {
            DependencySpec::Version(dep.version.to_string())
        } else {
            DependencySpec::Full {
                version: dep.version.to_string(),
                features: dep.features.iter().map(|f| f.to_string()).collect(),
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub edition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LibTarget {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BinTarget {
    pub name: String,
    pub path: String,
}

/// Abstract form of the manifest; the renderer serializes it with `toml`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Manifest {
    pub package: Package,
    pub lib: LibTarget,
    pub bin: Vec<BinTarget>,
    pub dependencies: BTreeMap<String, DependencySpec>,
}

/// Module identity comes from the descriptor; dependencies never do.
pub fn dependency_manifest(desc: &ServiceDescriptor) -> Manifest {
    let name = desc.info.name.clone();
    let summary = desc.info.summary.trim();
    Manifest {
        package: Package {
            name: name.clone(),
            version: GENERATED_VERSION.to_string(),
            edition: GENERATED_EDITION.to_string(),
            description: (!summary.is_empty()).then(|| summary.to_string()),
        },
        lib: LibTarget {
            path: format!("{name}.rs"),
        },
        bin: vec![BinTarget {
            path: "cmd/main.rs".to_string(),
            name,
        }],
        dependencies: PINNED_DEPENDENCIES
            .iter()
            .map(|dep| (dep.name.to_string(), DependencySpec::from(dep)))
            .collect(),
    }
}

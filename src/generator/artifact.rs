use super::ast::SourceFile;
use super::manifest::Manifest;
use std::fmt;
use std::path::PathBuf;

pub const CMD_FOLDER: &str = "cmd";
pub const GEN_FOLDER: &str = "gen";

/// The five files synthesized for every project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    ServiceStub,
    InterfaceContract,
    BootstrapRouter,
    Entrypoint,
    DependencyManifest,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::ServiceStub,
        ArtifactKind::InterfaceContract,
        ArtifactKind::BootstrapRouter,
        ArtifactKind::Entrypoint,
        ArtifactKind::DependencyManifest,
    ];

    /// Location of the artifact relative to the project root.
    pub fn relative_path(self, project_name: &str) -> PathBuf {
        match self {
            ArtifactKind::ServiceStub => PathBuf::from(format!("{project_name}.rs")),
            ArtifactKind::InterfaceContract => PathBuf::from(GEN_FOLDER).join("interface.rs"),
            ArtifactKind::BootstrapRouter => PathBuf::from(GEN_FOLDER).join("bootstrap.rs"),
            ArtifactKind::Entrypoint => PathBuf::from(CMD_FOLDER).join("main.rs"),
            ArtifactKind::DependencyManifest => PathBuf::from("Cargo.toml"),
        }
    }

    /// Whether the artifact is Rust source handed to the formatter.
    pub fn is_source(self) -> bool {
        !matches!(self, ArtifactKind::DependencyManifest)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactKind::ServiceStub => "service stub",
            ArtifactKind::InterfaceContract => "interface contract",
            ArtifactKind::BootstrapRouter => "bootstrap router",
            ArtifactKind::Entrypoint => "entrypoint",
            ArtifactKind::DependencyManifest => "dependency manifest",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub enum ArtifactBody {
    Source(SourceFile),
    Manifest(Manifest),
}

#[derive(Debug, Clone)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub body: ArtifactBody,
}

/// Output of synthesis: one abstract tree per artifact kind.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub service_stub: SourceFile,
    pub interface_contract: SourceFile,
    pub bootstrap_router: SourceFile,
    pub entrypoint: SourceFile,
    pub dependency_manifest: Manifest,
}

impl Artifacts {
    /// Artifacts in the fixed order they are rendered and written.
    pub fn into_vec(self) -> Vec<Artifact> {
        vec![
            Artifact {
                kind: ArtifactKind::ServiceStub,
                body: ArtifactBody::Source(self.service_stub),
            },
            Artifact {
                kind: ArtifactKind::InterfaceContract,
                body: ArtifactBody::Source(self.interface_contract),
            },
            Artifact {
                kind: ArtifactKind::BootstrapRouter,
                body: ArtifactBody::Source(self.bootstrap_router),
            },
            Artifact {
                kind: ArtifactKind::Entrypoint,
                body: ArtifactBody::Source(self.entrypoint),
            },
            Artifact {
                kind: ArtifactKind::DependencyManifest,
                body: ArtifactBody::Manifest(self.dependency_manifest),
            },
        ]
    }
}

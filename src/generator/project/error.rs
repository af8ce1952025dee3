use crate::descriptor::LoadError;
use crate::generator::artifact::ArtifactKind;
use crate::generator::render::RenderError;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(
        "invalid project name {0:?}: expected an ASCII letter followed by letters, digits, `_` or `-`, and not a Rust keyword"
    )]
    InvalidProjectName(String),
    #[error("project directory {} already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("`cargo fmt` failed in {} ({status})", dir.display())]
    Format { dir: PathBuf, status: ExitStatus },
    #[error("failed to run `{cargo_bin} fmt`")]
    FormatSpawn {
        cargo_bin: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to render the {kind}")]
    Render {
        kind: ArtifactKind,
        #[source]
        source: RenderError,
    },
    #[error("failed to load the descriptor")]
    Descriptor(#[from] LoadError),
    #[error("failed to serialize the descriptor")]
    Serialize(#[source] LoadError),
}

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::config::{ExistingPolicy, MaterializeConfig};
use super::error::ProjectError;
use super::format::format_project;
use crate::descriptor::ServiceDescriptor;
use crate::generator::artifact::{CMD_FOLDER, GEN_FOLDER};
use crate::generator::naming::is_valid_project_name;
use crate::generator::render::render;
use crate::generator::synthesis::synthesize;

/// File the descriptor is persisted to, next to the generated sources.
pub fn descriptor_file_name(project_name: &str) -> String {
    format!("{project_name}.yml")
}

/// Synthesize, render and write the project described by `desc` under
/// `<root>/<name>`, then format it.
///
/// Artifacts are rendered and written one at a time in a fixed order; the
/// first failure stops the run and leaves earlier files in place. A formatter
/// failure is reported only after every file, descriptor included, is on disk.
pub fn generate_project(
    desc: &ServiceDescriptor,
    config: &MaterializeConfig,
) -> Result<PathBuf, ProjectError> {
    let name = desc.info.name.as_str();
    if !is_valid_project_name(name) {
        return Err(ProjectError::InvalidProjectName(name.to_string()));
    }

    let base_dir = config.root.join(name);
    if base_dir.exists() {
        match config.existing {
            ExistingPolicy::Fail => return Err(ProjectError::AlreadyExists(base_dir)),
            ExistingPolicy::Overwrite => {
                warn!(dir = %base_dir.display(), "overwriting existing project");
            }
        }
    }

    create_dir(&base_dir, config)?;
    create_dir(&base_dir.join(GEN_FOLDER), config)?;
    create_dir(&base_dir.join(CMD_FOLDER), config)?;

    for artifact in synthesize(desc).into_vec() {
        let content = render(&artifact).map_err(|source| ProjectError::Render {
            kind: artifact.kind,
            source,
        })?;
        let path = base_dir.join(artifact.kind.relative_path(name));
        write_file(&path, &content, config)?;
        info!(artifact = %artifact.kind, path = %path.display(), "wrote artifact");
    }

    let descriptor_path = base_dir.join(descriptor_file_name(name));
    let yaml = desc.to_yaml().map_err(ProjectError::Serialize)?;
    write_file(&descriptor_path, &yaml, config)?;
    info!(path = %descriptor_path.display(), "wrote descriptor");

    if config.format {
        format_project(&base_dir, &config.cargo_bin)?;
    } else {
        debug!(dir = %base_dir.display(), "formatting skipped");
    }

    info!(
        project = %name,
        dir = %base_dir.display(),
        routes = desc.routes().len(),
        middlewares = desc.middlewares().len(),
        "project generated"
    );
    Ok(base_dir)
}

/// Load a descriptor file (YAML or JSON by extension) and generate from it.
pub fn generate_project_from_descriptor(
    descriptor_path: &Path,
    config: &MaterializeConfig,
) -> Result<PathBuf, ProjectError> {
    let desc = ServiceDescriptor::load(descriptor_path)?;
    debug!(path = %descriptor_path.display(), "descriptor loaded");
    generate_project(&desc, config)
}

fn create_dir(path: &Path, config: &MaterializeConfig) -> Result<(), ProjectError> {
    fs::create_dir_all(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    set_mode(path, config.dir_mode)
}

fn write_file(path: &Path, content: &str, config: &MaterializeConfig) -> Result<(), ProjectError> {
    fs::write(path, content).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    set_mode(path, config.file_mode)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), ProjectError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|source| {
        ProjectError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), ProjectError> {
    Ok(())
}

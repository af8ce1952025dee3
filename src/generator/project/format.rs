use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use super::error::ProjectError;

/// Run `<cargo_bin> fmt` inside the generated project. Files are never
/// touched when formatting fails; the caller only learns that it did.
pub fn format_project(dir: &Path, cargo_bin: &str) -> Result<(), ProjectError> {
    debug!(dir = %dir.display(), cargo = %cargo_bin, "running cargo fmt");
    let status = Command::new(cargo_bin)
        .arg("fmt")
        .current_dir(dir)
        .status()
        .map_err(|source| ProjectError::FormatSpawn {
            cargo_bin: cargo_bin.to_string(),
            source,
        })?;
    if !status.success() {
        return Err(ProjectError::Format {
            dir: dir.to_path_buf(),
            status,
        });
    }
    info!(dir = %dir.display(), "formatted project");
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn stub_cargo(dir: &Path, fmt_exit: i32) -> String {
        let stub = dir.join("cargo");
        fs::write(
            &stub,
            format!("#!/bin/sh\nif [ \"$1\" = \"fmt\" ]; then\n    exit {fmt_exit}\nfi\nexit 0\n"),
        )
        .unwrap();
        let mut perms = fs::metadata(&stub).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&stub, perms).unwrap();
        stub.to_string_lossy().into_owned()
    }

    #[test]
    fn test_format_project_noop() {
        let dir = tempfile::tempdir().unwrap();
        let cargo = stub_cargo(dir.path(), 0);
        assert!(format_project(dir.path(), &cargo).is_ok());
    }

    #[test]
    fn test_format_project_error() {
        let dir = tempfile::tempdir().unwrap();
        let cargo = stub_cargo(dir.path(), 1);
        match format_project(dir.path(), &cargo) {
            Err(ProjectError::Format { dir: failed, status }) => {
                assert_eq!(failed, dir.path());
                assert_eq!(status.code(), Some(1));
            }
            other => panic!("expected a format error, got {other:?}"),
        }
    }

    #[test]
    fn test_format_project_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-cargo");
        let err = format_project(dir.path(), &missing.to_string_lossy()).unwrap_err();
        assert!(matches!(err, ProjectError::FormatSpawn { .. }));
    }
}

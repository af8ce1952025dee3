use crate::runtime_config::RuntimeConfig;
use std::path::PathBuf;

pub const DEFAULT_DIR_MODE: u32 = 0o755;
pub const DEFAULT_FILE_MODE: u32 = 0o644;
pub const DEFAULT_CARGO_BIN: &str = "cargo";

/// What to do when the project directory is already there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingPolicy {
    /// Refuse and leave the directory alone.
    #[default]
    Fail,
    /// Write every artifact over whatever is there. Files the generator does
    /// not produce are kept.
    Overwrite,
}

/// Everything the materializer needs, built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeConfig {
    /// Parent directory; the project lands in `<root>/<name>`.
    pub root: PathBuf,
    /// Unix permission bits for created directories.
    pub dir_mode: u32,
    /// Unix permission bits for written files.
    pub file_mode: u32,
    pub existing: ExistingPolicy,
    /// Run `cargo fmt` once every file is written.
    pub format: bool,
    pub cargo_bin: String,
}

impl Default for MaterializeConfig {
    fn default() -> Self {
        MaterializeConfig {
            root: PathBuf::from("."),
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: DEFAULT_FILE_MODE,
            existing: ExistingPolicy::Fail,
            format: true,
            cargo_bin: DEFAULT_CARGO_BIN.to_string(),
        }
    }
}

impl MaterializeConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        MaterializeConfig {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Defaults with the environment-provided cargo binary applied.
    pub fn from_runtime(root: impl Into<PathBuf>, runtime: &RuntimeConfig) -> Self {
        let mut config = Self::new(root);
        if let Some(cargo_bin) = &runtime.cargo_bin {
            config.cargo_bin = cargo_bin.clone();
        }
        config
    }

    pub fn existing(mut self, policy: ExistingPolicy) -> Self {
        self.existing = policy;
        self
    }

    pub fn format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    pub fn cargo_bin(mut self, cargo_bin: impl Into<String>) -> Self {
        self.cargo_bin = cargo_bin.into();
        self
    }
}

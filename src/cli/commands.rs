use crate::descriptor::{Info, ServiceDescriptor};
use crate::generator::{generate_project, ExistingPolicy, MaterializeConfig};
use crate::runtime_config::RuntimeConfig;
use anyhow::Context;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_PROJECT_NAME: &str = "example";

/// Scaffold an axum service from a route and middleware descriptor
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "seed", version)]
#[command(about = "Scaffold an axum service from a route and middleware descriptor", long_about = None)]
pub struct Cli {
    /// Initialize a new project
    #[arg(short, long, default_value_t = false)]
    pub init: bool,

    /// Project name, used as the package name and the crate root file name
    #[arg(short, long, default_value = DEFAULT_PROJECT_NAME)]
    pub name: String,

    /// Directory the project directory is created in
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Generate from an existing descriptor file (YAML, or JSON by extension)
    #[arg(short, long)]
    pub descriptor: Option<PathBuf>,

    /// Overwrite an existing project directory
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Do not run `cargo fmt` on the generated project
    #[arg(long, default_value_t = false)]
    pub no_fmt: bool,

    /// One-line summary of the service
    #[arg(long)]
    pub summary: Option<String>,

    /// Longer description of the service
    #[arg(long)]
    pub description: Option<String>,
}

impl Cli {
    /// Metadata of a freshly initialized descriptor.
    pub fn info(&self) -> Info {
        let mut info = Info::new(self.name.clone());
        if let Some(summary) = &self.summary {
            info = info.with_summary(summary.clone());
        }
        if let Some(description) = &self.description {
            info = info.with_description(description.clone());
        }
        info
    }

    /// Flags override the environment, which overrides the defaults.
    pub fn materialize_config(&self, runtime: &RuntimeConfig) -> MaterializeConfig {
        let existing = if self.force {
            ExistingPolicy::Overwrite
        } else {
            ExistingPolicy::Fail
        };
        MaterializeConfig::from_runtime(self.output.clone(), runtime)
            .existing(existing)
            .format(!self.no_fmt)
    }
}

/// Help text printed when `--init` is missing.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Build the descriptor the flags ask for and materialize it. Returns the
/// project directory.
pub fn run_cli(cli: &Cli, runtime: &RuntimeConfig) -> anyhow::Result<PathBuf> {
    let desc = match &cli.descriptor {
        Some(path) => ServiceDescriptor::load(path)
            .with_context(|| format!("failed to load descriptor {}", path.display()))?,
        None => ServiceDescriptor::base(cli.info()),
    };
    let config = cli.materialize_config(runtime);

    info!(
        project = %desc.info.name,
        root = %config.root.display(),
        format = config.format,
        "initializing project"
    );
    generate_project(&desc, &config)
        .with_context(|| format!("failed to generate project {:?}", desc.info.name))
}

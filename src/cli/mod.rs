//! # CLI Module
//!
//! Command-line front end of the `seed` binary.
//!
//! ## Usage
//!
//! ```bash
//! # Scaffold ./example
//! seed --init
//!
//! # Scaffold ./services/admiral with some metadata
//! seed -i -n admiral -o services --summary "Fleet status service"
//!
//! # Regenerate from an edited descriptor, replacing the previous output
//! seed -i -d services/admiral/admiral.yml -o services --force
//! ```
//!
//! Options:
//! - `-i, --init` - Initialize a project (required; without it the usage is
//!   printed and the process exits with status 1)
//! - `-n, --name <NAME>` - Project name (default: `example`)
//! - `-o, --output <DIR>` - Parent directory (default: current directory)
//! - `-d, --descriptor <FILE>` - Generate from a YAML or JSON descriptor; the
//!   project name comes from the file
//! - `--force` - Overwrite an existing project directory
//! - `--no-fmt` - Skip `cargo fmt`
//! - `--summary <TEXT>`, `--description <TEXT>` - Service metadata
//!
//! ## Usage from Code
//!
//! ```rust,no_run
//! use clap::Parser;
//! use seed::cli::{run_cli, Cli};
//! use seed::runtime_config::RuntimeConfig;
//!
//! let cli = Cli::parse_from(["seed", "--init", "--name", "admiral"]);
//! let dir = run_cli(&cli, &RuntimeConfig::from_env())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod commands;


pub use commands::{run_cli, usage, Cli, DEFAULT_PROJECT_NAME};

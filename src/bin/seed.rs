use clap::Parser;
use seed::cli::{run_cli, usage, Cli};
use seed::logging::init_logging;
use seed::runtime_config::RuntimeConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let runtime = RuntimeConfig::from_env();
    if let Err(err) = init_logging(runtime.log_format) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    if !cli.init {
        eprintln!("{}", usage());
        return ExitCode::FAILURE;
    }

    match run_cli(&cli, &runtime) {
        Ok(dir) => {
            println!("{}", dir.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

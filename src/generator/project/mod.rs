mod config;
mod error;
mod format;
mod generate;

pub use config::{
    ExistingPolicy, MaterializeConfig, DEFAULT_CARGO_BIN, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE,
};
pub use error::ProjectError;
pub use format::format_project;
pub use generate::{descriptor_file_name, generate_project, generate_project_from_descriptor};

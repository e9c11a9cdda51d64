pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::GradebookConfig, CliConfig, Command};
pub use crate::core::{engine::GradebookEngine, service::GradebookService};
pub use crate::domain::document::GradebookDocument;
pub use crate::utils::error::{GradebookError, Result};

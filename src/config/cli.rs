use crate::domain::document::GradebookDocument;
use crate::domain::ports::Storage;
use crate::utils::error::{GradebookError, Result};
use crate::utils::logger::REPORTED_TARGET;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// JSON file on the local disk.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write(&self, document: &GradebookDocument) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut content = serde_json::to_string_pretty(document)?;
        content.push('\n');
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Storage for LocalStorage {
    fn load(&self) -> Value {
        if !self.path.exists() {
            tracing::info!(
                "Data file {} not found, starting with empty data",
                self.path.display()
            );
            return GradebookDocument::empty_value();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(
                    "Unexpected error loading {}: {}. Starting with empty data",
                    self.path.display(),
                    e
                );
                return GradebookDocument::empty_value();
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => {
                tracing::info!("Successfully loaded data from {}", self.path.display());
                value
            }
            Err(e) => {
                tracing::error!(
                    "Invalid JSON in {}: {}. Starting with empty data",
                    self.path.display(),
                    e
                );
                GradebookDocument::empty_value()
            }
        }
    }

    fn save(&self, document: &GradebookDocument) -> Result<()> {
        match self.write(document) {
            Ok(()) => {
                tracing::info!("Successfully saved data to {}", self.path.display());
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    target: REPORTED_TARGET,
                    "Error saving data to {}: {}",
                    self.path.display(),
                    e
                );
                Err(GradebookError::PersistenceError {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

use crate::domain::document::GradebookDocument;
use crate::utils::error::Result;
use serde_json::Value;
use std::path::Path;

/// Where the gradebook document lives between invocations.
pub trait Storage {
    /// Returns the stored document, or an empty one when nothing usable is stored.
    fn load(&self) -> Value;
    fn save(&self, document: &GradebookDocument) -> Result<()>;
    fn location(&self) -> &Path;
}

pub trait ConfigProvider {
    fn data_path(&self) -> &Path;
    fn log_path(&self) -> Option<&Path>;
    fn log_level(&self) -> &str;
    fn json_logs(&self) -> bool;
}

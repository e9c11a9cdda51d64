pub mod engine;
pub mod seed;
pub mod service;

pub use crate::domain::document::GradebookDocument;
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
pub use service::GradebookService;

use crate::domain::document::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradebookError {
    #[error("Invalid data format: {0}")]
    DocumentError(#[from] DocumentError),

    #[error("{message}")]
    ValidationError { message: String },

    #[error("{message}")]
    NotFoundError { message: String },

    #[error("{message}")]
    DuplicateError { message: String },

    #[error("Student {student_id} has no grades")]
    NoGradesError { student_id: u32 },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to save gradebook to {path}: {message}")]
    PersistenceError { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Data,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// The command ran but its effect may not have been kept.
    Medium,
    /// The command was rejected; nothing changed.
    High,
}

impl GradebookError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFoundError {
            message: message.into(),
        }
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::DuplicateError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. }
            | Self::NotFoundError { .. }
            | Self::DuplicateError { .. }
            | Self::NoGradesError { .. } => ErrorCategory::Validation,
            Self::DocumentError(_) => ErrorCategory::Data,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::PersistenceError { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "Check the command arguments and try again",
            Self::NotFoundError { .. } => {
                "Use `list students` or `list courses` to see existing records"
            }
            Self::DuplicateError { .. } => "The record already exists; no change is needed",
            Self::NoGradesError { .. } => "Record a grade with `add-grade` before computing a GPA",
            Self::DocumentError(_) => "Fix or remove the malformed record in the data file",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review gradebook.toml and the command-line flags"
            }
            Self::PersistenceError { .. } => {
                "Check that the data directory is writable; the last change was not saved"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => format!("Error: {}", self),
            ErrorCategory::Data => format!("Error: Failed to initialize gradebook: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Storage => format!("Error saving data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GradebookError>;

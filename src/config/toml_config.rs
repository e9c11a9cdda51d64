use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GradebookError, Result};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "gradebook.toml";

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradebookConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: "data/gradebook.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `None` disables the log file.
    pub log_path: Option<String>,
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_path: Some("logs/app.log".to_string()),
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl GradebookConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            GradebookError::ConfigValidationError {
                field: path.as_ref().display().to_string(),
                message: format!("cannot read config file: {}", e),
            }
        })?;
        Self::from_toml_str(&content)
    }

    /// Reads `explicit` (which must exist), else `default_file` when present, else defaults.
    pub fn load_or_default<P: AsRef<Path>>(
        explicit: Option<&str>,
        default_file: P,
    ) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if default_file.as_ref().exists() => Self::from_file(default_file),
            None => Ok(Self::default()),
        }
    }

    /// The configuration both binaries run with: file lookup, command-line overrides, validation.
    pub fn resolve(
        explicit: Option<&str>,
        data_file: Option<&str>,
        log_file: Option<&str>,
    ) -> Result<Self> {
        let mut config = Self::load_or_default(explicit, DEFAULT_CONFIG_FILE)?;
        config.apply_overrides(data_file, log_file);
        config.validate_config()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, data_file: Option<&str>, log_file: Option<&str>) {
        if let Some(data_file) = data_file {
            self.storage.data_path = data_file.to_string();
        }
        if let Some(log_file) = log_file {
            self.logging.log_path = Some(log_file.to_string());
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GradebookError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GRADEBOOK_HOME})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GradebookError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("storage.data_path", &self.storage.data_path)?;
        if let Some(log_path) = &self.logging.log_path {
            validate_path("logging.log_path", log_path)?;
        }
        validate_one_of("logging.level", &self.logging.level, &LOG_LEVELS)?;
        validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        Ok(())
    }
}

impl ConfigProvider for GradebookConfig {
    fn data_path(&self) -> &Path {
        Path::new(&self.storage.data_path)
    }

    fn log_path(&self) -> Option<&Path> {
        self.logging.log_path.as_deref().map(Path::new)
    }

    fn log_level(&self) -> &str {
        &self.logging.level
    }

    fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }
}

impl Validate for GradebookConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

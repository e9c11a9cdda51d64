use crate::utils::error::{GradebookError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Trims `value` and rejects it when nothing is left.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GradebookError::validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_positive_id(field_name: &str, value: u32) -> Result<()> {
    if value < 1 {
        return Err(GradebookError::validation(format!(
            "{} must be positive",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    // NaN fails both comparisons, so check finiteness first.
    if !value.is_finite() || value < min || value > max {
        return Err(GradebookError::validation(format!(
            "{} must be a number between {} and {}",
            field_name, min, max
        )));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GradebookError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GradebookError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(GradebookError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Parses a grade typed on the command line.
pub fn parse_grade(input: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|grade| validate_range("Grade", *grade, 0.0, 100.0).is_ok())
        .ok_or_else(|| {
            GradebookError::validation(format!(
                "Invalid grade '{}': must be a number between 0 and 100",
                input
            ))
        })
}

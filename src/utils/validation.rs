use crate::utils::error::{DashboardError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DashboardError::ValidationError {
            message: format!("'{}' cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DashboardError::ValidationError {
            message: format!(
                "'{}' must be between {} and {} (got {})",
                field_name, min, max, value
            ),
        });
    }
    Ok(())
}

/// Rejects values that would split into extra fields in the plain line format.
pub fn validate_no_delimiter(field_name: &str, value: &str, delimiter: char) -> Result<()> {
    if value.contains(delimiter) {
        return Err(DashboardError::ValidationError {
            message: format!(
                "'{}' cannot contain '{}' with the plain file format; use --format csv instead",
                field_name, delimiter
            ),
        });
    }
    Ok(())
}

/// Rejects line breaks, which end a record in the plain line format.
pub fn validate_single_line(field_name: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(DashboardError::ValidationError {
            message: format!(
                "'{}' cannot contain line breaks with the plain file format; use --format csv instead",
                field_name
            ),
        });
    }
    Ok(())
}

/// Rejects leading or trailing whitespace, which the plain format drops on reload.
pub fn validate_trimmed(field_name: &str, value: &str) -> Result<()> {
    if value.trim() != value {
        return Err(DashboardError::ValidationError {
            message: format!(
                "'{}' cannot start or end with whitespace with the plain file format",
                field_name
            ),
        });
    }
    Ok(())
}

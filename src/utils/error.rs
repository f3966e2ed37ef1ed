use thiserror::Error;

#[derive(Error, Debug)]
pub enum CouponError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate coupon code: {code}")]
    DuplicateCouponError { code: String },

    #[error("Invalid reference time '{value}': {reason}")]
    InvalidReferenceTimeError { value: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Input,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium | ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl CouponError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CouponError::IoError(_) => ErrorCategory::Io,
            CouponError::SerializationError(_) => ErrorCategory::Serialization,
            CouponError::TomlError(_)
            | CouponError::ConfigValidationError { .. }
            | CouponError::InvalidConfigValueError { .. }
            | CouponError::DuplicateCouponError { .. } => ErrorCategory::Configuration,
            CouponError::InvalidReferenceTimeError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Serialization => ErrorSeverity::Medium,
        }
    }

    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            CouponError::IoError(_) => {
                "Check that the catalog file exists and is readable".to_string()
            }
            CouponError::SerializationError(_) => {
                "Retry without --json or report the coupon that failed to serialize".to_string()
            }
            CouponError::TomlError(_) => {
                "Make sure the catalog is valid TOML and matches the documented layout".to_string()
            }
            CouponError::ConfigValidationError { field, .. }
            | CouponError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the catalog", field)
            }
            CouponError::DuplicateCouponError { code } => {
                format!("Keep a single [[coupons]] entry with code '{}'", code)
            }
            CouponError::InvalidReferenceTimeError { .. } => {
                "Use the YYYY-MM-DDTHH:MM:SS format, e.g. 2025-01-31T09:30:00".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read the coupon catalog: {}", self),
            ErrorCategory::Configuration => format!("The coupon catalog is invalid: {}", self),
            ErrorCategory::Input => format!("Invalid command input: {}", self),
            ErrorCategory::Serialization => format!("Could not render the result: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CouponError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_code_is_configuration_error() {
        let err = CouponError::DuplicateCouponError {
            code: "SAVE10".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("SAVE10"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = CouponError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("Could not read"));
        assert_eq!(err.severity().exit_code(), 3);
    }

    #[test]
    fn test_json_failure_maps_to_serialization() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = CouponError::from(json_err);
        assert_eq!(err.category(), ErrorCategory::Serialization);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.severity().exit_code(), 1);
        assert!(err.user_friendly_message().starts_with("Could not render"));
    }

    #[test]
    fn test_configuration_errors_exit_with_one() {
        let err = CouponError::InvalidConfigValueError {
            field: "catalog".to_string(),
            value: "coupons.json".to_string(),
            reason: "Unsupported file extension".to_string(),
        };
        assert_eq!(err.severity().exit_code(), 1);
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BepError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Backend error{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    BackendError {
        status: Option<u16>,
        message: String,
    },

    #[error("Could not parse backend response: {message}")]
    ParseError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Workflow '{workflow}' already has a request in flight")]
    WorkflowBusy { workflow: String },

    #[error("Workflow '{workflow}' cannot {action} while {phase}")]
    InvalidTransition {
        workflow: String,
        action: String,
        phase: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Backend,
    Response,
    Input,
    Workflow,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BepError {
    pub fn backend(message: impl Into<String>) -> Self {
        BepError::BackendError {
            status: None,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        BepError::ParseError {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        BepError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            BepError::ConfigError { .. }
            | BepError::MissingConfigError { .. }
            | BepError::InvalidConfigValueError { .. }
            | BepError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            BepError::HttpError(_) | BepError::BackendError { .. } => ErrorCategory::Backend,
            BepError::ParseError { .. } | BepError::SerializationError(_) => {
                ErrorCategory::Response
            }
            BepError::ValidationError { .. } => ErrorCategory::Input,
            BepError::WorkflowBusy { .. } | BepError::InvalidTransition { .. } => {
                ErrorCategory::Workflow
            }
            BepError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Workflow => ErrorSeverity::Low,
            ErrorCategory::Backend | ErrorCategory::Response => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether re-submitting the same request can succeed without changing
    /// configuration or input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Backend | ErrorCategory::Response
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BepError::ConfigError { message } => format!("Configuration problem: {}", message),
            BepError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            BepError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            BepError::ConfigValidationError { field, message } => {
                format!("Setting '{}' could not be read: {}", field, message)
            }
            BepError::HttpError(_) | BepError::BackendError { .. } => {
                "The AI service could not complete the request".to_string()
            }
            BepError::ParseError { .. } | BepError::SerializationError(_) => {
                "The AI service returned a response that could not be read".to_string()
            }
            BepError::ValidationError { message } => format!("Invalid input: {}", message),
            BepError::WorkflowBusy { .. } => {
                "A request is already running, wait for it to finish".to_string()
            }
            BepError::InvalidTransition { .. } => "Unexpected workflow state".to_string(),
            BepError::IoError(e) => format!("File operation failed: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the config file and make sure the API key environment variable is set"
            }
            ErrorCategory::Backend => "Check network access and API quota, then retry",
            ErrorCategory::Response => "Retry the request; the model output was malformed",
            ErrorCategory::Input => {
                "Provide a project name, at least one discipline, or non-empty document text"
            }
            ErrorCategory::Workflow => "Wait for the running request to settle",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, BepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display_includes_status() {
        let err = BepError::BackendError {
            status: Some(429),
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "Backend error (HTTP 429): quota exceeded");
        assert_eq!(
            BepError::backend("boom").to_string(),
            "Backend error: boom"
        );
    }

    #[test]
    fn test_categories_and_severity() {
        let config = BepError::ConfigError {
            message: "no key".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(config.severity(), ErrorSeverity::Critical);
        assert!(!config.is_retryable());

        let parse = BepError::parse("not json");
        assert_eq!(parse.category(), ErrorCategory::Response);
        assert!(parse.is_retryable());

        let busy = BepError::WorkflowBusy {
            workflow: "generate".to_string(),
        };
        assert_eq!(busy.severity(), ErrorSeverity::Low);
    }
}

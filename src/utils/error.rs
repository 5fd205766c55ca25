use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobMonError {
    #[error("Account {index} initialization failed: {message}")]
    AccountInit { index: usize, message: String },

    #[error("Failed to list container '{container}': {message}")]
    ContainerList { container: String, message: String },

    #[error("{operation} failed for '{item}': {message}")]
    Transfer {
        operation: TransferOp,
        item: String,
        message: String,
    },

    #[error("Invalid blob name: '{name}'")]
    InvalidName { name: String },

    #[error("Invalid refresh interval '{value}': {reason}")]
    InvalidInterval { value: String, reason: String },

    #[error("Invalid target '{entry}': {reason}")]
    InvalidTarget { entry: String, reason: String },

    #[error("Storage provider error: {message}")]
    Provider { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Which bulk operation a [`BlobMonError::Transfer`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOp {
    Upload,
    Download,
    Delete,
}

impl std::fmt::Display for TransferOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferOp::Upload => write!(f, "Upload"),
            TransferOp::Download => write!(f, "Download"),
            TransferOp::Delete => write!(f, "Delete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Account,
    Storage,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BlobMonError {
    pub fn provider(err: impl std::fmt::Display) -> Self {
        BlobMonError::Provider {
            message: err.to_string(),
        }
    }

    /// The bare provider message, or the full display text for other kinds.
    pub fn into_message(self) -> String {
        match self {
            BlobMonError::Provider { message } => message,
            other => other.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            BlobMonError::AccountInit { .. } => ErrorCategory::Account,
            BlobMonError::ContainerList { .. }
            | BlobMonError::Transfer { .. }
            | BlobMonError::Provider { .. } => ErrorCategory::Storage,
            BlobMonError::InvalidName { .. }
            | BlobMonError::InvalidInterval { .. }
            | BlobMonError::InvalidTarget { .. } => ErrorCategory::Input,
            BlobMonError::ConfigError { .. }
            | BlobMonError::ConfigNotFound { .. }
            | BlobMonError::TomlParse(_)
            | BlobMonError::TomlSerialize(_)
            | BlobMonError::Dotenv(_) => ErrorCategory::Configuration,
            BlobMonError::IoError(_) | BlobMonError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BlobMonError::InvalidName { .. }
            | BlobMonError::InvalidInterval { .. }
            | BlobMonError::InvalidTarget { .. } => ErrorSeverity::Low,
            BlobMonError::ContainerList { .. }
            | BlobMonError::Transfer { .. }
            | BlobMonError::Provider { .. } => ErrorSeverity::Medium,
            BlobMonError::AccountInit { .. }
            | BlobMonError::ConfigError { .. }
            | BlobMonError::TomlParse(_)
            | BlobMonError::TomlSerialize(_)
            | BlobMonError::Dotenv(_)
            | BlobMonError::IoError(_)
            | BlobMonError::SerializationError(_) => ErrorSeverity::High,
            BlobMonError::ConfigNotFound { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BlobMonError::AccountInit { .. } => {
                "Check the connection string for this account index and restart"
            }
            BlobMonError::ContainerList { .. } => {
                "Verify the container exists and the account has list permission"
            }
            BlobMonError::Transfer { .. } | BlobMonError::Provider { .. } => {
                "Check network connectivity and account permissions, then retry the operation"
            }
            BlobMonError::InvalidName { .. } => {
                "Rename the file so it does not start or end with '.' or a space and has no '//'"
            }
            BlobMonError::InvalidInterval { .. } => "Enter a positive whole number of seconds",
            BlobMonError::InvalidTarget { .. } => {
                "Select a container separator, a container name, or a 'container/path' entry"
            }
            BlobMonError::ConfigError { .. }
            | BlobMonError::TomlParse(_)
            | BlobMonError::TomlSerialize(_) => "Fix the settings file and try again",
            BlobMonError::ConfigNotFound { .. } => {
                "Create the settings file (e.g. blobmon.toml with refresh_interval = 60)"
            }
            BlobMonError::Dotenv(_) => "Fix the syntax of the .env file",
            BlobMonError::IoError(_) => "Check file paths and permissions",
            BlobMonError::SerializationError(_) => "Retry without --json",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BlobMonError::InvalidInterval { .. } => {
                "The refresh interval must be a positive integer".to_string()
            }
            BlobMonError::ConfigNotFound { path } => {
                format!("Settings file '{}' could not be found", path)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BlobMonError>;

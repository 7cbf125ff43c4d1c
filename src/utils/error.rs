use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Directory walk failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Arithmetic overflow: {message}")]
    OverflowError { message: String },

    #[error("Console input closed")]
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    FileSystem,
    Archive,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl JournalError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EndOfInput => ErrorCategory::Input,
            Self::IoError(_) | Self::WalkError(_) => ErrorCategory::FileSystem,
            Self::ZipError(_) => ErrorCategory::Archive,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::RegexError(_)
            | Self::ValidationError { .. }
            | Self::OverflowError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Closing stdin is how a user leaves a menu without choosing "exit".
            Self::EndOfInput => ErrorSeverity::Low,
            Self::ValidationError { .. } | Self::OverflowError { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::RegexError(_) => ErrorSeverity::High,
            Self::IoError(_) | Self::WalkError(_) | Self::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Run the exercise again and answer the prompts",
            ErrorCategory::FileSystem => {
                "Check that the base directory exists and is writable (see --base-dir)"
            }
            ErrorCategory::Archive => "Delete the partial archive and rerun the backup exercise",
            ErrorCategory::Configuration => "Fix the journal TOML file or pass a different --config",
            ErrorCategory::Data => "Check the input text or stored data for unexpected values",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::EndOfInput => "Input closed, leaving the exercise.".to_string(),
            Self::IoError(e) if e.kind() == std::io::ErrorKind::AlreadyExists => format!(
                "{}. Remove it first or rerun the backup with --cleanup.",
                e
            ),
            Self::IoError(e) => format!("A file operation failed: {}", e),
            Self::ZipError(e) => format!("The archive could not be processed: {}", e),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is not valid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;

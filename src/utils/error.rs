use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Source '{url}' responded with HTTP {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("No job postings found ({sources} source(s) scraped)")]
    NoRecordsFound { sources: usize },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Storage,
}

/// 嚴重程度決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ScraperError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScraperError::RequestError(_) | ScraperError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            ScraperError::MissingConfigError { .. }
            | ScraperError::InvalidConfigValueError { .. }
            | ScraperError::ConfigValidationError { .. }
            | ScraperError::SelectorError { .. } => ErrorCategory::Configuration,
            ScraperError::CsvError(_)
            | ScraperError::SerializationError(_)
            | ScraperError::NoRecordsFound { .. }
            | ScraperError::ProcessingError { .. } => ErrorCategory::Data,
            ScraperError::ZipError(_) | ScraperError::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScraperError::RequestError(_) => ErrorSeverity::Medium,
            ScraperError::HttpStatusError { status, .. } if *status >= 500 => {
                ErrorSeverity::Medium
            }
            ScraperError::HttpStatusError { .. } => ErrorSeverity::High,
            ScraperError::IoError(_) | ScraperError::ZipError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check your network connection and the source URL, then retry"
            }
            ErrorCategory::Configuration => {
                "Review the configuration file and command-line flags"
            }
            ErrorCategory::Data => match self {
                ScraperError::NoRecordsFound { .. } => {
                    "Verify the card and field selectors match the page structure"
                }
                _ => "Inspect the input data for malformed rows",
            },
            ErrorCategory::Storage => "Check that the output path exists and is writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScraperError::RequestError(e) if e.is_timeout() => {
                "The job source took too long to respond".to_string()
            }
            ScraperError::RequestError(_) => "Could not reach the job source".to_string(),
            ScraperError::HttpStatusError { url, status } => {
                format!("{} returned HTTP {}", url, status)
            }
            ScraperError::NoRecordsFound { .. } => {
                "Warning: No jobs found on the page.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;

use std::fmt;

/// Error types for resource import operations
#[derive(Debug)]
pub enum ImportError {
    /// Resource type has no registry entry
    UnknownResourceType(String),

    /// Provider API call failed
    FetchFailure {
        resource_type: String,
        message: String,
    },

    /// A fetched record has no usable identifier
    MalformedRecord {
        resource_type: String,
        index: usize,
        reason: String,
    },

    /// Neither or both of account and zone were supplied
    InvalidScope(String),

    /// Resource type cannot be listed under the active scope
    ScopeMismatch {
        resource_type: String,
        required: String,
    },

    /// No usable API credentials were configured
    MissingCredentials,

    /// Configuration file parsing error
    ConfigParse(String),

    /// General I/O error
    Io(std::io::Error),

    /// Serialization error
    Serialization(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnknownResourceType(resource_type) => {
                write!(
                    f,
                    "'{}' does not have an import format defined",
                    resource_type
                )
            }
            ImportError::FetchFailure {
                resource_type,
                message,
            } => {
                write!(f, "Failed to fetch {} resources: {}", resource_type, message)
            }
            ImportError::MalformedRecord {
                resource_type,
                index,
                reason,
            } => {
                write!(
                    f,
                    "Malformed {} record at position {}: {}",
                    resource_type, index, reason
                )
            }
            ImportError::InvalidScope(msg) => {
                write!(f, "Invalid scope: {}", msg)
            }
            ImportError::ScopeMismatch {
                resource_type,
                required,
            } => {
                write!(
                    f,
                    "'{}' can only be imported with a {} scope",
                    resource_type, required
                )
            }
            ImportError::MissingCredentials => {
                write!(
                    f,
                    "No API credentials configured: set an API token, or both an email and an API key"
                )
            }
            ImportError::ConfigParse(msg) => {
                write!(f, "Failed to parse configuration: {}", msg)
            }
            ImportError::Io(err) => {
                write!(f, "I/O error: {}", err)
            }
            ImportError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::Io(err)
    }
}

impl From<serde_yaml::Error> for ImportError {
    fn from(err: serde_yaml::Error) -> Self {
        ImportError::ConfigParse(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Serialization(err.to_string())
    }
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

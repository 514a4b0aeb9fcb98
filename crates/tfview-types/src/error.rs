use std::fmt;

/// Result type for tfview-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Resource address could not be parsed
    InvalidAddress { input: String, reason: String },

    /// Type constraint JSON is malformed
    InvalidType(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidAddress { input, reason } => {
                write!(f, "Invalid resource address '{}': {}", input, reason)
            }
            Error::InvalidType(msg) => write!(f, "Invalid type constraint: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

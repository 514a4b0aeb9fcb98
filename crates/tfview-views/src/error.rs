use crate::view_type::ViewType;
use std::fmt;

/// Result type for tfview-views operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while constructing views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// View name did not match any known view type
    UnknownViewType(String),

    /// Command has no renderer for the requested view type
    UnsupportedViewType {
        view_type: ViewType,
        command: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownViewType(name) => write!(f, "Unknown view type '{}'", name),
            Error::UnsupportedViewType { view_type, command } => write!(
                f,
                "Configuration error: the {} command does not support the {} view",
                command, view_type
            ),
        }
    }
}

impl std::error::Error for Error {}

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Presentation mode of a command invocation. Chosen once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewType {
    #[default]
    Human,
    Json,
    /// Unformatted single-value output, used by `output --raw`
    Raw,
}

impl ViewType {
    pub fn from_flags(json: bool) -> Self {
        if json { ViewType::Json } else { ViewType::Human }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewType::Human => write!(f, "human"),
            ViewType::Json => write!(f, "json"),
            ViewType::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for ViewType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "human" => Ok(ViewType::Human),
            "json" => Ok(ViewType::Json),
            "raw" => Ok(ViewType::Raw),
            other => Err(Error::UnknownViewType(other.to_string())),
        }
    }
}

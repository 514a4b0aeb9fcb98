use serde::Serialize;

pub const MODULE: &str = "tfview.ui";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Value of the `type` field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Log,
    Diagnostic,
    Outputs,
    RefreshStart,
    RefreshComplete,
    RefreshErrored,
    ApplyStart,
    ApplyComplete,
    ApplyErrored,
}

/// Common record header with the message-specific payload flattened in.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<'a, T: Serialize> {
    #[serde(rename = "@level")]
    pub level: Level,
    #[serde(rename = "@message")]
    pub message: &'a str,
    #[serde(rename = "@module")]
    pub module: &'static str,
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(flatten)]
    pub payload: T,
}

pub(crate) fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f%:z")
        .to_string()
}

use super::hook::HookRecord;
use super::message::{Envelope, Level, MODULE, MessageType, timestamp};
use super::outputs::JsonOutputs;
use crate::view::View;
use serde::Serialize;
use std::sync::Arc;
use tfview_types::{Diagnostic, Diagnostics, Severity};

/// Writes JSON records to the session's stdout.
#[derive(Clone)]
pub struct JsonView {
    view: Arc<View>,
}

#[derive(Serialize)]
struct NoPayload {}

#[derive(Serialize)]
struct DiagnosticPayload<'a> {
    diagnostic: &'a Diagnostic,
}

#[derive(Serialize)]
struct OutputsPayload<'a> {
    outputs: &'a JsonOutputs,
}

#[derive(Serialize)]
struct HookPayload<'a> {
    hook: &'a HookRecord,
}

impl JsonView {
    pub fn new(view: Arc<View>) -> Self {
        Self { view }
    }

    pub fn log(&self, message: &str) {
        self.emit(Level::Info, MessageType::Log, message, NoPayload {});
    }

    pub fn diagnostics(&self, diags: &Diagnostics) {
        for diag in diags {
            let level = match diag.severity {
                Severity::Error => Level::Error,
                Severity::Warning => Level::Warn,
            };
            let message = format!("{}: {}", diag.severity, diag.summary);
            let payload = DiagnosticPayload { diagnostic: diag };
            self.emit(level, MessageType::Diagnostic, &message, payload);
        }
    }

    pub fn outputs(&self, outputs: &JsonOutputs) {
        if outputs.is_empty() {
            return;
        }
        let message = format!("Outputs: {}", outputs.len());
        self.emit(
            Level::Info,
            MessageType::Outputs,
            &message,
            OutputsPayload { outputs },
        );
    }

    pub fn hook(&self, kind: MessageType, message: &str, record: &HookRecord) {
        self.emit(Level::Info, kind, message, HookPayload { hook: record });
    }

    fn emit<T: Serialize>(&self, level: Level, kind: MessageType, message: &str, payload: T) {
        let envelope = Envelope {
            level,
            message,
            module: MODULE,
            timestamp: timestamp(),
            kind,
            payload,
        };

        match serde_json::to_string(&envelope) {
            Ok(line) => self.view.streams().println(&line),
            Err(err) => tracing::warn!(error = %err, ?kind, "failed to encode JSON record"),
        }
    }
}

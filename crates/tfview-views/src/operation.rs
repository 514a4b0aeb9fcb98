use crate::json::JsonView;
use crate::view::{CLI_NAME, View};
use std::sync::Arc;
use tfview_types::Diagnostics;

/// What the running operation was asked to do. Selects the cancellation
/// message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanMode {
    #[default]
    Normal,
    Destroy,
    RefreshOnly,
}

/// Operation-level framing shared by the commands that run an operation.
pub trait Operation: Send + Sync {
    fn interrupted(&self);
    fn fatal_interrupt(&self);
    fn stopping(&self);
    fn cancelled(&self, mode: PlanMode);
    fn diagnostics(&self, diags: &Diagnostics);
}

fn interrupted_text() -> String {
    format!(
        "Interrupt received.\n\
         Please wait for {} to exit or data loss may occur.\n\
         Gracefully shutting down...",
        CLI_NAME
    )
}

const FATAL_INTERRUPT: &str =
    "Two interrupts received. Exiting immediately. Note that data loss may have occurred.";

fn cancelled_text(mode: PlanMode) -> &'static str {
    match mode {
        PlanMode::Normal => "Apply cancelled.",
        PlanMode::Destroy => "Destroy cancelled.",
        PlanMode::RefreshOnly => "Refresh cancelled.",
    }
}

pub struct OperationHuman {
    view: Arc<View>,
    in_automation: bool,
}

impl OperationHuman {
    pub fn new(view: Arc<View>, in_automation: bool) -> Self {
        Self {
            view,
            in_automation,
        }
    }
}

impl Operation for OperationHuman {
    fn interrupted(&self) {
        let colorize = self.view.colorize();
        let mut text = format!("\n{}", colorize.bold(&interrupted_text()));
        // Nobody is at the keyboard to force an exit in automation
        if !self.in_automation {
            text.push_str("\nPress Ctrl-C again to exit immediately.");
        }
        self.view.streams().println(&text);
    }

    fn fatal_interrupt(&self) {
        let colorize = self.view.colorize();
        self.view
            .streams()
            .eprintln(&format!("\n{}", colorize.bold_red(FATAL_INTERRUPT)));
    }

    fn stopping(&self) {
        self.view.streams().println("Stopping operation...");
    }

    fn cancelled(&self, mode: PlanMode) {
        self.view.streams().println(cancelled_text(mode));
    }

    fn diagnostics(&self, diags: &Diagnostics) {
        self.view.diagnostics(diags);
    }
}

pub struct OperationJson {
    view: JsonView,
}

impl OperationJson {
    pub fn new(view: JsonView) -> Self {
        Self { view }
    }
}

impl Operation for OperationJson {
    fn interrupted(&self) {
        self.view.log(&interrupted_text());
    }

    fn fatal_interrupt(&self) {
        self.view.log(FATAL_INTERRUPT);
    }

    fn stopping(&self) {
        self.view.log("Stopping operation...");
    }

    fn cancelled(&self, mode: PlanMode) {
        self.view.log(cancelled_text(mode));
    }

    fn diagnostics(&self, diags: &Diagnostics) {
        self.view.diagnostics(diags);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorize::Colorize;
    use crate::streams::Streams;

    #[test]
    fn test_human_interrupt_hint_depends_on_automation() {
        let (streams, captured) = Streams::capture();
        let view = Arc::new(View::new(streams, Colorize::disabled(), false));
        OperationHuman::new(Arc::clone(&view), false).interrupted();
        assert!(captured.stdout().contains("Press Ctrl-C again"));

        let (streams, captured) = Streams::capture();
        let view = Arc::new(View::new(streams, Colorize::disabled(), true));
        OperationHuman::new(view, true).interrupted();
        assert!(captured.stdout().contains("Gracefully shutting down..."));
        assert!(!captured.stdout().contains("Press Ctrl-C again"));
    }

    #[test]
    fn test_cancelled_messages() {
        let (streams, captured) = Streams::capture();
        let view = Arc::new(View::new(streams, Colorize::disabled(), false));
        let op = OperationHuman::new(view, false);
        op.cancelled(PlanMode::RefreshOnly);
        op.cancelled(PlanMode::Destroy);
        assert_eq!(captured.stdout(), "Refresh cancelled.\nDestroy cancelled.\n");
    }

    #[test]
    fn test_json_stopping_is_log_record() {
        let (streams, captured) = Streams::capture();
        let view = Arc::new(View::new(streams, Colorize::disabled(), false));
        OperationJson::new(JsonView::new(view)).stopping();

        let record: serde_json::Value = serde_json::from_str(&captured.stdout_lines()[0]).unwrap();
        assert_eq!(record["type"], "log");
        assert_eq!(record["@level"], "info");
        assert_eq!(record["@message"], "Stopping operation...");
    }
}

use crate::error::{Error, Result};
use crate::hooks::{CountHook, Hook, JsonHook, ResourceCounts, UiHook};
use crate::json::{JsonView, outputs_from_map};
use crate::operation::{Operation, OperationHuman, OperationJson};
use crate::output::OutputHuman;
use crate::view::View;
use crate::view_type::ViewType;
use std::sync::Arc;
use tfview_types::{Diagnostics, OutputValues};

/// View contract of the refresh command.
pub trait Refresh: Send + Sync {
    /// Render root module outputs. Empty input renders nothing.
    fn outputs(&self, outputs: &OutputValues);

    /// Fresh operation view bound to the same destination and mode.
    fn operation(&self) -> Box<dyn Operation>;

    /// Fresh list of hooks to register before the refresh starts.
    fn hooks(&self) -> Vec<Arc<dyn Hook>>;

    fn diagnostics(&self, diags: &Diagnostics);

    fn help_prompt(&self);
}

/// Build the refresh view for `view_type`.
///
/// This is the only place the mode is inspected. View types the refresh
/// command has no renderer for are a configuration error, returned before
/// anything is written.
pub fn new_refresh(view_type: ViewType, view: Arc<View>) -> Result<Box<dyn Refresh>> {
    let refresh: Box<dyn Refresh> = match view_type {
        ViewType::Json => Box::new(RefreshJson::new(JsonView::new(view))),
        ViewType::Human => Box::new(RefreshHuman::new(view)),
        ViewType::Raw => {
            return Err(Error::UnsupportedViewType {
                view_type,
                command: "refresh",
            });
        }
    };
    tracing::debug!(%view_type, "refresh view ready");
    Ok(refresh)
}

/// Human-readable text, suitable for a scrolling terminal.
pub struct RefreshHuman {
    view: Arc<View>,
    in_automation: bool,
    count_hook: Arc<CountHook>,
}

impl RefreshHuman {
    pub fn new(view: Arc<View>) -> Self {
        let in_automation = view.running_in_automation();
        Self {
            view,
            in_automation,
            count_hook: Arc::new(CountHook::new()),
        }
    }

    /// Resource actions tallied by the hook handed out from `hooks()`.
    pub fn counts(&self) -> ResourceCounts {
        self.count_hook.counts()
    }
}

impl Refresh for RefreshHuman {
    fn outputs(&self, outputs: &OutputValues) {
        if outputs.is_empty() {
            return;
        }
        let colorize = self.view.colorize();
        self.view
            .streams()
            .print(&format!("\n{}\n\n", colorize.bold_green("Outputs:")));
        OutputHuman::new(Arc::clone(&self.view)).output(outputs);
    }

    fn operation(&self) -> Box<dyn Operation> {
        Box::new(OperationHuman::new(Arc::clone(&self.view), self.in_automation))
    }

    fn hooks(&self) -> Vec<Arc<dyn Hook>> {
        let count_hook: Arc<dyn Hook> = self.count_hook.clone();
        let ui_hook: Arc<dyn Hook> = Arc::new(UiHook::new(Arc::clone(&self.view)));
        vec![count_hook, ui_hook]
    }

    fn diagnostics(&self, diags: &Diagnostics) {
        self.view.diagnostics(diags);
    }

    fn help_prompt(&self) {
        self.view.help_prompt("refresh");
    }
}

/// Streaming JSON records, suitable for other software to consume.
pub struct RefreshJson {
    view: JsonView,
}

impl RefreshJson {
    pub fn new(view: JsonView) -> Self {
        Self { view }
    }
}

impl Refresh for RefreshJson {
    fn outputs(&self, outputs: &OutputValues) {
        let (json, diags) = outputs_from_map(outputs);
        if diags.has_errors() {
            self.diagnostics(&diags);
        } else {
            self.view.outputs(&json);
        }
    }

    fn operation(&self) -> Box<dyn Operation> {
        Box::new(OperationJson::new(self.view.clone()))
    }

    fn hooks(&self) -> Vec<Arc<dyn Hook>> {
        let json_hook: Arc<dyn Hook> = Arc::new(JsonHook::new(self.view.clone()));
        vec![json_hook]
    }

    fn diagnostics(&self, diags: &Diagnostics) {
        self.view.diagnostics(diags);
    }

    fn help_prompt(&self) {}
}

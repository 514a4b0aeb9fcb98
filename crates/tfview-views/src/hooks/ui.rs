use super::timer::Timers;
use super::{Hook, complete_message, start_message};
use crate::format::format_elapsed;
use crate::view::View;
use std::sync::Arc;
use tfview_types::{ActionKind, HookAction, HookEvent, Phase};

/// Prints one bold line per resource action to the terminal.
///
/// Refresh completions and failures print nothing: failures reach the user
/// as diagnostics once the operation ends.
pub struct UiHook {
    view: Arc<View>,
    timers: Timers,
}

impl UiHook {
    pub fn new(view: Arc<View>) -> Self {
        Self {
            view,
            timers: Timers::default(),
        }
    }

    fn message(&self, event: &HookEvent) -> Option<String> {
        match event.phase {
            Phase::Start => {
                self.timers.start(&event.addr);
                Some(start_message(event))
            }
            Phase::Complete => {
                let elapsed = format_elapsed(self.timers.finish(&event.addr));
                (event.action != ActionKind::Refresh).then(|| complete_message(event, &elapsed))
            }
            Phase::Errored => {
                self.timers.finish(&event.addr);
                None
            }
        }
    }
}

impl Hook for UiHook {
    fn name(&self) -> &str {
        "UiHook"
    }

    fn on_event(&self, event: &HookEvent) -> HookAction {
        if let Some(line) = self.message(event) {
            let colorize = self.view.colorize();
            self.view.streams().println(&colorize.bold(&line));
        }
        HookAction::Continue
    }
}

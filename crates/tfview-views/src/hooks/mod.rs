//! Progress-event receivers registered with the reconciliation engine.
//!
//! The engine may call hooks from many worker threads at once, so every hook
//! takes `&self` and keeps its state behind atomics or a mutex.

mod count;
mod json;
mod timer;
mod ui;

pub use count::{CountHook, ResourceCounts};
pub use json::JsonHook;
pub use ui::UiHook;

use tfview_types::{HookAction, HookEvent};

pub trait Hook: Send + Sync {
    /// Hook name for debugging
    fn name(&self) -> &str;

    fn on_event(&self, event: &HookEvent) -> HookAction;
}

fn id_suffix(event: &HookEvent) -> String {
    event
        .id
        .as_ref()
        .map(|id| format!(" [{}={}]", id.key, id.value))
        .unwrap_or_default()
}

fn start_message(event: &HookEvent) -> String {
    use tfview_types::ActionKind::*;

    let verb = match event.action {
        Refresh => "Refreshing state...",
        Read => "Reading...",
        Create => "Creating...",
        Update => "Modifying...",
        Delete => "Destroying...",
    };
    let id = match event.action {
        Refresh | Update | Delete => id_suffix(event),
        Read | Create => String::new(),
    };
    format!("{}: {}{}", event.addr, verb, id)
}

fn complete_message(event: &HookEvent, elapsed: &str) -> String {
    use tfview_types::ActionKind::*;

    match event.action {
        Refresh => format!("{}: Refresh complete{}", event.addr, id_suffix(event)),
        Delete => format!("{}: Destruction complete after {}", event.addr, elapsed),
        Read | Create | Update => format!(
            "{}: {} complete after {}{}",
            event.addr,
            action_noun(event.action),
            elapsed,
            id_suffix(event)
        ),
    }
}

fn errored_message(event: &HookEvent, elapsed: &str) -> String {
    match event.action {
        tfview_types::ActionKind::Refresh => format!("{}: Refresh errored", event.addr),
        action => format!(
            "{}: {} errored after {}",
            event.addr,
            action_noun(action),
            elapsed
        ),
    }
}

fn action_noun(action: tfview_types::ActionKind) -> &'static str {
    use tfview_types::ActionKind::*;

    match action {
        Refresh => "Refresh",
        Read => "Read",
        Create => "Creation",
        Update => "Modifications",
        Delete => "Destruction",
    }
}

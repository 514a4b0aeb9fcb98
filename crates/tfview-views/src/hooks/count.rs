use super::Hook;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use tfview_types::{ActionKind, HookAction, HookEvent, Phase};

/// Snapshot of the completed resource actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceCounts {
    pub added: usize,
    pub changed: usize,
    pub removed: usize,
    pub read: usize,
}

/// Tallies completed resource actions. Counts only grow.
#[derive(Debug, Default)]
pub struct CountHook {
    added: AtomicUsize,
    changed: AtomicUsize,
    removed: AtomicUsize,
    read: AtomicUsize,
}

impl CountHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> ResourceCounts {
        ResourceCounts {
            added: self.added.load(Ordering::Relaxed),
            changed: self.changed.load(Ordering::Relaxed),
            removed: self.removed.load(Ordering::Relaxed),
            read: self.read.load(Ordering::Relaxed),
        }
    }
}

impl Hook for CountHook {
    fn name(&self) -> &str {
        "CountHook"
    }

    fn on_event(&self, event: &HookEvent) -> HookAction {
        if event.phase != Phase::Complete {
            return HookAction::Continue;
        }

        let counter = match event.action {
            ActionKind::Create => &self.added,
            ActionKind::Update => &self.changed,
            ActionKind::Delete => &self.removed,
            ActionKind::Read | ActionKind::Refresh => &self.read,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        HookAction::Continue
    }
}

//! Replay engine: walks planned resources on a bounded worker pool and
//! reports each step to the registered hooks.

use crate::snapshot::PlannedResource;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tfview_types::{Diagnostic, Diagnostics, HookAction, HookEvent, Phase};
use tfview_views::Hook;

pub struct Engine {
    hooks: Vec<Arc<dyn Hook>>,
    parallelism: usize,
    cancel: Arc<AtomicBool>,
}

impl Engine {
    pub fn new(hooks: Vec<Arc<dyn Hook>>, parallelism: usize, cancel: Arc<AtomicBool>) -> Self {
        Self {
            hooks,
            parallelism: parallelism.max(1),
            cancel,
        }
    }

    /// Refresh every resource. Returns the errors raised by individual
    /// resources, in plan order.
    pub fn refresh(&self, resources: &[PlannedResource]) -> Diagnostics {
        let next = AtomicUsize::new(0);
        let failures: Mutex<Vec<(usize, Diagnostic)>> = Mutex::new(Vec::new());
        let workers = self.parallelism.min(resources.len());

        tracing::debug!(resources = resources.len(), workers, "refresh started");

        std::thread::scope(|s| {
            for _ in 0..workers {
                s.spawn(|| {
                    while !self.cancel.load(Ordering::SeqCst) {
                        let index = next.fetch_add(1, Ordering::SeqCst);
                        let Some(resource) = resources.get(index) else {
                            break;
                        };
                        if let Some(diag) = self.refresh_one(resource) {
                            failures
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .push((index, diag));
                        }
                    }
                });
            }
        });

        let mut failures = failures
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        failures.sort_by_key(|(index, _)| *index);
        tracing::debug!(failed = failures.len(), "refresh finished");
        failures.into_iter().map(|(_, diag)| diag).collect()
    }

    fn refresh_one(&self, resource: &PlannedResource) -> Option<Diagnostic> {
        let event = |phase| {
            let event = HookEvent::new(resource.addr.clone(), resource.action, phase);
            match &resource.id {
                Some(id) => event.with_id("id", id.as_str()),
                None => event,
            }
        };

        self.dispatch(&event(Phase::Start));

        match &resource.error {
            Some(message) => {
                self.dispatch(&event(Phase::Errored));
                tracing::info!(
                    addr = %resource.addr,
                    error = %message,
                    "resource refresh failed"
                );
                let summary = format!("Error refreshing {}", resource.addr);
                Some(
                    Diagnostic::error(summary, message.as_str())
                        .with_address(resource.addr.to_string()),
                )
            }
            None => {
                self.dispatch(&event(Phase::Complete));
                None
            }
        }
    }

    /// Deliver to every hook. A hook asking to halt stops further scheduling
    /// once the current resources finish.
    fn dispatch(&self, event: &HookEvent) {
        for hook in &self.hooks {
            if hook.on_event(event) == HookAction::Halt {
                tracing::info!(hook = hook.name(), "hook requested halt");
                self.cancel.store(true, Ordering::SeqCst);
            }
        }
    }
}

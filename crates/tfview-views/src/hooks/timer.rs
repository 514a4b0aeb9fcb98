use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tfview_types::ResourceAddr;

/// Start times of in-flight resource actions.
#[derive(Debug, Default)]
pub(crate) struct Timers {
    started: Mutex<HashMap<ResourceAddr, Instant>>,
}

impl Timers {
    pub fn start(&self, addr: &ResourceAddr) {
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(addr.clone(), Instant::now());
    }

    /// Elapsed time since `start`, zero if the start was never seen.
    pub fn finish(&self, addr: &ResourceAddr) -> Duration {
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(addr)
            .map(|started| started.elapsed())
            .unwrap_or_default()
    }
}

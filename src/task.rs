//! Handle for a recurring background task.
//!
//! The carousel cycle is conceptually fire-and-forget; wrapping the spawned
//! task in a handle gives teardown paths something to cancel. Dropping the
//! handle does NOT stop the task. It keeps running for the page's lifetime
//! unless `cancel` is called.

use tokio::task::JoinHandle;
use tracing::debug;

pub struct RecurringTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl RecurringTask {
    pub fn new(name: &'static str, handle: JoinHandle<()>) -> Self {
        debug!("Started recurring task '{}'", name);
        Self { name, handle }
    }

    /// Stop the task. Safe to call more than once.
    pub fn cancel(&self) {
        debug!("Cancelling recurring task '{}'", self.name);
        self.handle.abort();
    }

    /// True when the task has ended (cancelled, or stopped on its own after
    /// a fault).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

//! Scheduled tasks tied to the lifetime of the view that owns them.
//!
//! DESIGN
//! ======
//! Timer-driven behavior runs in a spawned tokio task. The owning view keeps
//! a `TaskHandle`; cancelling or dropping the handle aborts the task. Tasks
//! hold only a `Weak` reference to view state, so once the view is gone an
//! in-flight tick finds nothing to mutate.

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

/// Handle to a running view task. Aborts the task on drop.
#[derive(Debug)]
pub struct TaskHandle {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl TaskHandle {
    /// Spawn `fut` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<F>(name: &'static str, fut: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!(task = name, "task spawned");
        Self { name, handle: Some(tokio::spawn(fut)) }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True once the task has run to completion or been cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Abort the task. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!(task = self.name, "task cancelled");
            }
            handle.abort();
        }
    }

    /// Wait for the task to finish on its own.
    pub async fn join(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if let Err(e) = handle.await {
            debug!(task = self.name, error = %e, "task ended without completing");
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "task_test.rs"]
mod tests;

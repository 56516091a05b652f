//! Executors run callback-style requests off the caller's thread.
//!
//! A submitted [`Task`] is consumed exactly once: either an executor runs it, or the executor
//! hands it back inside [`Rejected`] and the engine reports the rejection through the same
//! task. Either way the request's callbacks fire a single time.

use std::fmt;

use thiserror::Error;

mod inline;
pub use inline::InlineExecutor;

cfg_if::cfg_if! {
    if #[cfg(feature = "thread-pool")] {
        mod pool;
        pub use pool::{ThreadPoolExecutor, DEFAULT_QUEUE_CAPACITY};
    }
}

/// A unit of work submitted to an [`Executor`].
pub struct Task {
    inner: Box<dyn FnOnce(Result<(), RejectReason>) + Send>,
}

impl Task {
    pub(crate) fn new(f: impl FnOnce(Result<(), RejectReason>) + Send + 'static) -> Self {
        Self { inner: Box::new(f) }
    }

    /// Runs the task on the current thread.
    pub fn run(self) {
        (self.inner)(Ok(()))
    }

    pub(crate) fn reject(self, reason: RejectReason) {
        (self.inner)(Err(reason))
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}

/// Why an executor refused a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// The executor's queue is full.
    #[error("executor is saturated")]
    Saturated,
    /// The executor no longer accepts work.
    #[error("executor is shut down")]
    ShutDown,
}

/// A task an executor did not accept, returned to the submitter.
#[derive(Debug)]
pub struct Rejected {
    task: Task,
    reason: RejectReason,
}

impl Rejected {
    /// Hands `task` back to the submitter.
    pub fn new(task: Task, reason: RejectReason) -> Self {
        Self { task, reason }
    }

    /// Why the task was refused.
    pub fn reason(&self) -> RejectReason {
        self.reason
    }

    pub(crate) fn reject(self) {
        self.task.reject(self.reason)
    }
}

/// Runs [`Task`]s, typically on threads other than the submitter's.
pub trait Executor: Send + Sync + 'static {
    /// Accepts `task` for execution, or returns it with the reason it was refused.
    ///
    /// An accepted task must eventually be run exactly once.
    fn submit(&self, task: Task) -> Result<(), Rejected>;
}

impl<E: Executor + ?Sized> Executor for std::sync::Arc<E> {
    fn submit(&self, task: Task) -> Result<(), Rejected> {
        (**self).submit(task)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn submit(&self, task: Task) -> Result<(), Rejected> {
        (**self).submit(task)
    }
}

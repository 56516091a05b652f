use std::io;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, error};

use super::{Executor, RejectReason, Rejected, Task};

/// Queue capacity used by [`ThreadPoolExecutor::with_threads`].
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// A fixed-size pool of worker threads fed by a bounded queue.
///
/// Submissions fail with [`RejectReason::Saturated`] while the queue is full and with
/// [`RejectReason::ShutDown`] after [`ThreadPoolExecutor::shutdown`]. Dropping the pool shuts it
/// down and waits for queued tasks to finish.
#[derive(Debug)]
pub struct ThreadPoolExecutor {
    sender: Mutex<Option<Sender<Task>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl ThreadPoolExecutor {
    /// Spawns `threads` workers sharing a queue of `queue_capacity` pending tasks.
    pub fn new(threads: NonZeroUsize, queue_capacity: usize) -> io::Result<Self> {
        let (sender, receiver) = bounded(queue_capacity);
        let workers = (0..threads.get())
            .map(|i| {
                let receiver = receiver.clone();
                thread::Builder::new()
                    .name(format!("stepwise-worker-{i}"))
                    .spawn(move || worker_loop(receiver))
            })
            .collect::<io::Result<Vec<_>>>()?;
        debug!(
            "Started thread pool with {} workers, queue capacity {queue_capacity}",
            workers.len()
        );
        Ok(Self {
            sender: Mutex::new(Some(sender)),
            workers: Mutex::new(workers),
        })
    }

    /// Spawns `threads` workers with [`DEFAULT_QUEUE_CAPACITY`].
    pub fn with_threads(threads: NonZeroUsize) -> io::Result<Self> {
        Self::new(threads, DEFAULT_QUEUE_CAPACITY)
    }

    /// Stops accepting tasks. Tasks already queued still run.
    pub fn shutdown(&self) {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if sender.is_some() {
            debug!("Thread pool shutting down");
        }
    }

    /// Whether [`ThreadPoolExecutor::shutdown`] has been called.
    pub fn is_shut_down(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

fn worker_loop(receiver: Receiver<Task>) {
    for task in receiver {
        if panic::catch_unwind(AssertUnwindSafe(|| task.run())).is_err() {
            error!("A task panicked on a stepwise worker thread");
        }
    }
}

impl Executor for ThreadPoolExecutor {
    fn submit(&self, task: Task) -> Result<(), Rejected> {
        let guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = guard.as_ref() else {
            return Err(Rejected::new(task, RejectReason::ShutDown));
        };
        match sender.try_send(task) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(task)) => Err(Rejected::new(task, RejectReason::Saturated)),
            Err(TrySendError::Disconnected(task)) => {
                Err(Rejected::new(task, RejectReason::ShutDown))
            }
        }
    }
}

impl Drop for ThreadPoolExecutor {
    fn drop(&mut self) {
        self.shutdown();
        let workers = std::mem::take(
            self.workers
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner),
        );
        let current = thread::current().id();
        for worker in workers {
            // A task holding the last reference can drop the pool from a worker.
            if worker.thread().id() != current {
                let _ = worker.join();
            }
        }
    }
}

use super::{Executor, Rejected, Task};

/// Runs every task immediately on the submitting thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn submit(&self, task: Task) -> Result<(), Rejected> {
        task.run();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;

    use super::*;

    #[test]
    fn test_inline_runs_on_caller_thread() {
        let (tx, rx) = mpsc::channel();
        let task = Task::new(move |_| tx.send(thread::current().id()).unwrap());
        InlineExecutor.submit(task).unwrap();
        assert_eq!(rx.try_recv().unwrap(), thread::current().id());
    }
}

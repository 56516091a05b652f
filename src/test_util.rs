use std::io;
use std::sync::{Arc, Mutex};

use stepwise_interface::{RawResponse, Request, Transport};

use crate::executor::{Executor, RejectReason, Rejected, Task};

/// Records every request and answers with a canned response or an I/O failure.
#[derive(Clone)]
pub(crate) struct MockTransport {
    reply: Option<RawResponse>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockTransport {
    pub(crate) fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Some(RawResponse::new(status, body)),
            requests: Default::default(),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            reply: None,
            requests: Default::default(),
        }
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: Request) -> stepwise_interface::Result<RawResponse> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(io::Error::from(io::ErrorKind::ConnectionRefused).into()),
        }
    }
}

/// Refuses every task.
pub(crate) struct RejectingExecutor(pub(crate) RejectReason);

impl Executor for RejectingExecutor {
    fn submit(&self, task: Task) -> Result<(), Rejected> {
        Err(Rejected::new(task, self.0))
    }
}

/// Panics on every request.
pub(crate) struct PanickingTransport;

impl Transport for PanickingTransport {
    fn execute(&self, _request: Request) -> stepwise_interface::Result<RawResponse> {
        panic!("connection reset while reading headers")
    }
}

//! Callbacks for requests dispatched with [`crate::steps::ReadyForDispatch::at`].

use log::trace;

use crate::Error;

/// Receives the decoded result of a successful request.
pub type OnSuccess<T> = Box<dyn FnOnce(T) + Send>;

/// Receives the error of a failed request.
pub type OnFailure = Box<dyn FnOnce(Error) + Send>;

/// A callback that ignores its argument. Usable for either side.
///
/// ```
/// # fn f(client: stepwise::Client) -> stepwise::Result<()> {
/// client
///     .begin()
///     .delete()
///     .on_success(stepwise::callback::no_op)
///     .on_failure(|e| eprintln!("delete failed: {e}"))
///     .at("https://example.com/items/1")
/// # }
/// ```
pub fn no_op<T>(_: T) {}

/// Both callbacks of a dispatched request. Consuming it fires exactly one of them.
pub(crate) struct Callbacks<T> {
    on_success: OnSuccess<T>,
    on_failure: OnFailure,
}

impl<T> Callbacks<T> {
    pub(crate) fn new(on_success: OnSuccess<T>, on_failure: OnFailure) -> Self {
        Self {
            on_success,
            on_failure,
        }
    }

    pub(crate) fn deliver(self, result: crate::Result<T>) {
        match result {
            Ok(value) => {
                trace!("Delivering success callback");
                (self.on_success)(value)
            }
            Err(err) => {
                trace!("Delivering failure callback: {err}");
                (self.on_failure)(err)
            }
        }
    }
}

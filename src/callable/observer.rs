#[cfg(test)]
use mockall::automock;
use tokio_util::sync::CancellationToken;

use crate::Error;

/// Handle given to an observer in [`ResponseObserver::on_start`].
///
/// Cancelling stops delivery: the stream is dropped and the observer receives
/// `on_error(Error::Cancelled)` as its terminal callback.
#[derive(Debug, Clone, Default)]
pub struct StreamController {
    token: CancellationToken,
}

impl StreamController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

/// Receives a server stream incrementally.
///
/// Per call: `on_start` first, then `on_response` for each item in arrival
/// order, then exactly one of `on_error` / `on_complete`.
#[cfg_attr(test, automock)]
pub trait ResponseObserver<T: Send + Sync + 'static>: Send + Sync {
    fn on_start(
        &self,
        controller: StreamController,
    );

    fn on_response(
        &self,
        response: T,
    );

    fn on_error(
        &self,
        error: Error,
    );

    fn on_complete(&self);
}

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::task::Context;
use std::task::Poll;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::task::AbortHandle;

use crate::Error;
use crate::Result;

/// Handle to the eventual result of a unary call.
///
/// Awaiting yields the call's `Result`; a cancelled call yields
/// [`Error::Cancelled`].
pub struct ApiFuture<T> {
    inner: BoxFuture<'static, Result<T>>,
    abort: Option<AbortHandle>,
}

impl<T> Debug for ApiFuture<T> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("ApiFuture")
            .field("spawned", &self.abort.is_some())
            .finish()
    }
}

impl<T: Send + 'static> ApiFuture<T> {
    /// Run `fut` on the tokio runtime right away.
    ///
    /// Must be invoked within a tokio runtime.
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let handle = tokio::spawn(fut);
        let abort = handle.abort_handle();
        let inner = async move {
            match handle.await {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => Err(Error::Cancelled),
                Err(e) => Err(Error::Join(e)),
            }
        }
        .boxed();

        Self {
            inner,
            abort: Some(abort),
        }
    }

    /// An already resolved future
    pub fn ready(result: Result<T>) -> Self {
        Self {
            inner: futures::future::ready(result).boxed(),
            abort: None,
        }
    }
}

impl<T> ApiFuture<T> {
    /// Abort the underlying computation. No effect on a ready future or one
    /// that already finished.
    pub fn cancel(&self) {
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.abort.as_ref().map_or(true, AbortHandle::is_finished)
    }
}

impl<T> Future for ApiFuture<T> {
    type Output = Result<T>;

    fn poll(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

use std::sync::Arc;

use futures::StreamExt;
use futures::TryStreamExt;
#[cfg(test)]
use mockall::automock;
use tonic::async_trait;
use tracing::debug;

use super::ResponseObserver;
use super::ResponseStream;
use super::StreamController;
use crate::Error;
use crate::Result;

/// A server-streaming remote operation: one request, many responses.
///
/// Implementors provide [`stream`](Self::stream); the other invocation forms
/// are derived from it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ServerStreamingCallable<Req: Send + Sync + 'static, Resp: Send + Sync + 'static>:
    Send + Sync
{
    /// Start the call and return its responses as a stream.
    ///
    /// Dropping the stream cancels the call.
    fn stream(
        &self,
        request: Req,
    ) -> ResponseStream<Resp>;

    /// Run the call to completion and collect every response.
    ///
    /// The first error ends the call and is returned unchanged.
    async fn call(
        &self,
        request: Req,
    ) -> Result<Vec<Resp>> {
        self.stream(request).try_collect().await
    }

    /// Start the call and push its responses to `observer` from a spawned
    /// task; returns immediately.
    ///
    /// Must be invoked within a tokio runtime.
    fn call_with_observer(
        &self,
        request: Req,
        observer: Arc<dyn ResponseObserver<Resp>>,
    ) {
        let stream = self.stream(request);
        tokio::spawn(drive_observer(stream, observer, StreamController::new()));
    }
}

/// Feed `stream` into `observer`, honoring the controller's cancellation.
pub(crate) async fn drive_observer<T: Send + Sync + 'static>(
    mut stream: ResponseStream<T>,
    observer: Arc<dyn ResponseObserver<T>>,
    controller: StreamController,
) {
    observer.on_start(controller.clone());

    loop {
        tokio::select! {
            biased;
            _ = controller.cancelled() => {
                debug!("observer cancelled the stream");
                drop(stream);
                observer.on_error(Error::Cancelled);
                return;
            }
            next = stream.next() => match next {
                Some(Ok(response)) => observer.on_response(response),
                Some(Err(e)) => {
                    debug!("stream failed: {:?}", e);
                    observer.on_error(e);
                    return;
                }
                None => {
                    observer.on_complete();
                    return;
                }
            }
        }
    }
}

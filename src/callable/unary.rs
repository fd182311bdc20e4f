#[cfg(test)]
use mockall::automock;
use tonic::async_trait;

use super::ApiFuture;
use crate::Result;

/// A unary remote operation: one request, one response.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UnaryCallable<Req: Send + Sync + 'static, Resp: Send + Sync + 'static>:
    Send + Sync
{
    /// Start the call and return a handle to its eventual result.
    ///
    /// The call makes progress whether or not the handle is polled;
    /// [`ApiFuture::cancel`] aborts it.
    fn future_call(
        &self,
        request: Req,
    ) -> ApiFuture<Resp>;

    /// Start the call and wait for its result
    async fn call(
        &self,
        request: Req,
    ) -> Result<Resp> {
        self.future_call(request).await
    }
}

//! Callable contracts a stub hands out, one per remote operation.
//!
//! Each callable exposes several invocation forms built on a single primitive:
//! - [`ServerStreamingCallable`]: `stream` (primitive), `call`, `call_with_observer`
//! - [`UnaryCallable`]: `future_call` (primitive), `call`
//!
//! Cancellation lives here rather than on the [`DataClient`](crate::DataClient):
//! drop a [`ResponseStream`], cancel a [`StreamController`] or an [`ApiFuture`].

mod api_future;
mod observer;
mod streaming;
mod unary;

pub use api_future::*;
pub use observer::*;
pub use streaming::*;
pub use unary::*;


use futures::stream::BoxStream;

use crate::Result;

/// Responses of a server-streaming call
pub type ResponseStream<T> = BoxStream<'static, Result<T>>;

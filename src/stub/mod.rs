//! Stub contract: the transport-side capability provider behind a
//! [`DataClient`](crate::DataClient).
//!
//! A stub owns whatever the remote calls need (channels, credentials, retry
//! and row-merging logic) and hands out one callable per operation. Production
//! transports, the [`EmulatorStub`] and test doubles all plug in here.

mod emulator;
pub use emulator::*;


use std::sync::Arc;

#[cfg(test)]
use mockall::automock;
use tonic::async_trait;

use crate::KeyOffset;
use crate::Query;
use crate::Result;
use crate::Row;
use crate::ServerStreamingCallable;
use crate::UnaryCallable;

/// Streaming row read: `Query -> stream<Row>`
pub type ReadRowsCallable = Arc<dyn ServerStreamingCallable<Query, Row>>;

/// Row-key sampling: `table id -> Vec<KeyOffset>`
pub type SampleRowKeysCallable = Arc<dyn UnaryCallable<String, Vec<KeyOffset>>>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait DataStub: Send + Sync + 'static {
    /// Callable for streaming row reads.
    ///
    /// Must return the same handle on every invocation.
    fn read_rows_callable(&self) -> ReadRowsCallable;

    /// Callable for row-key sampling.
    ///
    /// Must return the same handle on every invocation.
    fn sample_row_keys_callable(&self) -> SampleRowKeysCallable;

    /// Release transport resources
    async fn close(&self) -> Result<()>;
}

use std::fmt::Debug;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::debug;
use tracing::debug_span;
use tracing::Instrument;

use crate::ApiFuture;
use crate::DataStub;
use crate::KeyOffset;
use crate::Query;
use crate::ReadRowsCallable;
use crate::ResponseObserver;
use crate::Result;
use crate::Row;
use crate::SampleRowKeysCallable;

/// Typed entry point for reading from a table.
///
/// Every method forwards 1:1 to the matching callable of the wrapped
/// [`DataStub`]: arguments and results are passed through untouched and stub
/// failures surface unchanged.
///
/// # Example
/// ```no_run
/// use bigtable_data_client::{DataClient, DataSettings, EmulatorStub, Query};
///
/// # async fn demo() -> bigtable_data_client::Result<()> {
/// let settings = DataSettings::load(None)?;
/// let client = DataClient::new(EmulatorStub::new(&settings));
///
/// let rows = client.read_rows(Query::create("fake-table").prefix("user#")).await?;
/// let splits = client.sample_row_keys("fake-table").await?;
///
/// client.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct DataClient {
    stub: Box<dyn DataStub>,
}

impl Debug for DataClient {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("DataClient").finish()
    }
}

impl DataClient {
    /// Wrap a pre-built stub. The client takes over closing it.
    pub fn new(stub: impl DataStub) -> Self {
        Self {
            stub: Box::new(stub),
        }
    }

    /// Close the underlying stub.
    ///
    /// Consumes the client, so the stub is closed exactly once and no call can
    /// follow. Any failure from the stub is returned unchanged.
    pub async fn close(self) -> Result<()> {
        debug!("closing data client");
        self.stub.close().await
    }

    /// The stub's streaming-read callable, for custom invocation forms or
    /// cancellation
    pub fn read_rows_callable(&self) -> ReadRowsCallable {
        self.stub.read_rows_callable()
    }

    /// Read every row selected by `query`.
    ///
    /// Same as `read_rows_callable().call(query)`.
    pub async fn read_rows(
        &self,
        query: Query,
    ) -> Result<Vec<Row>> {
        let span = debug_span!("read_rows", table = query.table_id());
        let callable = self.read_rows_callable();

        async move {
            let started = Instant::now();
            let result = callable.call(query).await;
            match &result {
                Ok(rows) => debug!(
                    rows = rows.len(),
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "read_rows finished"
                ),
                Err(e) => debug!(code = ?e.code(), "read_rows failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Stream the rows selected by `query` into `observer`; returns
    /// immediately.
    ///
    /// Same as `read_rows_callable().call_with_observer(query, observer)`.
    pub fn read_rows_async(
        &self,
        query: Query,
        observer: Arc<dyn ResponseObserver<Row>>,
    ) {
        debug!(table = query.table_id(), "read_rows_async");

        self.read_rows_callable().call_with_observer(query, observer)
    }

    /// The stub's row-key sampling callable
    pub fn sample_row_keys_callable(&self) -> SampleRowKeysCallable {
        self.stub.sample_row_keys_callable()
    }

    /// Sample split points of `table_id`; returns a handle immediately.
    ///
    /// Same as `sample_row_keys_callable().future_call(table_id)`.
    pub fn sample_row_keys(
        &self,
        table_id: impl Into<String>,
    ) -> ApiFuture<Vec<KeyOffset>> {
        let table_id = table_id.into();
        debug!(table = %table_id, "sample_row_keys");

        self.sample_row_keys_callable().future_call(table_id)
    }
}

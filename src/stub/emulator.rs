//! In-process [`DataStub`] backed by in-memory tables.
//!
//! Serves reads and row-key sampling without a network, for local development
//! and tests. Tables are seeded directly through [`EmulatorStub`]; there is no
//! mutation RPC.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use bytes::Bytes;
use dashmap::mapref::entry::Entry as DashEntry;
use dashmap::DashMap;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::async_trait;
use tonic::Status;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::DataStub;
use super::ReadRowsCallable;
use super::SampleRowKeysCallable;
use crate::ApiFuture;
use crate::DataSettings;
use crate::Error;
use crate::KeyOffset;
use crate::Query;
use crate::ResponseStream;
use crate::Result;
use crate::Row;
use crate::RowCell;
use crate::ServerStreamingCallable;
use crate::UnaryCallable;

type Table = BTreeMap<Bytes, Row>;

struct EmulatorState {
    settings: DataSettings,
    tables: DashMap<String, Table>,
    closed: AtomicBool,
}

impl EmulatorState {
    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::StubClosed);
        }
        Ok(())
    }

    fn table_not_found(
        &self,
        table_id: &str,
    ) -> Error {
        Status::not_found(format!(
            "table {} not found",
            self.settings.table_name(table_id)
        ))
        .into()
    }

    /// Rows selected by `query`, in key order, limit applied
    fn select_rows(
        &self,
        query: &Query,
    ) -> Result<Vec<Row>> {
        self.ensure_open()?;
        let table = self
            .tables
            .get(query.table_id())
            .ok_or_else(|| self.table_not_found(query.table_id()))?;

        let limit = query
            .row_limit()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(usize::MAX);

        Ok(table
            .values()
            .filter(|row| query.matches(row.key()))
            .take(limit)
            .cloned()
            .collect())
    }

    /// Split points roughly every `sample_interval_bytes`, ending with the
    /// empty-key end-of-table marker
    fn sample(
        &self,
        table_id: &str,
    ) -> Result<Vec<KeyOffset>> {
        self.ensure_open()?;
        let table = self.tables.get(table_id).ok_or_else(|| self.table_not_found(table_id))?;

        let interval = self.settings.emulator.sample_interval_bytes.max(1);
        let mut offsets = Vec::new();
        let mut total: u64 = 0;
        let mut next_boundary = interval;

        for row in table.values() {
            total += row.approximate_size() as u64;
            if total >= next_boundary {
                offsets.push(KeyOffset::create(row.key(), total as i64));
                next_boundary = (total / interval + 1) * interval;
            }
        }
        offsets.push(KeyOffset::create(Bytes::new(), total as i64));

        Ok(offsets)
    }
}

struct EmulatedReadRows {
    state: Arc<EmulatorState>,
}

#[async_trait]
impl ServerStreamingCallable<Query, Row> for EmulatedReadRows {
    fn stream(
        &self,
        query: Query,
    ) -> ResponseStream<Row> {
        let rows = match self.state.select_rows(&query) {
            Ok(rows) => rows,
            Err(e) => return futures::stream::once(async move { Err(e) }).boxed(),
        };
        debug!(
            table = query.table_id(),
            rows = rows.len(),
            "emulator streaming rows"
        );

        let (tx, rx) = mpsc::channel(self.state.settings.emulator.stream_buffer.max(1));
        tokio::spawn(async move {
            for row in rows {
                if tx.send(Ok(row)).await.is_err() {
                    debug!("read stream dropped by consumer");
                    return;
                }
            }
        });

        ReceiverStream::new(rx).boxed()
    }
}

struct EmulatedSampleRowKeys {
    state: Arc<EmulatorState>,
}

#[async_trait]
impl UnaryCallable<String, Vec<KeyOffset>> for EmulatedSampleRowKeys {
    fn future_call(
        &self,
        table_id: String,
    ) -> ApiFuture<Vec<KeyOffset>> {
        let state = self.state.clone();
        ApiFuture::spawn(async move { state.sample(&table_id) })
    }
}

/// In-memory stub; clones share the same tables and callables.
#[derive(Clone)]
pub struct EmulatorStub {
    state: Arc<EmulatorState>,
    read_rows: ReadRowsCallable,
    sample_row_keys: SampleRowKeysCallable,
}

impl Debug for EmulatorStub {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("EmulatorStub")
            .field("instance", &self.state.settings.instance_name())
            .field("tables", &self.state.tables.len())
            .finish()
    }
}

impl EmulatorStub {
    pub fn new(settings: &DataSettings) -> Self {
        let state = Arc::new(EmulatorState {
            settings: settings.clone(),
            tables: DashMap::new(),
            closed: AtomicBool::new(false),
        });

        Self {
            read_rows: Arc::new(EmulatedReadRows {
                state: state.clone(),
            }),
            sample_row_keys: Arc::new(EmulatedSampleRowKeys {
                state: state.clone(),
            }),
            state,
        }
    }

    /// Create an empty table. Returns `false` if it already existed.
    ///
    /// An empty `table_id` is rejected with `InvalidArgument`.
    pub fn create_table(
        &self,
        table_id: impl Into<String>,
    ) -> Result<bool> {
        self.state.ensure_open()?;
        let table_id = table_id.into();
        if table_id.is_empty() {
            return Err(Status::invalid_argument("table id must not be empty").into());
        }
        let table_name = self.state.settings.table_name(&table_id);
        match self.state.tables.entry(table_id) {
            DashEntry::Occupied(_) => Ok(false),
            DashEntry::Vacant(entry) => {
                entry.insert(Table::new());
                debug!(table = %table_name, "emulator table created");
                Ok(true)
            }
        }
    }

    /// Write every cell of `row`, merging with any existing row at that key
    pub fn put_row(
        &self,
        table_id: &str,
        row: Row,
    ) -> Result<()> {
        self.state.ensure_open()?;
        let mut table = self
            .state
            .tables
            .get_mut(table_id)
            .ok_or_else(|| self.state.table_not_found(table_id))?;

        match table.entry(row.key().clone()) {
            Entry::Occupied(mut existing) => {
                for cell in row.cells() {
                    existing.get_mut().upsert_cell(cell.clone());
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(row);
            }
        }
        Ok(())
    }

    /// Write a single cell, creating the row if needed
    pub fn put_cell(
        &self,
        table_id: &str,
        key: impl AsRef<[u8]>,
        cell: RowCell,
    ) -> Result<()> {
        self.put_row(table_id, Row::create(key, vec![cell]))
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl DataStub for EmulatorStub {
    fn read_rows_callable(&self) -> ReadRowsCallable {
        self.read_rows.clone()
    }

    fn sample_row_keys_callable(&self) -> SampleRowKeysCallable {
        self.sample_row_keys.clone()
    }

    async fn close(&self) -> Result<()> {
        if self.state.closed.swap(true, Ordering::AcqRel) {
            warn!("emulator stub already closed");
        } else {
            info!(
                instance = %self.state.settings.instance_name(),
                "emulator stub closed"
            );
        }
        Ok(())
    }
}

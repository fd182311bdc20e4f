//! # bigtable-data-client
//!
//! Typed data client for a wide-column key-value store.
//!
//! [`DataClient`] is a thin façade over a [`DataStub`]: the stub owns the
//! transport (channels, retries, row merging) and hands out one callable per
//! remote operation; the client forwards to those callables without touching
//! arguments, results or errors. Swap the stub to change transports, or inject
//! a test double.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bigtable_data_client::{DataClient, DataSettings, EmulatorStub, Query};
//!
//! #[tokio::main]
//! async fn main() -> bigtable_data_client::Result<()> {
//!     let settings = DataSettings::new("my-project", "my-instance");
//!     let emulator = EmulatorStub::new(&settings);
//!     emulator.create_table("users")?;
//!
//!     let client = DataClient::new(emulator);
//!     for row in client.read_rows(Query::create("users").prefix("user#")).await? {
//!         println!("{:?}", row.key());
//!     }
//!
//!     client.close().await
//! }
//! ```
//!
//! ## Invocation forms
//!
//! - `read_rows` - await the full result
//! - `read_rows_async` - push rows to a [`ResponseObserver`]
//! - `sample_row_keys` - eagerly running [`ApiFuture`]
//! - `read_rows_callable` / `sample_row_keys_callable` - raw callables, for
//!   streaming and cancellation

mod callable;
mod client;
mod errors;
mod model;
mod settings;
mod stub;

pub use callable::*;
pub use client::*;
pub use errors::*;
pub use model::*;
pub use settings::*;
pub use stub::*;

#[cfg(test)]
pub(crate) mod test_utils;

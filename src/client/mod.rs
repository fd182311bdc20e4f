//! Client module for reading from the store
//!
//! - [`DataClient`] - typed façade over an injected [`DataStub`](crate::DataStub)

mod data_client;

pub use data_client::*;

#[cfg(test)]
mod data_client_test;

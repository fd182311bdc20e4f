//! Value types exchanged with a [`DataStub`](crate::DataStub).
//!
//! - [`Query`] - table plus row selection for a streaming read
//! - [`Row`] / [`RowCell`] - one materialized row and its cells
//! - [`KeyOffset`] - a sampled row-key boundary with its approximate offset

mod key_offset;
mod query;
mod row;

pub use key_offset::*;
pub use query::*;
pub use row::*;

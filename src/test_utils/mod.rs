//! Shared helpers for unit tests: a channel-backed observer and row fixtures.

mod recording_observer;

pub(crate) use recording_observer::*;

use crate::Row;
use crate::RowCell;

/// Row with a single `profile:name` cell
pub(crate) fn named_row(
    key: &str,
    name: &str,
) -> Row {
    Row::create(
        key,
        vec![RowCell::create("profile", "name", 1_000, vec![], name)],
    )
}

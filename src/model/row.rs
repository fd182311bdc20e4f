use std::cmp::Ordering;

use bytes::Bytes;

/// One versioned value inside a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCell {
    pub family: String,
    pub qualifier: Bytes,
    pub timestamp_micros: i64,
    pub labels: Vec<String>,
    pub value: Bytes,
}

impl RowCell {
    pub fn create(
        family: impl Into<String>,
        qualifier: impl AsRef<[u8]>,
        timestamp_micros: i64,
        labels: Vec<String>,
        value: impl AsRef<[u8]>,
    ) -> Self {
        Self {
            family: family.into(),
            qualifier: Bytes::copy_from_slice(qualifier.as_ref()),
            timestamp_micros,
            labels,
            value: Bytes::copy_from_slice(value.as_ref()),
        }
    }

    /// Family asc, qualifier asc, newest version first
    pub(crate) fn storage_order(
        &self,
        other: &Self,
    ) -> Ordering {
        self.family
            .cmp(&other.family)
            .then_with(|| self.qualifier.cmp(&other.qualifier))
            .then_with(|| other.timestamp_micros.cmp(&self.timestamp_micros))
    }

    fn approximate_size(&self) -> usize {
        self.family.len() + self.qualifier.len() + self.value.len() + std::mem::size_of::<i64>()
    }
}

/// A materialized row: its key and cells in storage order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key: Bytes,
    cells: Vec<RowCell>,
}

impl Row {
    /// Build a row; cells are sorted into storage order and a later cell
    /// replaces an earlier one at the same column and timestamp.
    pub fn create(
        key: impl AsRef<[u8]>,
        cells: Vec<RowCell>,
    ) -> Self {
        let mut row = Self {
            key: Bytes::copy_from_slice(key.as_ref()),
            cells: Vec::with_capacity(cells.len()),
        };
        for cell in cells {
            row.upsert_cell(cell);
        }
        row
    }

    pub fn key(&self) -> &Bytes {
        &self.key
    }

    pub fn cells(&self) -> &[RowCell] {
        &self.cells
    }

    /// Versions of one column, newest first
    pub fn cells_for(
        &self,
        family: &str,
        qualifier: impl AsRef<[u8]>,
    ) -> Vec<&RowCell> {
        let qualifier = qualifier.as_ref();
        self.cells
            .iter()
            .filter(|c| c.family == family && c.qualifier.as_ref() == qualifier)
            .collect()
    }

    /// Insert a cell, replacing any cell at the same column and timestamp
    pub(crate) fn upsert_cell(
        &mut self,
        cell: RowCell,
    ) {
        match self.cells.binary_search_by(|c| c.storage_order(&cell)) {
            Ok(pos) => self.cells[pos] = cell,
            Err(pos) => self.cells.insert(pos, cell),
        }
    }

    /// Key plus cell payload bytes; used for sampling
    pub(crate) fn approximate_size(&self) -> usize {
        self.key.len() + self.cells.iter().map(RowCell::approximate_size).sum::<usize>()
    }
}

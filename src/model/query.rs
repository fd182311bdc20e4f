use std::ops::Bound;

use bytes::Bytes;

/// Contiguous span of row keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRange {
    start: Bound<Bytes>,
    end: Bound<Bytes>,
}

impl RowRange {
    pub fn new(
        start: Bound<Bytes>,
        end: Bound<Bytes>,
    ) -> Self {
        Self { start, end }
    }

    /// Every key in the table
    pub fn unbounded() -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded)
    }

    /// `[start, end)`
    pub fn closed_open(
        start: impl AsRef<[u8]>,
        end: impl AsRef<[u8]>,
    ) -> Self {
        Self::new(
            Bound::Included(Bytes::copy_from_slice(start.as_ref())),
            Bound::Excluded(Bytes::copy_from_slice(end.as_ref())),
        )
    }

    /// `[start, end]`
    pub fn closed(
        start: impl AsRef<[u8]>,
        end: impl AsRef<[u8]>,
    ) -> Self {
        Self::new(
            Bound::Included(Bytes::copy_from_slice(start.as_ref())),
            Bound::Included(Bytes::copy_from_slice(end.as_ref())),
        )
    }

    /// `(start, end)`
    pub fn open(
        start: impl AsRef<[u8]>,
        end: impl AsRef<[u8]>,
    ) -> Self {
        Self::new(
            Bound::Excluded(Bytes::copy_from_slice(start.as_ref())),
            Bound::Excluded(Bytes::copy_from_slice(end.as_ref())),
        )
    }

    /// Every key starting with `prefix`.
    ///
    /// The end bound is the prefix with its trailing `0xFF` bytes dropped and
    /// its last byte incremented; a prefix with no such byte is unbounded.
    pub fn prefix(prefix: impl AsRef<[u8]>) -> Self {
        let prefix = prefix.as_ref();
        if prefix.is_empty() {
            return Self::unbounded();
        }

        let start = Bound::Included(Bytes::copy_from_slice(prefix));
        let end = match prefix.iter().rposition(|b| *b != 0xFF) {
            Some(pos) => {
                let mut end = prefix[..=pos].to_vec();
                end[pos] += 1;
                Bound::Excluded(Bytes::from(end))
            }
            None => Bound::Unbounded,
        };
        Self::new(start, end)
    }

    pub fn start(&self) -> &Bound<Bytes> {
        &self.start
    }

    pub fn end(&self) -> &Bound<Bytes> {
        &self.end
    }

    pub fn contains(
        &self,
        key: &[u8],
    ) -> bool {
        let after_start = match &self.start {
            Bound::Unbounded => true,
            Bound::Included(start) => key >= start.as_ref(),
            Bound::Excluded(start) => key > start.as_ref(),
        };
        let before_end = match &self.end {
            Bound::Unbounded => true,
            Bound::Included(end) => key <= end.as_ref(),
            Bound::Excluded(end) => key < end.as_ref(),
        };
        after_start && before_end
    }
}

/// Read request descriptor: a target table plus the rows to select.
///
/// A query without row keys or ranges selects the whole table.
///
/// # Example
/// ```
/// use bigtable_data_client::Query;
///
/// let query = Query::create("fake-table")
///     .row_key("user#1001")
///     .prefix("order#")
///     .limit(100);
/// assert!(query.matches(b"order#42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table_id: String,
    row_keys: Vec<Bytes>,
    ranges: Vec<RowRange>,
    limit: Option<u64>,
}

impl Query {
    pub fn create(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            row_keys: Vec::new(),
            ranges: Vec::new(),
            limit: None,
        }
    }

    /// Select a single row by its exact key
    pub fn row_key(
        mut self,
        key: impl AsRef<[u8]>,
    ) -> Self {
        self.row_keys.push(Bytes::copy_from_slice(key.as_ref()));
        self
    }

    /// Select every row inside `range`
    pub fn range(
        mut self,
        range: RowRange,
    ) -> Self {
        self.ranges.push(range);
        self
    }

    /// Select every row whose key starts with `prefix`
    pub fn prefix(
        self,
        prefix: impl AsRef<[u8]>,
    ) -> Self {
        self.range(RowRange::prefix(prefix))
    }

    /// Return at most `limit` rows. Zero removes the limit.
    pub fn limit(
        mut self,
        limit: u64,
    ) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn row_keys(&self) -> &[Bytes] {
        &self.row_keys
    }

    pub fn ranges(&self) -> &[RowRange] {
        &self.ranges
    }

    pub fn row_limit(&self) -> Option<u64> {
        self.limit
    }

    /// Whether a row with `key` is selected by this query, ignoring the limit
    pub fn matches(
        &self,
        key: &[u8],
    ) -> bool {
        if self.row_keys.is_empty() && self.ranges.is_empty() {
            return true;
        }
        self.row_keys.iter().any(|k| k.as_ref() == key) || self.ranges.iter().any(|r| r.contains(key))
    }
}

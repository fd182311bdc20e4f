use bytes::Bytes;

/// A sampled split point: rows with keys up to `key` span roughly
/// `offset_bytes` bytes of the table.
///
/// An empty `key` marks the end of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOffset {
    key: Bytes,
    offset_bytes: i64,
}

impl KeyOffset {
    pub fn create(
        key: impl AsRef<[u8]>,
        offset_bytes: i64,
    ) -> Self {
        Self {
            key: Bytes::copy_from_slice(key.as_ref()),
            offset_bytes,
        }
    }

    pub fn key(&self) -> &Bytes {
        &self.key
    }

    pub fn offset_bytes(&self) -> i64 {
        self.offset_bytes
    }
}

//! In-memory log storage.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};

/// Log storage held entirely in memory.
///
/// Backs ephemeral counter stores and tests: a fresh, empty log with no
/// tempdir bookkeeping, gone when dropped. The buffer is a plain `Vec`
/// with a replay cursor alongside it.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: Vec<u8>,
    cursor: usize,
}

impl InMemoryBackend {
    /// Creates an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory log already containing `data`.
    ///
    /// Lets recovery tests hand the replay path arbitrary bytes,
    /// including deliberately damaged ones.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }
}

impl StorageBackend for InMemoryBackend {
    fn append(&mut self, data: &[u8]) -> StorageResult<u64> {
        let offset = self.data.len() as u64;
        self.data.extend_from_slice(data);
        Ok(offset)
    }

    fn sync(&mut self) -> StorageResult<()> {
        // Nothing to make durable
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.data.len() as u64)
    }

    fn rewind(&mut self) -> StorageResult<()> {
        self.cursor = 0;
        Ok(())
    }

    fn read_next(&mut self, len: usize) -> StorageResult<Vec<u8>> {
        let end = self.cursor.saturating_add(len);
        if end > self.data.len() {
            return Err(StorageError::ReadPastEnd {
                offset: self.cursor as u64,
                len,
                size: self.data.len() as u64,
            });
        }
        let bytes = self.data[self.cursor..end].to_vec();
        self.cursor = end;
        Ok(bytes)
    }
}

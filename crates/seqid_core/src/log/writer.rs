//! Allocation log writer.

use crate::error::CounterResult;
use crate::log::record::{compute_crc32, LogRecord, LOG_MAGIC, LOG_VERSION};
use parking_lot::Mutex;
use seqid_storage::StorageBackend;
use std::sync::Arc;

/// Header size for log records.
/// magic (4) + version (2) + type (1) + length (4) = 11 bytes
pub(crate) const HEADER_SIZE: usize = 11;

/// CRC size.
pub(crate) const CRC_SIZE: usize = 4;

/// Manages allocation log writes and replay.
///
/// The `AllocationLog` provides append-only writes and supports streaming
/// replay of records for rebuilding counter state on open.
pub struct AllocationLog {
    /// Storage backend for log data.
    backend: Arc<Mutex<Box<dyn StorageBackend>>>,
    /// Whether to sync after each write.
    sync_on_write: bool,
}

impl AllocationLog {
    /// Creates a new allocation log over the given backend.
    pub fn new(backend: Box<dyn StorageBackend>, sync_on_write: bool) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
            sync_on_write,
        }
    }

    /// Appends a record to the log.
    ///
    /// Returns the offset where the record was written. With
    /// `sync_on_write` enabled the record is durable when this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or the backend
    /// write fails. On failure nothing is acknowledged as written.
    pub fn append(&self, record: &LogRecord) -> CounterResult<u64> {
        let payload = record.encode_payload()?;

        let mut data = Vec::with_capacity(HEADER_SIZE + payload.len() + CRC_SIZE);
        data.extend_from_slice(&LOG_MAGIC);
        data.extend_from_slice(&LOG_VERSION.to_le_bytes());
        data.push(record.record_type().as_byte());
        // Payload length fits: keys are capped at u16::MAX bytes
        let len = payload.len() as u32;
        data.extend_from_slice(&len.to_le_bytes());
        data.extend_from_slice(&payload);

        // CRC32 over everything before it
        let crc = compute_crc32(&data);
        data.extend_from_slice(&crc.to_le_bytes());

        let mut backend = self.backend.lock();
        let offset = backend.append(&data)?;

        if self.sync_on_write {
            backend.sync()?;
        }

        Ok(offset)
    }

    /// Returns the current log size in bytes.
    pub fn size(&self) -> CounterResult<u64> {
        Ok(self.backend.lock().size()?)
    }

    /// Returns a streaming iterator over log records.
    ///
    /// The iterator holds the backend lock for its lifetime; it is meant
    /// for replay during open, before the store is shared.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend size cannot be determined.
    pub fn iter(&self) -> CounterResult<super::LogRecordIterator<'_>> {
        let backend = self.backend.lock();
        super::LogRecordIterator::new(backend)
    }

    /// Returns the backend for testing purposes.
    ///
    /// This allows tests to directly manipulate the underlying storage
    /// to simulate crash scenarios like truncated writes or corruption.
    #[cfg(test)]
    pub(crate) fn get_backend_for_testing(&self) -> Arc<Mutex<Box<dyn StorageBackend>>> {
        Arc::clone(&self.backend)
    }
}

impl std::fmt::Debug for AllocationLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllocationLog")
            .field("sync_on_write", &self.sync_on_write)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqid_storage::InMemoryBackend;

    fn create_log() -> AllocationLog {
        AllocationLog::new(Box::new(InMemoryBackend::new()), false)
    }

    fn allocate(key: &str, value: u64) -> LogRecord {
        LogRecord::Allocate {
            key: key.to_string(),
            value,
        }
    }

    #[test]
    fn append_and_read_single_record() {
        let log = create_log();
        let record = allocate("course_COLL001", 1);
        log.append(&record).unwrap();

        let records: Vec<_> = log.iter().unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1, record);
    }

    #[test]
    fn append_multiple_records() {
        let log = create_log();

        let r1 = allocate("course_COLL001", 1);
        let r2 = allocate("course_COLL001", 2);
        let r3 = allocate("document_USER123", 1);

        log.append(&r1).unwrap();
        log.append(&r2).unwrap();
        log.append(&r3).unwrap();

        let records: Vec<_> = log.iter().unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].1, r1);
        assert_eq!(records[1].1, r2);
        assert_eq!(records[2].1, r3);
    }

    #[test]
    fn read_empty_log() {
        let log = create_log();
        let records: Vec<_> = log.iter().unwrap().collect();
        assert!(records.is_empty());
    }

    #[test]
    fn log_size_increases() {
        let log = create_log();
        assert_eq!(log.size().unwrap(), 0);

        log.append(&allocate("course_COLL001", 1)).unwrap();

        assert!(log.size().unwrap() > 0);
    }

    #[test]
    fn offsets_are_increasing() {
        let log = create_log();

        let o1 = log.append(&allocate("a", 1)).unwrap();
        let o2 = log.append(&allocate("a", 2)).unwrap();

        assert_eq!(o1, 0);
        assert!(o2 > o1);
    }

    #[test]
    fn sync_on_write_append_succeeds() {
        let log = AllocationLog::new(Box::new(InMemoryBackend::new()), true);
        log.append(&allocate("a", 1)).unwrap();
        assert_eq!(log.iter().unwrap().count(), 1);
    }
}

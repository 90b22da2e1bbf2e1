//! Streaming allocation log iterator.
//!
//! Walks the backend's replay cursor front to back, one record at a
//! time: a header read, then a payload-plus-checksum read. Allocation
//! records are small (a short key plus a fixed value field), so no
//! chunked buffering is needed; memory stays bounded by the largest
//! single record.

use crate::error::{CounterError, CounterResult};
use crate::log::record::{compute_crc32, LogRecord, LogRecordType, LOG_MAGIC, LOG_VERSION};
use crate::log::writer::{CRC_SIZE, HEADER_SIZE};
use parking_lot::MutexGuard;
use seqid_storage::StorageBackend;

/// A streaming iterator over allocation log records.
///
/// Yields `(offset, LogRecord)` pairs in log order.
///
/// # Error Handling
///
/// - Truncated records at the end of the log (incomplete header or
///   payload) are treated as a clean end of log
/// - CRC mismatches, invalid magic bytes, unknown record types, and
///   future format versions return an error immediately
pub struct LogRecordIterator<'a> {
    /// Locked storage backend to read from.
    backend: MutexGuard<'a, Box<dyn StorageBackend>>,
    /// Total size of the log.
    total_size: u64,
    /// Current read position in the log.
    current_offset: u64,
    /// Whether we've encountered an error or reached the end.
    finished: bool,
}

impl<'a> LogRecordIterator<'a> {
    /// Creates a new iterator reading from the start of the log.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend size cannot be determined or the
    /// replay cursor cannot be repositioned.
    pub fn new(mut backend: MutexGuard<'a, Box<dyn StorageBackend>>) -> CounterResult<Self> {
        let total_size = backend.size()?;
        backend.rewind()?;
        Ok(Self {
            backend,
            total_size,
            current_offset: 0,
            finished: false,
        })
    }

    /// Reads the next record from the log.
    ///
    /// Returns `Ok(Some((offset, record)))` for a valid record,
    /// `Ok(None)` at end of log or on a truncated tail record,
    /// `Err(...)` on corruption or I/O error.
    fn read_next_record(&mut self) -> CounterResult<Option<(u64, LogRecord)>> {
        if self.finished {
            return Ok(None);
        }

        let record_start = self.current_offset;
        let remaining = self.total_size - record_start;

        if remaining < HEADER_SIZE as u64 {
            // Clean end of log, or a header cut short by a crash mid-write
            self.finished = true;
            return Ok(None);
        }

        let header = self.backend.read_next(HEADER_SIZE)?;

        if header[0..4] != LOG_MAGIC {
            self.finished = true;
            return Err(CounterError::corruption(format!(
                "invalid magic at offset {record_start}"
            )));
        }

        let version = u16::from_le_bytes([header[4], header[5]]);
        if version > LOG_VERSION {
            self.finished = true;
            return Err(CounterError::corruption(format!(
                "unsupported version {version} at offset {record_start}"
            )));
        }

        let type_byte = header[6];
        let record_type = LogRecordType::from_byte(type_byte).ok_or_else(|| {
            CounterError::corruption(format!(
                "unknown record type {type_byte} at offset {record_start}"
            ))
        })?;

        let payload_len =
            u32::from_le_bytes([header[7], header[8], header[9], header[10]]) as usize;
        let total_len = HEADER_SIZE + payload_len + CRC_SIZE;

        if remaining < total_len as u64 {
            // Payload cut short by a crash mid-write - the allocation was
            // never acknowledged, so dropping it is safe
            self.finished = true;
            return Ok(None);
        }

        let body = self.backend.read_next(payload_len + CRC_SIZE)?;
        let payload = &body[..payload_len];
        let stored_crc = u32::from_le_bytes([
            body[payload_len],
            body[payload_len + 1],
            body[payload_len + 2],
            body[payload_len + 3],
        ]);

        // CRC covers header + payload
        let mut checked = header;
        checked.extend_from_slice(payload);
        let computed_crc = compute_crc32(&checked);

        if stored_crc != computed_crc {
            self.finished = true;
            return Err(CounterError::ChecksumMismatch {
                expected: stored_crc,
                actual: computed_crc,
            });
        }

        let record = LogRecord::decode_payload(record_type, payload)?;

        self.current_offset += total_len as u64;
        Ok(Some((record_start, record)))
    }
}

impl Iterator for LogRecordIterator<'_> {
    type Item = CounterResult<(u64, LogRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_next_record() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

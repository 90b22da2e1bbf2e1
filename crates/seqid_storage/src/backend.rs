//! Storage backend trait definition.

use crate::error::StorageResult;

/// Byte storage for an allocation log.
///
/// The log only ever does two things with its storage: append one
/// encoded record at the end, and replay the whole log front to back
/// when a store opens. The trait is shaped around exactly that - an
/// append call, a sync barrier, and a sequential read cursor - rather
/// than general random-access I/O.
///
/// Access is serialized by the caller (the log keeps its backend behind
/// a mutex), so implementations take `&mut self` and need no interior
/// locking. `Send` is required so a counter store can move between
/// threads.
///
/// # Invariants
///
/// - `append` returns the offset where the data landed; offsets are
///   strictly increasing
/// - after `sync` returns, all appended data survives process death
/// - `rewind` followed by `read_next` calls yields exactly the bytes
///   appended, in order
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - ephemeral stores and tests
/// - [`super::FileBackend`] - persistent storage
pub trait StorageBackend: Send {
    /// Appends `data` at the end of the log.
    ///
    /// Returns the offset where the data was written.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs. Nothing is acknowledged
    /// as written in that case.
    fn append(&mut self, data: &[u8]) -> StorageResult<u64>;

    /// Forces all appended data down to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync fails.
    fn sync(&mut self) -> StorageResult<()>;

    /// Returns the total number of bytes in the log.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Moves the replay cursor back to the start of the log.
    ///
    /// # Errors
    ///
    /// Returns an error if repositioning fails.
    fn rewind(&mut self) -> StorageResult<()>;

    /// Reads exactly `len` bytes at the replay cursor and advances it.
    ///
    /// # Errors
    ///
    /// Returns [`ReadPastEnd`](crate::StorageError::ReadPastEnd) if
    /// fewer than `len` bytes remain, or an error if the read fails.
    fn read_next(&mut self, len: usize) -> StorageResult<Vec<u8>>;
}

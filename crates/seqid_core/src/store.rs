//! Durable counter store with atomic allocation.

use crate::config::Config;
use crate::error::{CounterError, CounterResult};
use crate::log::{AllocationLog, LogRecord};
use parking_lot::Mutex;
use seqid_storage::{InMemoryBackend, StorageBackend};
use std::collections::HashMap;

/// A persistent mapping from counter key to last-issued sequence value,
/// with an atomic "allocate next" operation.
///
/// # Guarantees
///
/// For a fixed key, every call to [`allocate_next`] returns a value
/// strictly greater than all previous calls for that key, and no two
/// callers ever receive the same value - even when calls race. The first
/// allocation for a previously unseen key returns `1`.
///
/// Counters are permanent: there is no delete or reset operation, and a
/// counter outlives whatever entities it numbered.
///
/// # Concurrency
///
/// A single mutex spans the whole read-increment-log-update cycle, so
/// concurrent allocations are serialized. Callers hold no other
/// coordination responsibilities; the store is `Send + Sync` and is
/// typically shared behind an [`Arc`](std::sync::Arc).
///
/// # Failure
///
/// If the allocation record cannot be durably appended, the call fails
/// with [`CounterError::StorageUnavailable`] and the in-memory counter
/// is left untouched - no value is ever fabricated on failure.
///
/// [`allocate_next`]: CounterStore::allocate_next
#[derive(Debug)]
pub struct CounterStore {
    /// Last-issued value per counter key.
    counters: Mutex<HashMap<String, u64>>,
    /// Durable allocation log.
    log: AllocationLog,
}

impl CounterStore {
    /// Opens a counter store over the given backend, replaying the
    /// allocation log to rebuild counter state.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read or is corrupted.
    /// Corruption is fatal: opening anyway could resurrect a stale
    /// counter value and hand out duplicates.
    pub fn open(backend: Box<dyn StorageBackend>, config: Config) -> CounterResult<Self> {
        let log = AllocationLog::new(backend, config.sync_on_write);

        let mut counters = HashMap::new();
        let mut replayed = 0u64;
        for result in log.iter()? {
            let (_, record) = result?;
            match record {
                LogRecord::Allocate { key, value } => {
                    // Values are strictly increasing per key in log
                    // order, so the last record for a key wins
                    counters.insert(key, value);
                }
            }
            replayed += 1;
        }

        tracing::info!(
            records = replayed,
            counters = counters.len(),
            "counter store opened"
        );

        Ok(Self {
            counters: Mutex::new(counters),
            log,
        })
    }

    /// Opens an ephemeral in-memory counter store.
    ///
    /// Useful for tests and for embedders that do not need counters to
    /// survive a restart.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`open`](Self::open).
    pub fn open_in_memory() -> CounterResult<Self> {
        Self::open(Box::new(InMemoryBackend::new()), Config::default())
    }

    /// Atomically allocates the next sequence value for `key`.
    ///
    /// If no counter exists for `key`, it is created with an implicit
    /// starting value of 0 before the increment, so the first returned
    /// value is `1` (upsert semantics). The allocation record is appended
    /// to the log before the in-memory counter is updated; callers
    /// suspend until the store acknowledges the write.
    ///
    /// # Errors
    ///
    /// - [`CounterError::InvalidKey`] if `key` is empty
    /// - [`CounterError::StorageUnavailable`] if the log write fails;
    ///   the counter value is unchanged in that case
    pub fn allocate_next(&self, key: &str) -> CounterResult<u64> {
        if key.is_empty() {
            return Err(CounterError::invalid_key("counter key must not be empty"));
        }

        let mut counters = self.counters.lock();
        let next = counters.get(key).copied().unwrap_or(0) + 1;

        // Durable first, visible second: a failed append must leave the
        // counter exactly as it was
        self.log.append(&LogRecord::Allocate {
            key: key.to_string(),
            value: next,
        })?;

        counters.insert(key.to_string(), next);
        tracing::debug!(key, value = next, "allocated sequence value");
        Ok(next)
    }

    /// Returns the last-issued value for `key`, or `None` if no value
    /// has ever been allocated for it.
    #[must_use]
    pub fn current(&self, key: &str) -> Option<u64> {
        self.counters.lock().get(key).copied()
    }

    /// Returns the number of distinct counter keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counters.lock().len()
    }

    /// Returns `true` if no counter has ever been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.lock().is_empty()
    }
}

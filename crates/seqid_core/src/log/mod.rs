//! Append-only allocation log for durability and crash recovery.
//!
//! Every successful allocation is written to the log before the in-memory
//! counter is updated. On open, the log is replayed to rebuild the
//! key-to-value map, so sequences resume exactly where they left off.
//!
//! ## Record Format
//!
//! ```text
//! | magic (4) | version (2) | type (1) | length (4) | payload (N) | crc32 (4) |
//! ```
//!
//! ## Recovery Policy
//!
//! Replay distinguishes between **tolerated** and **fatal** conditions:
//!
//! ### Tolerated Conditions (treat as clean end-of-log)
//!
//! - **Truncated header**: Fewer than 11 bytes available at end
//! - **Truncated payload**: Record length exceeds available bytes
//!
//! These represent crashes mid-write before fsync completed. The incomplete
//! record is discarded; the allocation it described was never acknowledged
//! to any caller, so dropping it cannot produce a duplicate.
//!
//! ### Fatal Conditions (abort open with error)
//!
//! - **CRC mismatch**: Stored checksum doesn't match computed
//! - **Invalid magic bytes**
//! - **Unknown record type**
//! - **Unsupported (future) format version**
//!
//! These indicate actual data corruption. Opening anyway could resurrect a
//! stale counter value and hand out duplicate sequence numbers, so the
//! store refuses to open.
//!
//! ## Invariants
//!
//! - The log is **append-only** - records are never modified after write
//! - A record is **durable before its value is returned** to a caller
//!   (with `sync_on_write` enabled)
//! - Per key, logged values are **strictly increasing** in log order, so
//!   replay can simply keep the last value seen for each key

mod iterator;
mod record;
mod writer;

pub use iterator::LogRecordIterator;
pub use record::{compute_crc32, LogRecord, LogRecordType, LOG_MAGIC, LOG_VERSION};
pub use writer::AllocationLog;

//! # seqid Storage
//!
//! Byte storage for the seqid allocation log.
//!
//! The counter service touches its storage in exactly two ways: it
//! appends one encoded record per allocation, and it replays the whole
//! log front to back when a store opens. [`StorageBackend`] captures
//! just that contract - append, sync, and a sequential replay cursor -
//! and leaves all record-format interpretation to `seqid_core`.
//!
//! Backends take `&mut self` and carry no interior locking; the
//! allocation log serializes access behind its own mutex.
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - ephemeral counter stores and tests
//! - [`FileBackend`] - persistent storage over an append-only file
//!
//! ## Example
//!
//! ```rust
//! use seqid_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! backend.append(b"first").unwrap();
//! backend.append(b"second").unwrap();
//!
//! backend.rewind().unwrap();
//! assert_eq!(backend.read_next(5).unwrap(), b"first");
//! assert_eq!(backend.read_next(6).unwrap(), b"second");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;

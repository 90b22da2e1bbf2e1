//! # seqid Core
//!
//! Durable atomic counter store and sequence-based ID generation.
//!
//! This crate provides:
//! - An append-only allocation log for durability and crash recovery
//! - [`CounterStore`] - atomic "allocate next" semantics per counter key
//! - [`IdGenerator`] - human-readable sequential identifiers
//!   (`{collegeId}-{seq}`, `{collegeId}-{userId}-{seq}`,
//!   `{userId}-DOC-{seq}`)
//! - [`unique_id`] / [`short_id`] - random fallback identifiers
//!
//! ## Guarantees
//!
//! For a fixed counter key, allocated values are exactly `1, 2, 3, ...`
//! with each value issued to exactly one caller, even under concurrent
//! invocation. On failure of the backing store, allocation fails with
//! [`CounterError::StorageUnavailable`] and no ID is produced - a
//! substitute is never fabricated.
//!
//! ## Example
//!
//! ```rust
//! use seqid_core::{CounterStore, IdGenerator};
//! use std::sync::Arc;
//!
//! let store = Arc::new(CounterStore::open_in_memory().unwrap());
//! let ids = IdGenerator::new(Arc::clone(&store));
//!
//! assert_eq!(ids.course_id("COLL001").unwrap(), "COLL001-001");
//! assert_eq!(ids.application_id("COLL001", "USER123").unwrap(), "COLL001-USER123-001");
//! assert_eq!(ids.document_id("USER123").unwrap(), "USER123-DOC-001");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generator;
pub mod log;
mod random;
mod store;

pub use config::Config;
pub use error::{CounterError, CounterResult};
pub use generator::{zero_pad, IdGenerator};
pub use random::{short_id, unique_id};
pub use store::CounterStore;

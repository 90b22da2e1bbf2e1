//! Human-readable sequential ID formatters.
//!
//! Three thin formatters sit on top of [`CounterStore`], each deriving a
//! namespaced counter key from its inputs and zero-padding the allocated
//! sequence value:
//!
//! - Course: `{collegeId}-{seq}` (key `course_<collegeId>`)
//! - Application: `{collegeId}-{userId}-{seq}` (key
//!   `application_<collegeId>_<userId>`)
//! - Document: `{userId}-DOC-{seq}` (key `document_<userId>`)
//!
//! Sequence values are padded to at least 3 digits and widen naturally
//! past 999.

use crate::error::CounterResult;
use crate::store::CounterStore;
use std::sync::Arc;

/// Generates human-readable sequential identifiers.
///
/// Cheap to clone; all clones share the same underlying counter store.
///
/// # Example
///
/// ```rust
/// use seqid_core::{CounterStore, IdGenerator};
/// use std::sync::Arc;
///
/// let store = Arc::new(CounterStore::open_in_memory().unwrap());
/// let ids = IdGenerator::new(store);
///
/// assert_eq!(ids.course_id("COLL001").unwrap(), "COLL001-001");
/// assert_eq!(ids.course_id("COLL001").unwrap(), "COLL001-002");
/// ```
#[derive(Debug, Clone)]
pub struct IdGenerator {
    store: Arc<CounterStore>,
}

impl IdGenerator {
    /// Creates a generator over the given counter store.
    #[must_use]
    pub fn new(store: Arc<CounterStore>) -> Self {
        Self { store }
    }

    /// Generates a course ID: `{collegeId}-{seq}`.
    ///
    /// Each college numbers its courses independently.
    ///
    /// # Errors
    ///
    /// Propagates [`CounterError::StorageUnavailable`] unchanged if the
    /// allocation fails; no ID is produced in that case.
    ///
    /// [`CounterError::StorageUnavailable`]: crate::CounterError::StorageUnavailable
    pub fn course_id(&self, college_id: &str) -> CounterResult<String> {
        let seq = self.store.allocate_next(&format!("course_{college_id}"))?;
        Ok(format!("{college_id}-{}", zero_pad(seq, 3)))
    }

    /// Generates an application ID: `{collegeId}-{userId}-{seq}`.
    ///
    /// The sequence is scoped per (college, user) pair: a user re-applying
    /// to the same college gets `...-001`, `...-002`, while their first
    /// application to a different college starts again at `...-001`.
    ///
    /// # Errors
    ///
    /// Propagates [`CounterError::StorageUnavailable`] unchanged if the
    /// allocation fails.
    ///
    /// [`CounterError::StorageUnavailable`]: crate::CounterError::StorageUnavailable
    pub fn application_id(&self, college_id: &str, user_id: &str) -> CounterResult<String> {
        let seq = self
            .store
            .allocate_next(&format!("application_{college_id}_{user_id}"))?;
        Ok(format!("{college_id}-{user_id}-{}", zero_pad(seq, 3)))
    }

    /// Generates a document ID: `{userId}-DOC-{seq}`.
    ///
    /// Each user numbers their documents independently.
    ///
    /// # Errors
    ///
    /// Propagates [`CounterError::StorageUnavailable`] unchanged if the
    /// allocation fails.
    ///
    /// [`CounterError::StorageUnavailable`]: crate::CounterError::StorageUnavailable
    pub fn document_id(&self, user_id: &str) -> CounterResult<String> {
        let seq = self.store.allocate_next(&format!("document_{user_id}"))?;
        Ok(format!("{user_id}-DOC-{}", zero_pad(seq, 3)))
    }
}

/// Renders `n` in decimal, left-padded with `'0'` to at least `width`
/// characters. Numbers with more digits are rendered in full.
#[must_use]
pub fn zero_pad(n: u64, width: usize) -> String {
    format!("{n:0width$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn generator() -> IdGenerator {
        IdGenerator::new(Arc::new(CounterStore::open_in_memory().unwrap()))
    }

    #[test]
    fn course_ids_are_sequential() {
        let ids = generator();
        assert_eq!(ids.course_id("COLL001").unwrap(), "COLL001-001");
        assert_eq!(ids.course_id("COLL001").unwrap(), "COLL001-002");
        assert_eq!(ids.course_id("COLL001").unwrap(), "COLL001-003");
    }

    #[test]
    fn course_ids_are_per_college() {
        let ids = generator();
        ids.course_id("COLL001").unwrap();
        ids.course_id("COLL001").unwrap();
        assert_eq!(ids.course_id("COLL002").unwrap(), "COLL002-001");
    }

    #[test]
    fn application_ids_are_per_college_user_pair() {
        let ids = generator();
        assert_eq!(
            ids.application_id("COLL001", "USER123").unwrap(),
            "COLL001-USER123-001"
        );
        assert_eq!(
            ids.application_id("COLL001", "USER123").unwrap(),
            "COLL001-USER123-002"
        );
        // Different college restarts the sequence
        assert_eq!(
            ids.application_id("COLL002", "USER123").unwrap(),
            "COLL002-USER123-001"
        );
    }

    #[test]
    fn document_ids_are_per_user() {
        let ids = generator();
        assert_eq!(ids.document_id("USER123").unwrap(), "USER123-DOC-001");
        assert_eq!(ids.document_id("USER999").unwrap(), "USER999-DOC-001");
        assert_eq!(ids.document_id("USER123").unwrap(), "USER123-DOC-002");
    }

    #[test]
    fn formatters_use_separate_namespaces() {
        // "X" as a college for courses and as a user for documents must
        // not share a counter
        let ids = generator();
        ids.course_id("X").unwrap();
        ids.course_id("X").unwrap();
        assert_eq!(ids.document_id("X").unwrap(), "X-DOC-001");
    }

    #[test]
    fn zero_pad_boundaries() {
        assert_eq!(zero_pad(7, 3), "007");
        assert_eq!(zero_pad(100, 3), "100");
        assert_eq!(zero_pad(999, 3), "999");
        assert_eq!(zero_pad(1001, 3), "1001");
    }

    proptest! {
        #[test]
        fn zero_pad_never_truncates(n in 0u64.., width in 0usize..12) {
            let padded = zero_pad(n, width);
            prop_assert!(padded.len() >= width);
            prop_assert_eq!(padded.parse::<u64>().unwrap(), n);
        }
    }
}

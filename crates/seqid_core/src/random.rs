//! Random fallback ID helpers.
//!
//! Legacy generators for entities where ordering and readability are not
//! required. New call sites should prefer the sequential
//! [`IdGenerator`](crate::IdGenerator); these helpers are kept for record
//! primary keys created before the sequential scheme existed.
//!
//! Both consume entropy from the operating system and touch no
//! persistent state.

use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;

/// Generates a globally-unique, non-sequential identifier.
///
/// Returns a version 4 UUID in its standard hyphenated lowercase hex
/// form (128 bits of entropy); collisions are negligible.
///
/// # Example
///
/// ```rust
/// let id = seqid_core::unique_id();
/// assert_eq!(id.len(), 36);
/// ```
#[must_use]
pub fn unique_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a short random identifier: 8 lowercase hex characters from
/// 32 bits of entropy.
///
/// Collision probability is far higher than [`unique_id`] (birthday
/// collisions become likely around ~77k values). Not suitable for
/// identifiers requiring uniqueness guarantees at scale.
#[must_use]
pub fn short_id() -> String {
    let mut bytes = [0u8; 4];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

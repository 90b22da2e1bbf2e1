//! Allocation log record types and serialization.

use crate::error::{CounterError, CounterResult};

/// Magic bytes identifying an allocation log record.
pub const LOG_MAGIC: [u8; 4] = *b"SQLG";

/// Current allocation log format version.
pub const LOG_VERSION: u16 = 1;

/// Maximum counter key length in bytes.
///
/// The payload encodes the key length in a 2-byte field. Real keys are
/// short (`course_<collegeId>` and friends), so this is far above anything
/// a well-behaved caller produces.
pub const MAX_KEY_LEN: usize = u16::MAX as usize;

/// Type of allocation log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LogRecordType {
    /// A sequence value was allocated for a counter key.
    Allocate = 1,
}

impl LogRecordType {
    /// Converts a byte to a record type.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            1 => Some(Self::Allocate),
            _ => None,
        }
    }

    /// Converts the record type to a byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

/// A record in the allocation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    /// A sequence value was allocated for a counter key.
    ///
    /// `value` is the post-increment value handed to the caller. Because
    /// values are strictly increasing per key, the last `Allocate` for a
    /// key in the log carries its current value.
    Allocate {
        /// The counter key.
        key: String,
        /// The allocated sequence value.
        value: u64,
    },
}

impl LogRecord {
    /// Returns the record type.
    #[must_use]
    pub fn record_type(&self) -> LogRecordType {
        match self {
            Self::Allocate { .. } => LogRecordType::Allocate,
        }
    }

    /// Serializes the record payload (without envelope).
    ///
    /// Layout for `Allocate`: `key_len: u16 LE | key bytes | value: u64 LE`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key exceeds [`MAX_KEY_LEN`] bytes.
    pub fn encode_payload(&self) -> CounterResult<Vec<u8>> {
        match self {
            Self::Allocate { key, value } => {
                if key.len() > MAX_KEY_LEN {
                    return Err(CounterError::invalid_key(format!(
                        "counter key too long: {} bytes exceeds maximum of {}",
                        key.len(),
                        MAX_KEY_LEN
                    )));
                }

                let mut buf = Vec::with_capacity(2 + key.len() + 8);
                let key_len = key.len() as u16;
                buf.extend_from_slice(&key_len.to_le_bytes());
                buf.extend_from_slice(key.as_bytes());
                buf.extend_from_slice(&value.to_le_bytes());
                Ok(buf)
            }
        }
    }

    /// Deserializes a record from its type and payload.
    ///
    /// # Errors
    ///
    /// Returns a corruption error if the payload is short, the key is not
    /// valid UTF-8, or trailing bytes remain after the fixed fields.
    pub fn decode_payload(record_type: LogRecordType, payload: &[u8]) -> CounterResult<Self> {
        match record_type {
            LogRecordType::Allocate => {
                if payload.len() < 2 {
                    return Err(CounterError::corruption("unexpected end of payload"));
                }
                let key_len = u16::from_le_bytes([payload[0], payload[1]]) as usize;

                let key_end = 2 + key_len;
                if payload.len() < key_end + 8 {
                    return Err(CounterError::corruption("unexpected end of payload"));
                }

                let key = std::str::from_utf8(&payload[2..key_end])
                    .map_err(|_| CounterError::corruption("counter key is not valid UTF-8"))?
                    .to_string();

                let value_bytes: [u8; 8] = payload[key_end..key_end + 8]
                    .try_into()
                    .map_err(|_| CounterError::corruption("invalid value field"))?;
                let value = u64::from_le_bytes(value_bytes);

                if key_end + 8 != payload.len() {
                    return Err(CounterError::corruption(format!(
                        "trailing bytes in Allocate record: expected {} bytes, got {}",
                        key_end + 8,
                        payload.len()
                    )));
                }

                Ok(Self::Allocate { key, value })
            }
        }
    }
}

/// Computes CRC32 checksum for data (IEEE polynomial).
pub fn compute_crc32(data: &[u8]) -> u32 {
    const CRC32_TABLE: [u32; 256] = {
        let mut table = [0u32; 256];
        let mut i = 0;
        while i < 256 {
            let mut crc = i as u32;
            let mut j = 0;
            while j < 8 {
                if crc & 1 != 0 {
                    crc = (crc >> 1) ^ 0xEDB8_8320;
                } else {
                    crc >>= 1;
                }
                j += 1;
            }
            table[i] = crc;
            i += 1;
        }
        table
    };

    let mut crc = 0xFFFF_FFFF_u32;
    for &byte in data {
        let index = ((crc ^ u32::from(byte)) & 0xFF) as usize;
        crc = (crc >> 8) ^ CRC32_TABLE[index];
    }
    !crc
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn record_type_roundtrip() {
        let t = LogRecordType::Allocate;
        assert_eq!(LogRecordType::from_byte(t.as_byte()), Some(t));
        assert_eq!(LogRecordType::from_byte(0), None);
        assert_eq!(LogRecordType::from_byte(255), None);
    }

    #[test]
    fn allocate_record_roundtrip() {
        let record = LogRecord::Allocate {
            key: "course_COLL001".to_string(),
            value: 42,
        };
        let payload = record.encode_payload().unwrap();
        let decoded = LogRecord::decode_payload(LogRecordType::Allocate, &payload).unwrap();
        assert_eq!(record, decoded);
    }

    #[test]
    fn empty_key_roundtrip() {
        // The store rejects empty keys before logging, but the wire
        // format itself does not care.
        let record = LogRecord::Allocate {
            key: String::new(),
            value: 1,
        };
        let payload = record.encode_payload().unwrap();
        let decoded = LogRecord::decode_payload(LogRecordType::Allocate, &payload).unwrap();
        assert_eq!(record, decoded);
    }

    #[test]
    fn oversized_key_rejected() {
        let record = LogRecord::Allocate {
            key: "k".repeat(MAX_KEY_LEN + 1),
            value: 1,
        };
        let result = record.encode_payload();
        assert!(matches!(result, Err(CounterError::InvalidKey { .. })));
    }

    #[test]
    fn short_payload_is_corruption() {
        let result = LogRecord::decode_payload(LogRecordType::Allocate, &[1]);
        assert!(matches!(result, Err(CounterError::LogCorruption { .. })));
    }

    #[test]
    fn truncated_value_is_corruption() {
        let record = LogRecord::Allocate {
            key: "document_USER123".to_string(),
            value: 7,
        };
        let payload = record.encode_payload().unwrap();
        let result = LogRecord::decode_payload(LogRecordType::Allocate, &payload[..payload.len() - 1]);
        assert!(matches!(result, Err(CounterError::LogCorruption { .. })));
    }

    #[test]
    fn trailing_bytes_are_corruption() {
        let record = LogRecord::Allocate {
            key: "k".to_string(),
            value: 7,
        };
        let mut payload = record.encode_payload().unwrap();
        payload.push(0);
        let result = LogRecord::decode_payload(LogRecordType::Allocate, &payload);
        assert!(matches!(result, Err(CounterError::LogCorruption { .. })));
    }

    #[test]
    fn invalid_utf8_key_is_corruption() {
        // key_len = 2, followed by invalid UTF-8, then an 8-byte value
        let mut payload = vec![2, 0, 0xFF, 0xFE];
        payload.extend_from_slice(&1u64.to_le_bytes());
        let result = LogRecord::decode_payload(LogRecordType::Allocate, &payload);
        assert!(matches!(result, Err(CounterError::LogCorruption { .. })));
    }

    #[test]
    fn crc32_known_value() {
        // Known test vector: "123456789" should give 0xCBF43926
        let crc = compute_crc32(b"123456789");
        assert_eq!(crc, 0xCBF4_3926);
    }

    #[test]
    fn crc32_empty() {
        let crc = compute_crc32(b"");
        assert_eq!(crc, 0x0000_0000);
    }

    proptest! {
        #[test]
        fn arbitrary_record_roundtrip(key in "[a-zA-Z0-9_\\-]{0,64}", value in 0u64..) {
            let record = LogRecord::Allocate { key, value };
            let payload = record.encode_payload().unwrap();
            let decoded = LogRecord::decode_payload(LogRecordType::Allocate, &payload).unwrap();
            prop_assert_eq!(record, decoded);
        }
    }
}

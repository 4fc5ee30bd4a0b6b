//! Fixed-width row identifiers
//!
//! A row id is 8 bytes, big-endian, so byte order equals numeric order.
//! Real ids live in `[FIRST_ROW_ID, MAX_ROW_ID]`. The two sentinels sit outside
//! that range and are only ever used as suffixes of index-key bounds.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::errors::{HaloError, HaloResult};

/// Width of an encoded row id
pub const ROW_ID_LENGTH: usize = 8;

/// Smallest id handed out to a real row
pub const FIRST_ROW_ID: u64 = 1;

/// Largest id handed out to a real row
pub const MAX_ROW_ID: u64 = i64::MAX as u64;

/// Suffix sorting before every real row id
pub const LOWER_SENTINEL: [u8; ROW_ID_LENGTH] = [0x00; ROW_ID_LENGTH];

/// Suffix sorting after every real row id
pub const UPPER_SENTINEL: [u8; ROW_ID_LENGTH] = [0xFF; ROW_ID_LENGTH];

/// Opaque 8-byte row identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId([u8; ROW_ID_LENGTH]);

impl RowId {
    /// Creates a row id from its numeric value
    pub fn new(id: u64) -> Self {
        RowId(id.to_be_bytes())
    }

    /// Reads a row id from exactly 8 bytes
    pub fn from_slice(bytes: &[u8]) -> HaloResult<Self> {
        let raw: [u8; ROW_ID_LENGTH] = bytes.try_into().map_err(|_| {
            HaloError::invalid_argument(format!(
                "Row id must be {} bytes, got {}",
                ROW_ID_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(RowId(raw))
    }

    /// Numeric value
    pub fn as_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8; ROW_ID_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowId({})", self.as_u64())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

impl From<u64> for RowId {
    fn from(id: u64) -> Self {
        RowId::new(id)
    }
}

impl Serialize for RowId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.as_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order_matches_numeric_order() {
        let ids = [1u64, 2, 255, 256, 65_536, MAX_ROW_ID];
        for pair in ids.windows(2) {
            assert!(RowId::new(pair[0]) < RowId::new(pair[1]));
            assert!(RowId::new(pair[0]).as_bytes() < RowId::new(pair[1]).as_bytes());
        }
    }

    #[test]
    fn test_sentinels_bracket_real_ids() {
        assert!(LOWER_SENTINEL < *RowId::new(FIRST_ROW_ID).as_bytes());
        assert!(*RowId::new(MAX_ROW_ID).as_bytes() < UPPER_SENTINEL);
    }

    #[test]
    fn test_from_slice() {
        let id = RowId::new(42);
        assert_eq!(RowId::from_slice(id.as_bytes()).unwrap(), id);
        assert_eq!(RowId::from_slice(id.as_bytes()).unwrap().as_u64(), 42);

        let err = RowId::from_slice(&[1, 2, 3]).unwrap_err();
        assert_eq!(err.code().code(), "HALO_INVALID_ARGUMENT");
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&RowId::new(7)).unwrap(), "7");
    }
}

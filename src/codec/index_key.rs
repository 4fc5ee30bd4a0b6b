//! Compound index key layout
//!
//! ```text
//! +------------------------------+------------------+-------------+
//! | value, zero-padded to max_len | value_len (u32)  | row id (8)  |
//! +------------------------------+------------------+-------------+
//! ```
//!
//! Keys sort primarily by value. Scan bounds are built on the same prefix with a
//! sentinel in place of the row id, so a bound and a stored key always share
//! one layout.

use crate::errors::{HaloError, HaloResult};

use super::datatype::DataType;
use super::row_id::{RowId, LOWER_SENTINEL, ROW_ID_LENGTH, UPPER_SENTINEL};

const VALUE_LENGTH_WIDTH: usize = 4;

/// Value part of an index key: padded value plus its real length
pub fn index_prefix(data_type: &DataType, encoded: &[u8]) -> HaloResult<Vec<u8>> {
    let max_length = data_type.max_length();
    if encoded.len() > max_length {
        return Err(HaloError::encoding(
            data_type.face_name(),
            String::from_utf8_lossy(encoded),
            format!("{} bytes exceeds maximum of {}", encoded.len(), max_length),
        ));
    }

    let mut prefix = Vec::with_capacity(max_length + VALUE_LENGTH_WIDTH + ROW_ID_LENGTH);
    prefix.extend_from_slice(encoded);
    prefix.resize(max_length, 0);
    prefix.extend_from_slice(&(encoded.len() as u32).to_be_bytes());
    Ok(prefix)
}

/// Full index key for a stored row
pub fn index_key(data_type: &DataType, encoded: &[u8], row_id: RowId) -> HaloResult<Vec<u8>> {
    let mut key = index_prefix(data_type, encoded)?;
    key.extend_from_slice(row_id.as_bytes());
    Ok(key)
}

/// Bound sorting before every key holding `encoded`
pub fn lower_bound(data_type: &DataType, encoded: &[u8]) -> HaloResult<Vec<u8>> {
    let mut key = index_prefix(data_type, encoded)?;
    key.extend_from_slice(&LOWER_SENTINEL);
    Ok(key)
}

/// Bound sorting after every key holding `encoded`
pub fn upper_bound(data_type: &DataType, encoded: &[u8]) -> HaloResult<Vec<u8>> {
    let mut key = index_prefix(data_type, encoded)?;
    key.extend_from_slice(&UPPER_SENTINEL);
    Ok(key)
}

/// Extracts the trailing row id of an index key
pub fn row_id_from_index_key(key: &[u8]) -> HaloResult<RowId> {
    if key.len() < ROW_ID_LENGTH {
        return Err(HaloError::invalid_argument(format!(
            "Index key of {} bytes is too short to hold a row id",
            key.len()
        )));
    }
    RowId::from_slice(&key[key.len() - ROW_ID_LENGTH..])
}

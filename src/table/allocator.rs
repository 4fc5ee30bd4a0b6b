//! Row-id allocation at table open
//!
//! There is no persisted counter. The next free id is rediscovered by a
//! binary search over `(0, i64::MAX]` driven by an "is this id taken" probe
//! that must be monotone: true up to some boundary, false after it.

use crate::codec::MAX_ROW_ID;
use crate::errors::{HaloError, HaloResult};

/// Least id for which `taken` is false
///
/// Id 0 is treated as taken. The probe runs about 63 times. Bounds move by
/// half the remaining distance from the current probe, so no intermediate
/// value exceeds `i64::MAX`.
pub fn find_upper_bound<F>(mut taken: F) -> HaloResult<u64>
where
    F: FnMut(u64) -> HaloResult<bool>,
{
    let mut lower: u64 = 0;
    let mut upper: u64 = MAX_ROW_ID;
    let mut probe = upper / 2;

    while upper - lower > 1 {
        if taken(probe)? {
            lower = probe;
            probe += (upper - probe) / 2;
        } else {
            upper = probe;
            probe -= (probe - lower) / 2;
        }
    }

    // The top id itself is never probed inside the loop
    if upper == MAX_ROW_ID && taken(upper)? {
        return Err(HaloError::Storage("Row id space exhausted".into()));
    }
    Ok(upper)
}

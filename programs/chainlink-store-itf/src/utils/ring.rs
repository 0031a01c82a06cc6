//! Cursor arithmetic shared by the live and historical ring buffers of a store account.

use crate::{StoreError, StoreResult};

/// Position reached by moving `steps` slots backward from `cursor` in a ring of `length` slots.
///
/// Equivalent to `((cursor - steps) mod length + length) mod length` for any `steps`,
/// including `steps >= length` which wraps around as many times as needed.
pub fn shift_left(cursor: u32, steps: u32, length: u32) -> StoreResult<u32> {
    if length == 0 {
        warn!("Cannot shift a cursor in an empty ring buffer");
        return Err(StoreError::InvalidRange);
    }
    let length = u64::from(length);
    let cursor = u64::from(cursor) % length;
    let steps = u64::from(steps) % length;
    let index = (cursor + length - steps) % length;
    Ok(u32::try_from(index)?)
}

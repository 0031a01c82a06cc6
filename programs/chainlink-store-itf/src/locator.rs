//! Resolution of a round id to a slot of the store ring buffers.
//!
//! A store account keeps two ring buffers of transmissions:
//!
//! - the live tier with one slot per round, holding the `live_length` most recent rounds;
//! - the historical tier holding one sample every `granularity` rounds.
//!
//! Both are addressed through a single linear position, live slots first:
//! `[0, live_length)` is live and `[live_length, live_length + historical_length)` is historical.
//!
//! ## Example
//!
//! ```text
//! 0   1   2   3   4   5   6   7   8   9   10  11  12  13  14
//! | Live            | Historical
//! 0   1   2   3   4 | 0   1   2   3   4   5   6   7   8   9
//! 36  37  38  34  35| 33  36  9   12  15  18  21  24  27  30
//!             ^               ^
//!             live_cursor     historical_cursor
//! ```
//!
//! With `latest_round_id = 38` and `granularity = 3`, round 35 is at position 4, and round 17 is
//! corrected to round 15 found at position 9.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{utils::ring::shift_left, Header, StoreError, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundLocation {
    /// Index in the concatenation of the live and historical transmissions
    pub position: u64,
    /// Round actually stored at `position`, rounded down to the granularity for historical rounds
    pub corrected_round_id: u32,
}

/// Finds where `round_id` is stored.
///
/// The live tier is preferred whenever it covers the round since it is exact. Older rounds are
/// looked up in the historical tier after rounding down to the closest sampled round.
pub fn locate_round(
    round_id: u32,
    live_cursor: u32,
    live_length: u32,
    latest_round_id: u32,
    historical_cursor: u32,
    historical_length: u32,
    granularity: u8,
) -> StoreResult<RoundLocation> {
    if round_id > latest_round_id {
        warn!(
            "Round {} is in the future, latest round is {}",
            round_id, latest_round_id
        );
        return Err(StoreError::OutOfRange);
    }

    // round_id >= latest_round_id - live_length + 1, without underflow on young feeds
    if u64::from(round_id) + u64::from(live_length) > u64::from(latest_round_id) {
        let latest_live_position = shift_left(live_cursor, 1, live_length)?;
        let position = shift_left(
            latest_live_position,
            latest_round_id - round_id,
            live_length,
        )?;
        debug!(round_id, position, "Round found in live tier");
        return Ok(RoundLocation {
            position: u64::from(position),
            corrected_round_id: round_id,
        });
    }

    if historical_length == 0 {
        warn!(
            "Round {} is older than the live tier and the feed keeps no history",
            round_id
        );
        return Err(StoreError::NoDataPresent);
    }

    if granularity == 0 {
        warn!("Feed has a historical tier with a zero granularity");
        return Err(StoreError::InvalidRange);
    }

    let granularity = u32::from(granularity);
    let historical_latest_round = latest_round_id - latest_round_id % granularity;
    let corrected_round_id = round_id - round_id % granularity;
    // corrected_round_id <= historical_latest_round as round_id <= latest_round_id
    let steps = (historical_latest_round - corrected_round_id) / granularity;

    if steps >= historical_length {
        warn!(
            "Round {} (sampled as {}) is {} samples old, historical tier only keeps {}",
            round_id, corrected_round_id, steps, historical_length
        );
        return Err(StoreError::NoDataPresent);
    }

    let latest_historical_position = shift_left(historical_cursor, 1, historical_length)?;
    let local_position = shift_left(latest_historical_position, steps, historical_length)?;
    let position = u64::from(live_length) + u64::from(local_position);
    debug!(
        round_id,
        corrected_round_id,
        position,
        "Round found in historical tier"
    );

    Ok(RoundLocation {
        position,
        corrected_round_id,
    })
}

/// [`locate_round`] using the cursors and lengths of a decoded header.
pub fn locate_in_header(header: &Header, round_id: u32) -> StoreResult<RoundLocation> {
    locate_round(
        round_id,
        header.live_cursor,
        header.live_length,
        header.latest_round_id,
        header.historical_cursor,
        header.historical_length,
        header.granularity,
    )
}

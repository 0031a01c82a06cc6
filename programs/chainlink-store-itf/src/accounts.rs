//! Packed layouts of the Chainlink store account and their decoders.
//!
//! The store program writes its header and transmissions without any alignment padding, so the
//! raw structs below only hold byte arrays. Typed values are built with explicit little-endian
//! conversions, which keeps decoding independent from the host endianness.

use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{consts::DESCRIPTION_SIZE, StoreError, StoreResult};

static_assertions::const_assert_eq!(Header::LEN, std::mem::size_of::<RawHeader>());
static_assertions::const_assert_eq!(Transmission::LEN, std::mem::size_of::<RawTransmission>());

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct RawHeader {
    pub version: u8,
    pub state: u8,
    pub owner: [u8; 32],
    pub proposed_owner: [u8; 32],
    pub writer: [u8; 32],
    pub description: [u8; DESCRIPTION_SIZE],
    pub decimals: u8,
    pub flagging_threshold: [u8; 4],
    pub latest_round_id: [u8; 4],
    pub granularity: u8,
    pub live_length: [u8; 4],
    pub live_cursor: [u8; 4],
    pub historical_cursor: [u8; 4],
    pub historical_length: [u8; 4],
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct RawTransmission {
    pub slot: [u8; 8],
    pub timestamp: [u8; 4],
    pub _padding0: [u8; 4],
    pub answer: [u8; 16],
    pub _padding1: [u8; 8],
    pub _padding2: [u8; 8],
}

/// Feed metadata stored at the start of a store account.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    pub version: u8,
    pub state: u8,
    pub owner: Pubkey,
    pub proposed_owner: Pubkey,
    pub writer: Pubkey,
    /// Feed name, e.g. "ETH / USD"
    pub description: String,
    /// Number of decimals of `answer`
    pub decimals: u8,
    pub flagging_threshold: u32,
    pub latest_round_id: u32,
    /// Number of rounds covered by one historical sample
    pub granularity: u8,
    pub live_length: u32,
    /// Next live slot to be overwritten, i.e. the slot of the oldest live round
    pub live_cursor: u32,
    /// Next historical slot to be overwritten, i.e. the slot of the oldest historical sample
    pub historical_cursor: u32,
    pub historical_length: u32,
}

impl Header {
    pub const LEN: usize = 156;

    pub fn unpack(data: &[u8]) -> StoreResult<Self> {
        let raw: &RawHeader = data
            .get(..Self::LEN)
            .and_then(|bytes| bytemuck::try_from_bytes(bytes).ok())
            .ok_or_else(|| {
                warn!(
                    "Header needs {} bytes but only {} were provided",
                    Self::LEN,
                    data.len()
                );
                StoreError::MalformedInput
            })?;

        Ok(Self {
            version: raw.version,
            state: raw.state,
            owner: Pubkey::new_from_array(raw.owner),
            proposed_owner: Pubkey::new_from_array(raw.proposed_owner),
            writer: Pubkey::new_from_array(raw.writer),
            description: decode_description(&raw.description),
            decimals: raw.decimals,
            flagging_threshold: u32::from_le_bytes(raw.flagging_threshold),
            latest_round_id: u32::from_le_bytes(raw.latest_round_id),
            granularity: raw.granularity,
            live_length: u32::from_le_bytes(raw.live_length),
            live_cursor: u32::from_le_bytes(raw.live_cursor),
            historical_cursor: u32::from_le_bytes(raw.historical_cursor),
            historical_length: u32::from_le_bytes(raw.historical_length),
        })
    }

    /// Total number of transmission slots (live then historical) the account holds.
    pub fn transmissions_count(&self) -> u64 {
        u64::from(self.live_length) + u64::from(self.historical_length)
    }
}

/// A single write of the feed, as stored in either ring buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transmission {
    pub slot: u64,
    /// Zero when nothing was ever written in this slot
    pub timestamp: u32,
    pub answer: i128,
}

impl Transmission {
    pub const LEN: usize = 48;

    pub fn unpack(data: &[u8]) -> StoreResult<Self> {
        let raw: &RawTransmission = data
            .get(..Self::LEN)
            .and_then(|bytes| bytemuck::try_from_bytes(bytes).ok())
            .ok_or_else(|| {
                warn!(
                    "Transmission needs {} bytes but only {} were provided",
                    Self::LEN,
                    data.len()
                );
                StoreError::MalformedInput
            })?;

        Ok(Self {
            slot: u64::from_le_bytes(raw.slot),
            timestamp: u32::from_le_bytes(raw.timestamp),
            answer: decode_i128_le(&raw.answer),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.timestamp == 0
    }
}

/// Decoded transmission tagged with the round it was resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Round {
    pub round_id: u32,
    pub slot: u64,
    pub timestamp: u32,
    pub answer: i128,
}

/// Decodes the store header. Bytes past [`Header::LEN`] are ignored.
pub fn extract_header(data: &[u8]) -> StoreResult<Header> {
    Header::unpack(data)
}

/// Decodes the transmission `data` stored for `round_id`.
///
/// The round id is not stored in the transmission: callers resolve it beforehand (see
/// [`crate::locator::locate_round`]) and it is copied as is in the result.
pub fn extract_round(round_id: u32, data: &[u8]) -> StoreResult<Round> {
    let transmission = Transmission::unpack(data)?;
    if transmission.is_empty() {
        warn!("No transmission written for round {}", round_id);
        return Err(StoreError::NoDataPresent);
    }
    Ok(Round {
        round_id,
        slot: transmission.slot,
        timestamp: transmission.timestamp,
        answer: transmission.answer,
    })
}

/// Two's complement i128 from its 16 little-endian bytes.
///
/// The low word is taken as unsigned, the high word as signed so that bit 127 extends to the
/// whole value.
pub fn decode_i128_le(bytes: &[u8; 16]) -> i128 {
    let (low, high) = arrayref::array_refs![bytes, 8, 8];
    let low = u64::from_le_bytes(*low);
    let high = i64::from_le_bytes(*high);
    (i128::from(high) << 64) | i128::from(low)
}

fn decode_description(raw: &[u8; DESCRIPTION_SIZE]) -> String {
    let end = raw.iter().position(|b| *b == 0).unwrap_or(DESCRIPTION_SIZE);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

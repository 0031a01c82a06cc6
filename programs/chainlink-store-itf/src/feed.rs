//! Price feed read interface over a whole store account.
//!
//! Mirrors the aggregator interface (`version`, `description`, `decimals`, `latestRoundData`,
//! `getRoundData`) on top of the header decoder and the round locator.

use std::cell::Ref;

use anchor_lang::prelude::*;
use arrayref::array_ref;
use rust_decimal::Decimal;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    accounts::{extract_header, extract_round, Header},
    consts::{DISCRIMINATOR_SIZE, HEADER_SIZE, TRANSMISSIONS_ACCOUNT_SEED, TRANSMISSION_SIZE},
    locator::locate_in_header,
    StoreError, StoreResult,
};

/// Answer of a round in the aggregator format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundData {
    pub round_id: u32,
    pub answer: i128,
    pub started_at: u32,
    pub updated_at: u32,
    pub answered_in_round: u32,
}

impl RoundData {
    /// Answer scaled by the feed decimals, `None` if it does not fit in a [`Decimal`].
    pub fn price(&self, decimals: u8) -> Option<Decimal> {
        Decimal::try_from_i128_with_scale(self.answer, u32::from(decimals)).ok()
    }
}

/// Discriminator anchor prefixes the store `Transmissions` account with.
pub fn transmissions_discriminator() -> [u8; DISCRIMINATOR_SIZE] {
    let hash = Sha256::digest(TRANSMISSIONS_ACCOUNT_SEED.as_bytes());
    *array_ref![hash.as_slice(), 0, DISCRIMINATOR_SIZE]
}

/// Borrows the data of a store account after checking its owner.
///
/// The returned guard must outlive the [`StoreFeed`] read from it.
pub fn load_store_account_data<'a, 'info>(
    account: &'a AccountInfo<'info>,
) -> StoreResult<Ref<'a, &'info mut [u8]>> {
    if account.owner != &crate::ID {
        warn!(
            "Account {:?} is owned by {:?}, not by the store program",
            account.key, account.owner
        );
        return Err(StoreError::UnexpectedAccount);
    }
    account.data.try_borrow().map_err(|_| {
        warn!("Account {:?} data is already mutably borrowed", account.key);
        StoreError::MalformedInput
    })
}

/// Decoded header along with the raw transmissions that follow it.
pub struct StoreFeed<'a> {
    header: Header,
    transmissions: &'a [u8],
}

impl<'a> StoreFeed<'a> {
    /// Reads the full data of a store account: discriminator, header region, then transmissions.
    pub fn from_account_data(data: &'a [u8]) -> StoreResult<Self> {
        if data.len() < DISCRIMINATOR_SIZE + HEADER_SIZE {
            warn!(
                "Store account has {} bytes, expected at least {}",
                data.len(),
                DISCRIMINATOR_SIZE + HEADER_SIZE
            );
            return Err(StoreError::MalformedInput);
        }
        let discriminator = array_ref![data, 0, DISCRIMINATOR_SIZE];
        let expected = transmissions_discriminator();
        if *discriminator != expected {
            warn!(
                "Expected discriminator for store account ({:?}) is different from received {:?}",
                expected, discriminator
            );
            return Err(StoreError::InvalidAccountDiscriminator);
        }
        let (header, transmissions) = data[DISCRIMINATOR_SIZE..].split_at(HEADER_SIZE);
        Self::from_parts(header, transmissions)
    }

    /// Builds a feed from a header blob and the concatenated live and historical transmissions,
    /// for callers fetching both regions separately.
    ///
    /// The store program does not write the historical tier capacity in the header: when the
    /// field is zero it is sized from the transmissions region, after the live slots.
    pub fn from_parts(header: &[u8], transmissions: &'a [u8]) -> StoreResult<Self> {
        let mut header = extract_header(header)?;
        let slots = u64::try_from(transmissions.len() / TRANSMISSION_SIZE)?;
        if header.historical_length == 0 {
            let historical_slots = slots.saturating_sub(u64::from(header.live_length));
            header.historical_length = u32::try_from(historical_slots)?;
        }
        if header.transmissions_count() > slots {
            warn!(
                "Store account holds {} transmissions but the header needs {} live and {} historical",
                slots, header.live_length, header.historical_length
            );
            return Err(StoreError::MalformedInput);
        }
        debug!(
            description = header.description.as_str(),
            latest_round_id = header.latest_round_id,
            historical_length = header.historical_length,
            "Loaded store header"
        );
        Ok(Self {
            header,
            transmissions,
        })
    }

    /// Decoded header, with `historical_length` sized from the account when not stored.
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn version(&self) -> u8 {
        self.header.version
    }

    pub fn description(&self) -> &str {
        &self.header.description
    }

    pub fn decimals(&self) -> u8 {
        self.header.decimals
    }

    /// Raw transmission at a linear position of the live then historical slots.
    pub fn transmission_at(&self, position: u64) -> StoreResult<&'a [u8]> {
        let start = usize::try_from(position)?
            .checked_mul(TRANSMISSION_SIZE)
            .ok_or(StoreError::OutOfRangeIntegralConversion)?;
        let end = start
            .checked_add(TRANSMISSION_SIZE)
            .ok_or(StoreError::OutOfRangeIntegralConversion)?;
        self.transmissions.get(start..end).ok_or_else(|| {
            warn!(
                "Transmission {} is past the end of the store account ({} bytes of transmissions)",
                position,
                self.transmissions.len()
            );
            StoreError::MalformedInput
        })
    }

    pub fn get_round_data(&self, round_id: u32) -> StoreResult<RoundData> {
        let location = locate_in_header(&self.header, round_id)?;
        let transmission = self.transmission_at(location.position)?;
        let round = extract_round(location.corrected_round_id, transmission)?;
        Ok(RoundData {
            round_id: round.round_id,
            answer: round.answer,
            started_at: round.timestamp,
            updated_at: round.timestamp,
            answered_in_round: round.round_id,
        })
    }

    pub fn latest_round_data(&self) -> StoreResult<RoundData> {
        self.get_round_data(self.header.latest_round_id)
    }
}

use std::num::TryFromIntError;

use anchor_lang::prelude::*;
use num_enum::TryFromPrimitive;

#[error_code]
#[derive(PartialEq, Eq, TryFromPrimitive)]
pub enum StoreError {
    #[msg("Account data is too short or structurally invalid")]
    MalformedInput,

    #[msg("No data present")]
    NoDataPresent,

    #[msg("Requested round is greater than the latest round")]
    OutOfRange,

    #[msg("Ring buffer length must be positive")]
    InvalidRange,

    #[msg("Invalid account discriminator")]
    InvalidAccountDiscriminator,

    #[msg("Unexpected account owner")]
    UnexpectedAccount,

    #[msg("Out of range integral conversion attempted")]
    OutOfRangeIntegralConversion,
}

impl From<TryFromIntError> for StoreError {
    fn from(_: TryFromIntError) -> Self {
        StoreError::OutOfRangeIntegralConversion
    }
}

pub type StoreResult<T = ()> = std::result::Result<T, StoreError>;

//! Read interface for the Chainlink OCR2 store program accounts.
//!
//! A store account holds a header describing the feed followed by two ring buffers of
//! transmissions: a live tier with one slot per round and a coarser historical tier. This crate
//! decodes those packed structures from raw account bytes and resolves any past round id to the
//! slot holding it. Everything here is a pure function of the provided bytes.

#[macro_use]
mod macros;

pub mod accounts;
pub mod consts;
pub mod errors;
pub mod feed;
pub mod locator;
pub mod utils;

use anchor_lang::prelude::*;

pub use crate::{
    accounts::{extract_header, extract_round, Header, Round, Transmission},
    errors::*,
    feed::{load_store_account_data, RoundData, StoreFeed},
    locator::{locate_in_header, locate_round, RoundLocation},
    utils::ring::shift_left,
};

declare_id!("HEvSKofvBgfaexv23kMabbYqxasxU3mQ4ibBMEmJWHny");

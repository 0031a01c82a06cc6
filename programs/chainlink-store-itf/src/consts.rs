use crate::accounts::Transmission;

/// Anchor account discriminator prefixing the store account data
pub const DISCRIMINATOR_SIZE: usize = 8;

/// Space reserved for the header at the start of the store account (after the discriminator).
/// The decoded fields only use `Header::LEN` bytes of it.
pub const HEADER_SIZE: usize = 192;

/// Size of a single transmission slot in either tier
pub const TRANSMISSION_SIZE: usize = Transmission::LEN;

/// Zero padded feed description
pub const DESCRIPTION_SIZE: usize = 32;

/// Seed hashed by anchor to derive the store account discriminator
pub const TRANSMISSIONS_ACCOUNT_SEED: &str = "account:Transmissions";

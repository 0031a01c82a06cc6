//! Logging shims.
//!
//! With the `tracing` feature the macros forward to the `tracing` crate (off-chain consumers,
//! tests). Without it `warn!` goes to the program log through `msg!` and `debug!` disappears so
//! lookups pay no compute for it.

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(not(feature = "tracing"))]
        ::anchor_lang::prelude::msg!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
    }};
}

//! Formatting and arithmetic helpers

pub mod helper;

pub use helper::{format_address, format_crypto, format_large_number, format_usd, percent_change};

//! Conversions between on-chain raw units and display units

use rust_decimal::Decimal;

use crate::errors::ProviderError;

/// Balance in a chain's smallest indivisible unit (wei, satoshi, lamport)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RawBalance(pub u128);

impl RawBalance {
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl From<u64> for RawBalance {
    fn from(v: u64) -> Self {
        RawBalance(v as u128)
    }
}

/// Divide a raw integer amount by `10^exponent`.
///
/// Exact for any amount that fits the 96-bit decimal mantissa (about 7.9e28).
/// Larger amounts are rejected as malformed; no real native balance gets there.
pub fn to_display_units(raw: RawBalance, exponent: u32) -> Result<Decimal, ProviderError> {
    i128::try_from(raw.0)
        .ok()
        .and_then(|n| Decimal::try_from_i128_with_scale(n, exponent).ok())
        .map(|d| d.normalize())
        .ok_or_else(|| {
            ProviderError::MalformedResponse(format!(
                "raw amount {} with exponent {} is out of range",
                raw.0, exponent
            ))
        })
}

/// Parse a base-10 integer string such as `"2500000000000000000"`
pub fn parse_raw_amount(s: &str) -> Result<RawBalance, ProviderError> {
    let s = s.trim();
    s.parse::<u128>()
        .map(RawBalance)
        .map_err(|e| ProviderError::MalformedResponse(format!("invalid integer amount {:?}: {}", s, e)))
}

/// Parse a JSON-RPC hex quantity such as `"0x22b1c8c1227a0000"`
pub fn parse_hex_quantity(s: &str) -> Result<RawBalance, ProviderError> {
    let digits = s
        .trim()
        .strip_prefix("0x")
        .or_else(|| s.trim().strip_prefix("0X"))
        .ok_or_else(|| ProviderError::MalformedResponse(format!("hex quantity without 0x prefix: {:?}", s)))?;

    if digits.is_empty() {
        return Ok(RawBalance(0));
    }

    u128::from_str_radix(digits, 16)
        .map(RawBalance)
        .map_err(|e| ProviderError::MalformedResponse(format!("invalid hex quantity {:?}: {}", s, e)))
}

use rust_decimal::{Decimal, RoundingStrategy};

/// Percent change from `old` to `new`; zero when `old` is zero.
/// Saturates at `Decimal::MAX` when the ratio does not fit.
pub fn percent_change(old: Decimal, new: Decimal) -> Decimal {
    if old.is_zero() {
        return Decimal::ZERO;
    }
    new.checked_sub(old)
        .and_then(|diff| diff.checked_div(old))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Insert `,` every three digits of the integer part
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a USD amount, e.g. `$90,000.00`
pub fn format_usd(amount: Decimal) -> String {
    let rounded = round_half_up(amount, 2);
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// Format a native amount with a fixed number of decimals
pub fn format_crypto(amount: Decimal, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, round_half_up(amount, decimals))
}

/// Abbreviate large values: `1.50K`, `2.00M`, `3.10B`
pub fn format_large_number(value: Decimal) -> String {
    let thousand = Decimal::from(1_000u32);
    let million = Decimal::from(1_000_000u32);
    let billion = Decimal::from(1_000_000_000u32);

    let (scaled, suffix) = if value >= billion {
        (value / billion, "B")
    } else if value >= million {
        (value / million, "M")
    } else if value >= thousand {
        (value / thousand, "K")
    } else {
        (value, "")
    };
    format!("{:.2}{}", round_half_up(scaled, 2), suffix)
}

/// Shorten an address for display: `0x1234...abcd`
pub fn format_address(address: &str, start_chars: usize, end_chars: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= start_chars + end_chars {
        return address.to_string();
    }
    let head: String = chars[..start_chars].iter().collect();
    let tail: String = chars[chars.len() - end_chars..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn usd_with_separators() {
        assert_eq!(format_usd(dec!(90000)), "$90,000.00");
        assert_eq!(format_usd(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_usd(dec!(0.005)), "$0.01");
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
        assert_eq!(format_usd(dec!(-12.5)), "-$12.50");
    }

    #[test]
    fn usd_rounding_to_zero_drops_sign() {
        assert_eq!(format_usd(dec!(-0.001)), "$0.00");
        assert_eq!(format_usd(dec!(-0.005)), "-$0.01");
    }

    #[test]
    fn crypto_fixed_decimals() {
        assert_eq!(format_crypto(dec!(2.5), 6), "2.500000");
        assert_eq!(format_crypto(dec!(0.123456789), 4), "0.1235");
    }

    #[test]
    fn large_numbers() {
        assert_eq!(format_large_number(dec!(950)), "950.00");
        assert_eq!(format_large_number(dec!(1500)), "1.50K");
        assert_eq!(format_large_number(dec!(2000000)), "2.00M");
        assert_eq!(format_large_number(dec!(3100000000)), "3.10B");
    }

    #[test]
    fn address_shortening() {
        assert_eq!(
            format_address("0x742d35Cc6634C0532925a3b844Bc454e4438f44e", 6, 4),
            "0x742d...f44e"
        );
        assert_eq!(format_address("short", 6, 4), "short");
    }

    #[test]
    fn percent_change_handles_zero_base() {
        assert_eq!(percent_change(dec!(100), dec!(150)), dec!(50));
        assert_eq!(percent_change(dec!(200), dec!(150)), dec!(-25));
        assert_eq!(percent_change(Decimal::ZERO, dec!(150)), Decimal::ZERO);
        assert_eq!(percent_change(dec!(0.01), Decimal::MAX), Decimal::MAX);
    }
}

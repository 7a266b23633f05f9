//! Utility functions and helpers

use alloy_primitives::U256;

/// Format a base-unit amount with proper decimals, six fractional digits
pub fn format_units(amount: U256, decimals: u8) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals as u64));
    let whole = amount / scale;
    let rem = amount % scale;
    let frac = rem * U256::from(1_000_000u64) / scale;
    format!("{}.{:06}", whole, frac.to::<u64>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::units;

    #[test]
    fn formats_whole_token_amounts() {
        assert_eq!(format_units(units(10), 18), "10.000000");
        assert_eq!(format_units(U256::ZERO, 18), "0.000000");
    }

    #[test]
    fn formats_fractional_amounts() {
        // 9.97 tokens in base units
        let amount = units(997) / U256::from(100u64);
        assert_eq!(format_units(amount, 18), "9.970000");
    }
}

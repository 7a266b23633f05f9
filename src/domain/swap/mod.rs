//! Swap domain - constant-product pricing and reserve application

use alloy_primitives::U256;
use tracing::debug;

use crate::domain::pool::PoolState;
use crate::shared::config::BPS_DENOMINATOR;
use crate::shared::errors::PoolError;
use crate::shared::types::AssetId;

/// Which leg of the pair is the input side of a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    AToB,
    BToA,
}

impl SwapDirection {
    pub fn asset_in<'a>(&self, state: &'a PoolState) -> &'a AssetId {
        match self {
            SwapDirection::AToB => &state.asset_a,
            SwapDirection::BToA => &state.asset_b,
        }
    }

    pub fn asset_out<'a>(&self, state: &'a PoolState) -> &'a AssetId {
        match self {
            SwapDirection::AToB => &state.asset_b,
            SwapDirection::BToA => &state.asset_a,
        }
    }

    /// Current reserves as (reserve_in, reserve_out)
    pub fn reserves(&self, state: &PoolState) -> (U256, U256) {
        match self {
            SwapDirection::AToB => (state.reserve_a, state.reserve_b),
            SwapDirection::BToA => (state.reserve_b, state.reserve_a),
        }
    }
}

/// Output amount for a constant-product swap, fee-adjusted, floor-rounded.
///
/// Single-division form so truncation happens exactly once, after all
/// multiplications:
///
/// ```text
/// out = in * (10000 - fee_bps) * reserve_out
///       / (reserve_in * 10000 + in * (10000 - fee_bps))
/// ```
///
/// The floor rounds the output toward the pool; the result never exceeds
/// the real-valued constant-product solution.
pub fn quote_out(
    amount_in: U256,
    reserve_in: U256,
    reserve_out: U256,
    fee_bps: u32,
) -> Result<U256, PoolError> {
    if amount_in.is_zero() {
        return Err(PoolError::InvalidAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(PoolError::InsufficientLiquidity);
    }

    let fee_keep = BPS_DENOMINATOR
        .checked_sub(fee_bps)
        .ok_or_else(|| {
            PoolError::InvalidConfig(format!("fee_bps must be at most {}", BPS_DENOMINATOR))
        })?;
    let fee_keep = U256::from(fee_keep);
    let scaled_in = amount_in
        .checked_mul(fee_keep)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let numerator = scaled_in
        .checked_mul(reserve_out)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let denominator = reserve_in
        .checked_mul(U256::from(BPS_DENOMINATOR))
        .and_then(|v| v.checked_add(scaled_in))
        .ok_or(PoolError::ArithmeticOverflow)?;

    let amount_out = numerator / denominator;
    debug!(%amount_in, %reserve_in, %reserve_out, fee_bps, %amount_out, "quoted swap");
    Ok(amount_out)
}

/// Quote a swap and enforce the slippage and reserve-drain bounds.
///
/// A `min_out` of zero disables the slippage check.
pub fn plan_swap(
    amount_in: U256,
    reserve_in: U256,
    reserve_out: U256,
    fee_bps: u32,
    min_out: U256,
) -> Result<U256, PoolError> {
    let amount_out = quote_out(amount_in, reserve_in, reserve_out, fee_bps)?;

    if !min_out.is_zero() && amount_out < min_out {
        return Err(PoolError::SlippageExceeded {
            computed: amount_out,
            minimum: min_out,
        });
    }

    let remaining = reserve_out
        .checked_sub(amount_out)
        .ok_or(PoolError::ReserveWouldDrainToZero)?;
    if remaining < U256::from(1u64) {
        return Err(PoolError::ReserveWouldDrainToZero);
    }

    Ok(amount_out)
}

/// Commit a planned swap to the reserves
pub fn apply_swap(
    state: &mut PoolState,
    direction: SwapDirection,
    amount_in: U256,
    amount_out: U256,
) -> Result<(), PoolError> {
    match direction {
        SwapDirection::AToB => {
            state.reserve_a = state
                .reserve_a
                .checked_add(amount_in)
                .ok_or(PoolError::ArithmeticOverflow)?;
            state.reserve_b = state
                .reserve_b
                .checked_sub(amount_out)
                .ok_or(PoolError::ArithmeticOverflow)?;
        }
        SwapDirection::BToA => {
            state.reserve_b = state
                .reserve_b
                .checked_add(amount_in)
                .ok_or(PoolError::ArithmeticOverflow)?;
            state.reserve_a = state
                .reserve_a
                .checked_sub(amount_out)
                .ok_or(PoolError::ArithmeticOverflow)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::DEFAULT_FEE_BPS;
    use crate::shared::types::units;
    use rand::Rng;

    #[test]
    fn quotes_the_reference_trade() {
        // 10 tokens into a 100/100 pool at 0.3% fee
        let out = quote_out(units(10), units(100), units(100), DEFAULT_FEE_BPS).unwrap();
        assert_eq!(out, U256::from(9_066_108_938_801_491_315u64));
    }

    #[test]
    fn zero_input_is_invalid() {
        assert_eq!(
            quote_out(U256::ZERO, units(100), units(100), DEFAULT_FEE_BPS),
            Err(PoolError::InvalidAmount)
        );
    }

    #[test]
    fn empty_reserves_cannot_price_a_swap() {
        assert_eq!(
            quote_out(units(1), U256::ZERO, units(100), DEFAULT_FEE_BPS),
            Err(PoolError::InsufficientLiquidity)
        );
        assert_eq!(
            quote_out(units(1), units(100), U256::ZERO, DEFAULT_FEE_BPS),
            Err(PoolError::InsufficientLiquidity)
        );
    }

    #[test]
    fn output_never_exceeds_the_exact_solution() {
        // floor property: out * denominator <= scaled_in * reserve_out
        // and (out + 1) would overshoot it
        let cases = [
            (units(10), units(100), units(100)),
            (U256::from(1u64), U256::from(3u64), U256::from(7u64)),
            (U256::from(1_000u64), U256::from(10_000u64), U256::from(10_000u64)),
            (units(1), units(3), units(1)),
        ];
        for (amount_in, reserve_in, reserve_out) in cases {
            let out = quote_out(amount_in, reserve_in, reserve_out, DEFAULT_FEE_BPS).unwrap();
            let scaled_in = amount_in * U256::from(BPS_DENOMINATOR - DEFAULT_FEE_BPS);
            let numerator = scaled_in * reserve_out;
            let denominator = reserve_in * U256::from(BPS_DENOMINATOR) + scaled_in;
            assert!(out * denominator <= numerator);
            assert!((out + U256::from(1u64)) * denominator > numerator);
        }
    }

    #[test]
    fn product_is_non_decreasing_across_random_swaps() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let reserve_in = U256::from(rng.gen_range(1u64..=u64::MAX));
            let reserve_out = U256::from(rng.gen_range(1u64..=u64::MAX));
            let amount_in = U256::from(rng.gen_range(1u64..=u64::MAX));
            let out = quote_out(amount_in, reserve_in, reserve_out, DEFAULT_FEE_BPS).unwrap();
            let before = reserve_in * reserve_out;
            let after = (reserve_in + amount_in) * (reserve_out - out);
            assert!(after >= before);
        }
    }

    #[test]
    fn output_reserve_survives_an_oversized_trade() {
        // draining trades are bounded away from zero by the formula itself,
        // and plan_swap enforces the bound explicitly
        let reserve = U256::from(100u64);
        let huge = U256::from(10u64).pow(U256::from(30));
        let out = plan_swap(huge, reserve, reserve, DEFAULT_FEE_BPS, U256::ZERO).unwrap();
        assert!(reserve - out >= U256::from(1u64));
    }

    #[test]
    fn slippage_bound_rejects_short_output() {
        let err = plan_swap(
            units(10),
            units(100),
            units(100),
            DEFAULT_FEE_BPS,
            units(10),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PoolError::SlippageExceeded {
                computed: U256::from(9_066_108_938_801_491_315u64),
                minimum: units(10),
            }
        );
    }

    #[test]
    fn zero_min_out_disables_the_slippage_check() {
        // a dust trade quoting to zero output still passes with min_out = 0
        let out = plan_swap(
            U256::from(1u64),
            units(100),
            units(100),
            DEFAULT_FEE_BPS,
            U256::ZERO,
        )
        .unwrap();
        assert_eq!(out, U256::ZERO);
    }

    #[test]
    fn apply_swap_moves_both_reserves() {
        let mut state = PoolState::new(
            crate::shared::types::AccountId::new("owner"),
            AssetId::new("TKA"),
            AssetId::new("TKB"),
        );
        state.reserve_a = units(100);
        state.reserve_b = units(100);

        apply_swap(
            &mut state,
            SwapDirection::AToB,
            units(10),
            U256::from(9_066_108_938_801_491_315u64),
        )
        .unwrap();

        assert_eq!(state.reserve_a, units(110));
        assert_eq!(
            state.reserve_b,
            units(100) - U256::from(9_066_108_938_801_491_315u64)
        );
    }
}

//! Price domain - reserve-ratio spot quoting

use alloy_primitives::U256;

use crate::domain::pool::PoolState;
use crate::shared::errors::PoolError;
use crate::shared::types::AssetId;

/// Fixed-point scale for spot prices: 18 fractional decimal digits
pub const PRICE_SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Spot price of one unit of `asset`, expressed in units of the paired
/// asset and scaled by [`PRICE_SCALE`].
///
/// Derived solely from the current reserve ratio; a large swap immediately
/// before the query moves it. That is accepted behavior.
pub fn spot_price(state: &PoolState, asset: &AssetId) -> Result<U256, PoolError> {
    let (this_reserve, other_reserve) = if *asset == state.asset_a {
        (state.reserve_a, state.reserve_b)
    } else if *asset == state.asset_b {
        (state.reserve_b, state.reserve_a)
    } else {
        return Err(PoolError::InvalidTokenQuery(asset.clone()));
    };

    if this_reserve.is_zero() {
        return Err(PoolError::DivisionByZero);
    }

    let scaled = other_reserve
        .checked_mul(PRICE_SCALE)
        .ok_or(PoolError::ArithmeticOverflow)?;
    Ok(scaled / this_reserve)
}

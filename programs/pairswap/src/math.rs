use anchor_lang::prelude::*;

use crate::constants::PRICE_SCALE;
use crate::errors::SwapError;

/// Integer square root using the Babylonian method
pub fn sqrt(y: u128) -> u128 {
    if y == 0 {
        return 0;
    }

    let mut z = (y + 1) / 2;
    let mut x = y;

    while z < x {
        x = z;
        z = (y / z + z) / 2;
    }

    x
}

/// Calculate the output amount for a swap
///
/// Formula: amount_out = amount_in * reserve_out / (reserve_in + amount_in)
///
/// Floor division keeps the post-trade reserve product at or above the
/// pre-trade product. Pure: never touches pool state.
pub fn get_amount_out(amount_in: u64, reserve_in: u64, reserve_out: u64) -> Result<u64> {
    require!(amount_in > 0, SwapError::InvalidAmount);
    require!(reserve_in > 0 && reserve_out > 0, SwapError::InvalidReserves);

    let numerator = (amount_in as u128)
        .checked_mul(reserve_out as u128)
        .ok_or(SwapError::MathOverflow)?;

    let denominator = (reserve_in as u128)
        .checked_add(amount_in as u128)
        .ok_or(SwapError::MathOverflow)?;

    // numerator / denominator < reserve_out, so the cast cannot truncate
    Ok((numerator / denominator) as u64)
}

/// Counter-amount that preserves the current reserve ratio
///
/// Formula: amount_to = amount_from * reserve_to / reserve_from
pub fn quote(amount_from: u64, reserve_from: u64, reserve_to: u64) -> Result<u64> {
    require!(amount_from > 0, SwapError::InvalidAmount);
    require!(reserve_from > 0 && reserve_to > 0, SwapError::InvalidReserves);

    let amount_to = (amount_from as u128)
        .checked_mul(reserve_to as u128)
        .ok_or(SwapError::MathOverflow)?
        .checked_div(reserve_from as u128)
        .ok_or(SwapError::MathOverflow)?;

    u64::try_from(amount_to).map_err(|_| SwapError::MathOverflow.into())
}

/// Spot price of the base asset denominated in the quote asset,
/// scaled by 10^18
pub fn spot_price(reserve_base: u64, reserve_quote: u64) -> Result<u128> {
    require!(reserve_base > 0, SwapError::InvalidReserves);

    (reserve_quote as u128)
        .checked_mul(PRICE_SCALE)
        .ok_or(SwapError::MathOverflow)?
        .checked_div(reserve_base as u128)
        .ok_or(SwapError::MathOverflow.into())
}

/// Resolve the amounts actually deposited for a liquidity add
///
/// An empty pool takes both desired amounts as-is (the first depositor
/// sets the price). A seeded pool spends as much of the desired amounts
/// as the current ratio allows without exceeding either, then checks the
/// chosen pair against the caller's minimums.
pub fn plan_deposit(
    amount_a_desired: u64,
    amount_b_desired: u64,
    amount_a_min: u64,
    amount_b_min: u64,
    reserve_a: u64,
    reserve_b: u64,
) -> Result<(u64, u64)> {
    require!(
        amount_a_desired > 0 && amount_b_desired > 0,
        SwapError::InvalidAmount
    );

    if reserve_a == 0 && reserve_b == 0 {
        return Ok((amount_a_desired, amount_b_desired));
    }

    let amount_b_optimal = quote(amount_a_desired, reserve_a, reserve_b)?;
    if amount_b_optimal <= amount_b_desired {
        require!(amount_b_optimal >= amount_b_min, SwapError::SlippageExceeded);
        Ok((amount_a_desired, amount_b_optimal))
    } else {
        // amount_a_optimal <= amount_a_desired holds whenever the first
        // branch was infeasible
        let amount_a_optimal = quote(amount_b_desired, reserve_b, reserve_a)?;
        require!(amount_a_optimal >= amount_a_min, SwapError::SlippageExceeded);
        Ok((amount_a_optimal, amount_b_desired))
    }
}

/// Shares minted for the first deposit into an empty pool
///
/// Formula: floor(sqrt(amount_0 * amount_1))
pub fn initial_shares(amount_0: u64, amount_1: u64) -> Result<u64> {
    let product = (amount_0 as u128)
        .checked_mul(amount_1 as u128)
        .ok_or(SwapError::MathOverflow)?;

    let shares = sqrt(product);
    require!(shares > 0, SwapError::InvalidAmount);

    // sqrt(a * b) <= max(a, b) <= u64::MAX
    Ok(shares as u64)
}

/// Shares minted for a deposit into a seeded pool
///
/// Formula: min(amount_0 * supply / reserve_0, amount_1 * supply / reserve_1)
///
/// Taking the minimum caps issuance at what the smaller-weighted leg
/// justifies.
pub fn proportional_shares(
    amount_0: u64,
    amount_1: u64,
    reserve_0: u64,
    reserve_1: u64,
    total_shares: u64,
) -> Result<u64> {
    require!(reserve_0 > 0 && reserve_1 > 0, SwapError::InvalidReserves);
    require!(total_shares > 0, SwapError::InvalidReserves);

    let shares_0 = (amount_0 as u128)
        .checked_mul(total_shares as u128)
        .ok_or(SwapError::MathOverflow)?
        .checked_div(reserve_0 as u128)
        .ok_or(SwapError::MathOverflow)?;

    let shares_1 = (amount_1 as u128)
        .checked_mul(total_shares as u128)
        .ok_or(SwapError::MathOverflow)?
        .checked_div(reserve_1 as u128)
        .ok_or(SwapError::MathOverflow)?;

    let shares = shares_0.min(shares_1);
    require!(shares > 0, SwapError::InvalidAmount);

    u64::try_from(shares).map_err(|_| SwapError::MathOverflow.into())
}

/// Amounts returned when redeeming shares
///
/// Formula: amount_x = reserve_x * shares / supply, floor division, so
/// rounding loss always stays with the pool.
pub fn redemption_amounts(
    shares: u64,
    reserve_0: u64,
    reserve_1: u64,
    total_shares: u64,
) -> Result<(u64, u64)> {
    require!(shares > 0, SwapError::InvalidAmount);
    require!(total_shares > 0, SwapError::InvalidReserves);
    require!(shares <= total_shares, SwapError::InsufficientShares);

    let amount_0 = (reserve_0 as u128)
        .checked_mul(shares as u128)
        .ok_or(SwapError::MathOverflow)?
        .checked_div(total_shares as u128)
        .ok_or(SwapError::MathOverflow)?;

    let amount_1 = (reserve_1 as u128)
        .checked_mul(shares as u128)
        .ok_or(SwapError::MathOverflow)?
        .checked_div(total_shares as u128)
        .ok_or(SwapError::MathOverflow)?;

    // amount_x <= reserve_x, so the casts cannot truncate
    Ok((amount_0 as u64, amount_1 as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_exact_and_floored() {
        assert_eq!(sqrt(0), 0);
        assert_eq!(sqrt(1), 1);
        assert_eq!(sqrt(4), 2);
        assert_eq!(sqrt(20_000), 141); // floor(sqrt(20000)) = 141
        let root = sqrt(u128::from(u64::MAX));
        assert!(root * root <= u128::from(u64::MAX));
        assert!((root + 1) * (root + 1) > u128::from(u64::MAX));
    }

    #[test]
    fn amount_out_matches_constant_product_formula() {
        // 10 in against (100, 200): floor(10 * 200 / 110) = 18
        assert_eq!(get_amount_out(10, 100, 200).unwrap(), 18);
        // base-unit scale (9 decimals) stays exact through the u128 intermediates
        let one = 1_000_000_000u64;
        let expected =
            (10 * one as u128 * (200 * one as u128)) / (100 * one as u128 + 10 * one as u128);
        assert_eq!(
            get_amount_out(10 * one, 100 * one, 200 * one).unwrap() as u128,
            expected
        );
    }

    #[test]
    fn amount_out_rejects_zero_amount() {
        assert_eq!(
            get_amount_out(0, 1, 1).unwrap_err(),
            SwapError::InvalidAmount.into()
        );
    }

    #[test]
    fn amount_out_rejects_zero_reserves() {
        assert_eq!(
            get_amount_out(5, 0, 0).unwrap_err(),
            SwapError::InvalidReserves.into()
        );
        assert_eq!(
            get_amount_out(5, 10, 0).unwrap_err(),
            SwapError::InvalidReserves.into()
        );
        assert_eq!(
            get_amount_out(5, 0, 10).unwrap_err(),
            SwapError::InvalidReserves.into()
        );
    }

    #[test]
    fn amount_out_is_increasing_and_bounded() {
        let (reserve_in, reserve_out) = (1_000u64, 3_000u64);
        let mut last = 0u64;
        for amount_in in [1u64, 10, 100, 1_000, 10_000, 1_000_000] {
            let out = get_amount_out(amount_in, reserve_in, reserve_out).unwrap();
            assert!(out >= last);
            assert!(out < reserve_out);
            last = out;
        }
    }

    #[test]
    fn swap_never_decreases_reserve_product() {
        let cases = [
            (1u64, 100u64, 100u64),
            (7, 100, 300),
            (1_000, 1_000, 1_000),
            (123_456, 10_000_000, 50_000),
            (u64::MAX / 4, u64::MAX / 2, u64::MAX / 2),
        ];
        for (amount_in, reserve_in, reserve_out) in cases {
            let out = get_amount_out(amount_in, reserve_in, reserve_out).unwrap();
            let k_before = reserve_in as u128 * reserve_out as u128;
            let k_after = (reserve_in as u128 + amount_in as u128)
                * (reserve_out as u128 - out as u128);
            assert!(k_after >= k_before, "product decreased for {amount_in}");
        }
    }

    #[test]
    fn quote_preserves_ratio() {
        assert_eq!(quote(50, 100, 200).unwrap(), 100);
        assert_eq!(quote(50, 200, 100).unwrap(), 25);
        assert_eq!(
            quote(0, 100, 200).unwrap_err(),
            SwapError::InvalidAmount.into()
        );
    }

    #[test]
    fn spot_price_is_quote_per_base_scaled() {
        // (100, 200) pool: price of base in quote = 2 * 10^18
        assert_eq!(spot_price(100, 200).unwrap(), 2 * PRICE_SCALE);
        assert_eq!(spot_price(200, 100).unwrap(), PRICE_SCALE / 2);
        assert_eq!(
            spot_price(0, 100).unwrap_err(),
            SwapError::InvalidReserves.into()
        );
    }

    #[test]
    fn plan_deposit_takes_desired_amounts_into_empty_pool() {
        assert_eq!(plan_deposit(100, 200, 0, 0, 0, 0).unwrap(), (100, 200));
    }

    #[test]
    fn plan_deposit_rejects_zero_desired_amounts() {
        assert_eq!(
            plan_deposit(0, 200, 0, 0, 0, 0).unwrap_err(),
            SwapError::InvalidAmount.into()
        );
        assert_eq!(
            plan_deposit(100, 0, 0, 0, 100, 100).unwrap_err(),
            SwapError::InvalidAmount.into()
        );
    }

    #[test]
    fn plan_deposit_clamps_the_overweighted_leg() {
        // balanced (100, 100) pool: (50, 80) desired settles at (50, 50)
        assert_eq!(plan_deposit(50, 80, 49, 40, 100, 100).unwrap(), (50, 50));
        // (100, 200) pool: b leg short, so a is clamped instead
        assert_eq!(plan_deposit(50, 60, 0, 0, 100, 200).unwrap(), (30, 60));
    }

    #[test]
    fn plan_deposit_enforces_minimums() {
        assert_eq!(
            plan_deposit(50, 80, 0, 60, 100, 100).unwrap_err(),
            SwapError::SlippageExceeded.into()
        );
        assert_eq!(
            plan_deposit(50, 60, 31, 0, 100, 200).unwrap_err(),
            SwapError::SlippageExceeded.into()
        );
    }

    #[test]
    fn first_deposit_mints_geometric_mean() {
        assert_eq!(initial_shares(100, 200).unwrap(), 141);
        assert_eq!(initial_shares(100, 100).unwrap(), 100);
        assert_eq!(
            initial_shares(0, 100).unwrap_err(),
            SwapError::InvalidAmount.into()
        );
    }

    #[test]
    fn balanced_second_deposit_scales_supply_proportionally() {
        // (100, 200) pool with 141 shares out; depositing (50, 100) adds
        // half the reserves and mints half the supply, within rounding
        let supply = initial_shares(100, 200).unwrap();
        let minted = proportional_shares(50, 100, 100, 200, supply).unwrap();
        assert_eq!(minted, 70); // floor(141 / 2)
    }

    #[test]
    fn imbalanced_deposit_mints_min_of_both_legs() {
        // straight min() when the handler has not clamped the amounts
        let minted = proportional_shares(50, 80, 100, 100, 100).unwrap();
        assert_eq!(minted, 50);
    }

    #[test]
    fn proportional_shares_rejects_empty_pool() {
        assert_eq!(
            proportional_shares(50, 80, 0, 0, 0).unwrap_err(),
            SwapError::InvalidReserves.into()
        );
    }

    #[test]
    fn redemption_is_proportional_and_floored() {
        assert_eq!(redemption_amounts(70, 150, 300, 211).unwrap(), (49, 99));
        // full redemption drains the pool exactly
        assert_eq!(redemption_amounts(211, 150, 300, 211).unwrap(), (150, 300));
    }

    #[test]
    fn redemption_rejects_more_shares_than_supply() {
        assert_eq!(
            redemption_amounts(212, 150, 300, 211).unwrap_err(),
            SwapError::InsufficientShares.into()
        );
        assert_eq!(
            redemption_amounts(0, 150, 300, 211).unwrap_err(),
            SwapError::InvalidAmount.into()
        );
    }

    #[test]
    fn deposit_then_full_withdrawal_never_returns_more() {
        for (a, b) in [(100u64, 200u64), (1, 1), (999_999, 3), (12_345, 67_890)] {
            let shares = initial_shares(a, b).unwrap();
            let (out_a, out_b) = redemption_amounts(shares, a, b, shares).unwrap();
            assert!(out_a <= a);
            assert!(out_b <= b);
        }
    }
}

use anchor_lang::prelude::*;

use crate::constants::POOL_SEED;
use crate::errors::SwapError;
use crate::math;
use crate::state::Pool;

/// Reserves in the caller's asset order
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct PairReserves {
    pub reserve_a: u64,
    pub reserve_b: u64,
}

#[derive(Accounts)]
pub struct GetAmountOut {}

#[derive(Accounts)]
pub struct ViewPair<'info> {
    #[account(
        seeds = [POOL_SEED, pool.mint_0.as_ref(), pool.mint_1.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

fn validate_pair(token_a: &Pubkey, token_b: &Pubkey) -> Result<()> {
    require!(token_a != token_b, SwapError::IdenticalTokens);
    require!(
        *token_a != Pubkey::default() && *token_b != Pubkey::default(),
        SwapError::ZeroAddress
    );
    Ok(())
}

/// Pure constant-product quote, usable without a pool
pub fn get_amount_out_handler(
    _ctx: Context<GetAmountOut>,
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
) -> Result<u64> {
    math::get_amount_out(amount_in, reserve_in, reserve_out)
}

/// Spot price of token_a denominated in token_b, scaled by 10^18
pub fn get_price_handler(ctx: Context<ViewPair>, token_a: Pubkey, token_b: Pubkey) -> Result<u128> {
    validate_pair(&token_a, &token_b)?;
    require!(ctx.accounts.pool.contains(&token_b), SwapError::PairMismatch);

    let (reserve_a, reserve_b) = ctx.accounts.pool.oriented_reserves(&token_a)?;
    math::spot_price(reserve_a, reserve_b)
}

/// Current reserves translated into the caller's asset order
pub fn get_reserves_handler(
    ctx: Context<ViewPair>,
    token_a: Pubkey,
    token_b: Pubkey,
) -> Result<PairReserves> {
    validate_pair(&token_a, &token_b)?;
    require!(ctx.accounts.pool.contains(&token_b), SwapError::PairMismatch);

    let (reserve_a, reserve_b) = ctx.accounts.pool.oriented_reserves(&token_a)?;
    Ok(PairReserves {
        reserve_a,
        reserve_b,
    })
}

#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod pairswap {
    use super::*;

    /// Deposit a pair of assets and mint pool shares to the recipient.
    /// Creates the pool, its vaults and its share mint on first use.
    pub fn add_liquidity(
        ctx: Context<AddLiquidity>,
        amount_a_desired: u64,
        amount_b_desired: u64,
        amount_a_min: u64,
        amount_b_min: u64,
        deadline: i64,
    ) -> Result<LiquidityReceipt> {
        instructions::add_liquidity::handler(
            ctx,
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
            deadline,
        )
    }

    /// Burn pool shares and pay out the proportional reserves
    pub fn remove_liquidity(
        ctx: Context<RemoveLiquidity>,
        shares: u64,
        amount_a_min: u64,
        amount_b_min: u64,
        deadline: i64,
    ) -> Result<WithdrawalReceipt> {
        instructions::remove_liquidity::handler(ctx, shares, amount_a_min, amount_b_min, deadline)
    }

    /// Trade an exact input amount along a single-hop path
    pub fn swap_exact_tokens_for_tokens(
        ctx: Context<Swap>,
        amount_in: u64,
        amount_out_min: u64,
        path: Vec<Pubkey>,
        deadline: i64,
    ) -> Result<u64> {
        instructions::swap::handler(ctx, amount_in, amount_out_min, path, deadline)
    }

    /// Constant-product output quote for the given reserves
    pub fn get_amount_out(
        ctx: Context<GetAmountOut>,
        amount_in: u64,
        reserve_in: u64,
        reserve_out: u64,
    ) -> Result<u64> {
        instructions::quote::get_amount_out_handler(ctx, amount_in, reserve_in, reserve_out)
    }

    /// Spot price of token_a denominated in token_b, scaled by 10^18
    pub fn get_price(ctx: Context<ViewPair>, token_a: Pubkey, token_b: Pubkey) -> Result<u128> {
        instructions::quote::get_price_handler(ctx, token_a, token_b)
    }

    /// Current reserves in the caller's asset order
    pub fn get_reserves(
        ctx: Context<ViewPair>,
        token_a: Pubkey,
        token_b: Pubkey,
    ) -> Result<PairReserves> {
        instructions::quote::get_reserves_handler(ctx, token_a, token_b)
    }
}

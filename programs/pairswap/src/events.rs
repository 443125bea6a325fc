use anchor_lang::prelude::*;

/// Emitted when the first deposit creates a pool
#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub mint_0: Pubkey,
    pub mint_1: Pubkey,
    pub shares_mint: Pubkey,
    pub timestamp: i64,
}

/// Emitted when liquidity is added
#[event]
pub struct LiquidityAdded {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    pub recipient: Pubkey,
    pub amount_0: u64,
    pub amount_1: u64,
    pub shares_minted: u64,
    pub reserve_0: u64,
    pub reserve_1: u64,
    pub timestamp: i64,
}

/// Emitted when liquidity is removed
#[event]
pub struct LiquidityRemoved {
    pub pool: Pubkey,
    pub withdrawer: Pubkey,
    pub recipient: Pubkey,
    pub shares_burned: u64,
    pub amount_0: u64,
    pub amount_1: u64,
    pub reserve_0: u64,
    pub reserve_1: u64,
    pub timestamp: i64,
}

/// Emitted when a swap occurs
#[event]
pub struct SwapExecuted {
    pub pool: Pubkey,
    pub trader: Pubkey,
    pub recipient: Pubkey,
    pub mint_in: Pubkey,
    pub mint_out: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub reserve_0: u64,
    pub reserve_1: u64,
    pub timestamp: i64,
}

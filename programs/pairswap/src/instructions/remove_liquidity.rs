use std::cmp::{max, min};

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::SwapError;
use crate::events::LiquidityRemoved;
use crate::instructions::check_deadline;
use crate::math::redemption_amounts;
use crate::state::Pool;

/// Amounts paid out by a remove_liquidity call
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct WithdrawalReceipt {
    pub amount_a: u64,
    pub amount_b: u64,
}

#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    /// Share holder redeeming against the pool
    #[account(mut)]
    pub user: Signer<'info>,

    /// First mint, in the caller's order
    pub mint_a: Account<'info, Mint>,

    /// Second mint
    #[account(constraint = mint_a.key() != mint_b.key() @ SwapError::IdenticalTokens)]
    pub mint_b: Account<'info, Mint>,

    /// Pool state for the pair
    #[account(
        mut,
        seeds = [
            POOL_SEED,
            min(mint_a.key(), mint_b.key()).as_ref(),
            max(mint_a.key(), mint_b.key()).as_ref(),
        ],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref(), mint_a.key().as_ref()],
        bump
    )]
    pub vault_a: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref(), mint_b.key().as_ref()],
        bump
    )]
    pub vault_b: Account<'info, TokenAccount>,

    /// Pool-share mint
    #[account(
        mut,
        seeds = [SHARES_MINT_SEED, pool.key().as_ref()],
        bump,
        constraint = shares_mint.key() == pool.shares_mint @ SwapError::PairMismatch
    )]
    pub shares_mint: Account<'info, Mint>,

    /// User's share account, burned from
    #[account(
        mut,
        constraint = user_shares.mint == shares_mint.key() @ SwapError::InvalidTokenAccount,
        constraint = user_shares.owner == user.key() @ SwapError::InvalidTokenAccount
    )]
    pub user_shares: Account<'info, TokenAccount>,

    /// CHECK: payout recipient, any address
    pub recipient: UncheckedAccount<'info>,

    /// Recipient's mint_a destination account
    #[account(
        mut,
        constraint = recipient_token_a.mint == mint_a.key() @ SwapError::InvalidTokenAccount,
        constraint = recipient_token_a.owner == recipient.key() @ SwapError::InvalidTokenAccount
    )]
    pub recipient_token_a: Account<'info, TokenAccount>,

    /// Recipient's mint_b destination account
    #[account(
        mut,
        constraint = recipient_token_b.mint == mint_b.key() @ SwapError::InvalidTokenAccount,
        constraint = recipient_token_b.owner == recipient.key() @ SwapError::InvalidTokenAccount
    )]
    pub recipient_token_b: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(
    ctx: Context<RemoveLiquidity>,
    shares: u64,
    amount_a_min: u64,
    amount_b_min: u64,
    deadline: i64,
) -> Result<WithdrawalReceipt> {
    require!(
        ctx.accounts.recipient.key() != Pubkey::default(),
        SwapError::ZeroAddress
    );
    check_deadline(deadline)?;
    require!(shares > 0, SwapError::InvalidAmount);
    require!(
        ctx.accounts.user_shares.amount >= shares,
        SwapError::InsufficientShares
    );

    let mint_a = ctx.accounts.mint_a.key();
    let total_shares = ctx.accounts.shares_mint.supply;
    let (reserve_a, reserve_b) = ctx.accounts.pool.oriented_reserves(&mint_a)?;

    let (amount_a, amount_b) = redemption_amounts(shares, reserve_a, reserve_b, total_shares)?;

    require!(amount_a >= amount_a_min, SwapError::SlippageExceeded);
    require!(amount_b >= amount_b_min, SwapError::SlippageExceeded);

    // Burn the redeemed shares first
    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.shares_mint.to_account_info(),
                from: ctx.accounts.user_shares.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        shares,
    )?;

    // Pay out both legs, pool PDA signs
    let mint_0 = ctx.accounts.pool.mint_0;
    let mint_1 = ctx.accounts.pool.mint_1;
    let bump = ctx.accounts.pool.bump;
    let seeds = &[POOL_SEED, mint_0.as_ref(), mint_1.as_ref(), &[bump]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_a.to_account_info(),
                to: ctx.accounts.recipient_token_a.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount_a,
    )?;

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_b.to_account_info(),
                to: ctx.accounts.recipient_token_b.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount_b,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.debit(&mint_a, amount_a, amount_b)?;

    emit!(LiquidityRemoved {
        pool: pool.key(),
        withdrawer: ctx.accounts.user.key(),
        recipient: ctx.accounts.recipient.key(),
        shares_burned: shares,
        amount_0: if mint_a == mint_0 { amount_a } else { amount_b },
        amount_1: if mint_a == mint_0 { amount_b } else { amount_a },
        reserve_0: pool.reserve_0,
        reserve_1: pool.reserve_1,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Removed liquidity: burned {} shares, paid {} A, {} B",
        shares,
        amount_a,
        amount_b
    );

    Ok(WithdrawalReceipt { amount_a, amount_b })
}

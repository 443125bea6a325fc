use std::cmp::{max, min};

use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::SwapError;
use crate::events::{LiquidityAdded, PoolCreated};
use crate::instructions::check_deadline;
use crate::math::{initial_shares, plan_deposit, proportional_shares};
use crate::state::Pool;

/// Amounts actually settled by an add_liquidity call
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct LiquidityReceipt {
    pub amount_a: u64,
    pub amount_b: u64,
    pub shares: u64,
}

#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    /// Liquidity provider, pays for lazily created pool accounts
    #[account(mut)]
    pub user: Signer<'info>,

    /// First mint, in the caller's order
    pub mint_a: Account<'info, Mint>,

    /// Second mint
    #[account(constraint = mint_a.key() != mint_b.key() @ SwapError::IdenticalTokens)]
    pub mint_b: Account<'info, Mint>,

    /// Pool state, created on the first deposit into this pair
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + Pool::INIT_SPACE,
        seeds = [
            POOL_SEED,
            min(mint_a.key(), mint_b.key()).as_ref(),
            max(mint_a.key(), mint_b.key()).as_ref(),
        ],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// Vault holding the pool's mint_a reserve
    #[account(
        init_if_needed,
        payer = user,
        seeds = [VAULT_SEED, pool.key().as_ref(), mint_a.key().as_ref()],
        bump,
        token::mint = mint_a,
        token::authority = pool
    )]
    pub vault_a: Account<'info, TokenAccount>,

    /// Vault holding the pool's mint_b reserve
    #[account(
        init_if_needed,
        payer = user,
        seeds = [VAULT_SEED, pool.key().as_ref(), mint_b.key().as_ref()],
        bump,
        token::mint = mint_b,
        token::authority = pool
    )]
    pub vault_b: Account<'info, TokenAccount>,

    /// Pool-share mint
    #[account(
        init_if_needed,
        payer = user,
        seeds = [SHARES_MINT_SEED, pool.key().as_ref()],
        bump,
        mint::decimals = SHARE_DECIMALS,
        mint::authority = pool
    )]
    pub shares_mint: Account<'info, Mint>,

    /// CHECK: share recipient, any address
    pub recipient: UncheckedAccount<'info>,

    /// Recipient's share token account
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = shares_mint,
        associated_token::authority = recipient
    )]
    pub recipient_shares: Account<'info, TokenAccount>,

    /// User's mint_a source account
    #[account(
        mut,
        constraint = user_token_a.mint == mint_a.key() @ SwapError::InvalidTokenAccount
    )]
    pub user_token_a: Account<'info, TokenAccount>,

    /// User's mint_b source account
    #[account(
        mut,
        constraint = user_token_b.mint == mint_b.key() @ SwapError::InvalidTokenAccount
    )]
    pub user_token_b: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(
    ctx: Context<AddLiquidity>,
    amount_a_desired: u64,
    amount_b_desired: u64,
    amount_a_min: u64,
    amount_b_min: u64,
    deadline: i64,
) -> Result<LiquidityReceipt> {
    require!(
        ctx.accounts.recipient.key() != Pubkey::default(),
        SwapError::ZeroAddress
    );
    check_deadline(deadline)?;

    let clock = Clock::get()?;

    // Seed the pool record on first use
    if ctx.accounts.pool.mint_0 == Pubkey::default() {
        let (mint_0, mint_1) =
            Pool::canonical(&ctx.accounts.mint_a.key(), &ctx.accounts.mint_b.key());
        let pool = &mut ctx.accounts.pool;
        pool.bump = ctx.bumps.pool;
        pool.mint_0 = mint_0;
        pool.mint_1 = mint_1;
        pool.shares_mint = ctx.accounts.shares_mint.key();
        pool.reserve_0 = 0;
        pool.reserve_1 = 0;
        pool.created_at = clock.unix_timestamp;

        emit!(PoolCreated {
            pool: pool.key(),
            mint_0,
            mint_1,
            shares_mint: pool.shares_mint,
            timestamp: clock.unix_timestamp,
        });
    }

    let mint_a = ctx.accounts.mint_a.key();
    let total_shares = ctx.accounts.shares_mint.supply;
    let (reserve_a, reserve_b) = ctx.accounts.pool.oriented_reserves(&mint_a)?;

    // Resolve the settled amounts against the current ratio
    let (amount_a, amount_b) = plan_deposit(
        amount_a_desired,
        amount_b_desired,
        amount_a_min,
        amount_b_min,
        reserve_a,
        reserve_b,
    )?;

    let shares = if total_shares == 0 {
        initial_shares(amount_a, amount_b)?
    } else {
        proportional_shares(amount_a, amount_b, reserve_a, reserve_b, total_shares)?
    };

    // Pull both legs from the depositor
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token_a.to_account_info(),
                to: ctx.accounts.vault_a.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount_a,
    )?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token_b.to_account_info(),
                to: ctx.accounts.vault_b.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount_b,
    )?;

    // Mint shares to the recipient, pool PDA signs
    let mint_0 = ctx.accounts.pool.mint_0;
    let mint_1 = ctx.accounts.pool.mint_1;
    let bump = ctx.accounts.pool.bump;
    let seeds = &[POOL_SEED, mint_0.as_ref(), mint_1.as_ref(), &[bump]];
    let signer_seeds = &[&seeds[..]];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.shares_mint.to_account_info(),
                to: ctx.accounts.recipient_shares.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        shares,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.credit(&mint_a, amount_a, amount_b)?;

    emit!(LiquidityAdded {
        pool: pool.key(),
        depositor: ctx.accounts.user.key(),
        recipient: ctx.accounts.recipient.key(),
        amount_0: if mint_a == mint_0 { amount_a } else { amount_b },
        amount_1: if mint_a == mint_0 { amount_b } else { amount_a },
        shares_minted: shares,
        reserve_0: pool.reserve_0,
        reserve_1: pool.reserve_1,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Added liquidity: {} A, {} B, minted {} shares",
        amount_a,
        amount_b,
        shares
    );

    Ok(LiquidityReceipt {
        amount_a,
        amount_b,
        shares,
    })
}

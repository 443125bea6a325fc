use std::cmp::{max, min};

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::SwapError;
use crate::events::SwapExecuted;
use crate::instructions::check_deadline;
use crate::math::get_amount_out;
use crate::state::Pool;

#[derive(Accounts)]
pub struct Swap<'info> {
    /// Trader supplying the input leg
    #[account(mut)]
    pub user: Signer<'info>,

    /// Input mint (path[0])
    pub mint_in: Account<'info, Mint>,

    /// Output mint (path[1])
    #[account(constraint = mint_in.key() != mint_out.key() @ SwapError::IdenticalTokens)]
    pub mint_out: Account<'info, Mint>,

    /// Pool state for the pair
    #[account(
        mut,
        seeds = [
            POOL_SEED,
            min(mint_in.key(), mint_out.key()).as_ref(),
            max(mint_in.key(), mint_out.key()).as_ref(),
        ],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref(), mint_in.key().as_ref()],
        bump
    )]
    pub vault_in: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref(), mint_out.key().as_ref()],
        bump
    )]
    pub vault_out: Account<'info, TokenAccount>,

    /// User's input token account
    #[account(
        mut,
        constraint = user_token_in.mint == mint_in.key() @ SwapError::InvalidTokenAccount
    )]
    pub user_token_in: Account<'info, TokenAccount>,

    /// CHECK: output recipient, any address
    pub recipient: UncheckedAccount<'info>,

    /// Recipient's output token account
    #[account(
        mut,
        constraint = recipient_token_out.mint == mint_out.key() @ SwapError::InvalidTokenAccount,
        constraint = recipient_token_out.owner == recipient.key() @ SwapError::InvalidTokenAccount
    )]
    pub recipient_token_out: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Exactly one hop: the path must be [mint_in, mint_out]
fn validate_path(path: &[Pubkey], mint_in: &Pubkey, mint_out: &Pubkey) -> Result<()> {
    require!(path.len() == 2, SwapError::UnsupportedPath);
    require_keys_eq!(path[0], *mint_in, SwapError::PairMismatch);
    require_keys_eq!(path[1], *mint_out, SwapError::PairMismatch);
    Ok(())
}

pub fn handler(
    ctx: Context<Swap>,
    amount_in: u64,
    amount_out_min: u64,
    path: Vec<Pubkey>,
    deadline: i64,
) -> Result<u64> {
    validate_path(
        &path,
        &ctx.accounts.mint_in.key(),
        &ctx.accounts.mint_out.key(),
    )?;
    require!(
        ctx.accounts.recipient.key() != Pubkey::default(),
        SwapError::ZeroAddress
    );
    check_deadline(deadline)?;
    require!(amount_in > 0, SwapError::InvalidAmount);

    let mint_in = ctx.accounts.mint_in.key();
    let (reserve_in, reserve_out) = ctx.accounts.pool.oriented_reserves(&mint_in)?;

    let amount_out = get_amount_out(amount_in, reserve_in, reserve_out)?;
    require!(amount_out >= amount_out_min, SwapError::SlippageExceeded);

    // Input leg settles before anything leaves the pool
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token_in.to_account_info(),
                to: ctx.accounts.vault_in.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount_in,
    )?;

    // Output leg, pool PDA signs
    let mint_0 = ctx.accounts.pool.mint_0;
    let mint_1 = ctx.accounts.pool.mint_1;
    let bump = ctx.accounts.pool.bump;
    let seeds = &[POOL_SEED, mint_0.as_ref(), mint_1.as_ref(), &[bump]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_out.to_account_info(),
                to: ctx.accounts.recipient_token_out.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount_out,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.apply_swap(&mint_in, amount_in, amount_out)?;

    emit!(SwapExecuted {
        pool: pool.key(),
        trader: ctx.accounts.user.key(),
        recipient: ctx.accounts.recipient.key(),
        mint_in,
        mint_out: ctx.accounts.mint_out.key(),
        amount_in,
        amount_out,
        reserve_0: pool.reserve_0,
        reserve_1: pool.reserve_1,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Swapped {} in for {} out", amount_in, amount_out);

    Ok(amount_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_hop_path_is_accepted() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        assert!(validate_path(&[a, b], &a, &b).is_ok());
    }

    #[test]
    fn non_two_element_paths_are_unsupported() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let c = Pubkey::new_unique();
        assert_eq!(
            validate_path(&[a], &a, &b).unwrap_err(),
            SwapError::UnsupportedPath.into()
        );
        assert_eq!(
            validate_path(&[a, b, c], &a, &b).unwrap_err(),
            SwapError::UnsupportedPath.into()
        );
    }

    #[test]
    fn path_must_match_the_supplied_mints() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        assert_eq!(
            validate_path(&[b, a], &a, &b).unwrap_err(),
            SwapError::PairMismatch.into()
        );
    }
}

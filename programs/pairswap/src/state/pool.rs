use anchor_lang::prelude::*;

use crate::errors::SwapError;

/// Liquidity pool state
/// PDA seeds: ["pool", mint_0, mint_1] with mint_0 < mint_1
#[account]
#[derive(InitSpace)]
pub struct Pool {
    /// Bump seed for the pool PDA
    pub bump: u8,

    /// Lower mint of the pair (canonical order)
    pub mint_0: Pubkey,

    /// Higher mint of the pair
    pub mint_1: Pubkey,

    /// Pool-share mint (PDA, authority = pool)
    pub shares_mint: Pubkey,

    /// Reserve of mint_0
    pub reserve_0: u64,

    /// Reserve of mint_1
    pub reserve_1: u64,

    /// Pool creation timestamp
    pub created_at: i64,
}

impl Pool {
    /// Sort a mint pair into canonical storage order
    pub fn canonical(a: &Pubkey, b: &Pubkey) -> (Pubkey, Pubkey) {
        if a < b {
            (*a, *b)
        } else {
            (*b, *a)
        }
    }

    /// A pool with all shares redeemed holds nothing on either side
    pub fn is_empty(&self) -> bool {
        self.reserve_0 == 0 && self.reserve_1 == 0
    }

    pub fn contains(&self, mint: &Pubkey) -> bool {
        *mint == self.mint_0 || *mint == self.mint_1
    }

    /// Constant-product invariant k = reserve_0 * reserve_1
    pub fn k(&self) -> u128 {
        (self.reserve_0 as u128) * (self.reserve_1 as u128)
    }

    /// Reserves in the caller's asset order rather than canonical order
    pub fn oriented_reserves(&self, first: &Pubkey) -> Result<(u64, u64)> {
        require!(self.contains(first), SwapError::PairMismatch);
        if *first == self.mint_0 {
            Ok((self.reserve_0, self.reserve_1))
        } else {
            Ok((self.reserve_1, self.reserve_0))
        }
    }

    /// Increase both reserves after a deposit, amounts given in the
    /// caller's order starting at `first`
    pub fn credit(&mut self, first: &Pubkey, amount_first: u64, amount_second: u64) -> Result<()> {
        require!(self.contains(first), SwapError::PairMismatch);
        let (amount_0, amount_1) = if *first == self.mint_0 {
            (amount_first, amount_second)
        } else {
            (amount_second, amount_first)
        };
        self.reserve_0 = self
            .reserve_0
            .checked_add(amount_0)
            .ok_or(SwapError::MathOverflow)?;
        self.reserve_1 = self
            .reserve_1
            .checked_add(amount_1)
            .ok_or(SwapError::MathOverflow)?;
        Ok(())
    }

    /// Decrease both reserves after a withdrawal
    pub fn debit(&mut self, first: &Pubkey, amount_first: u64, amount_second: u64) -> Result<()> {
        require!(self.contains(first), SwapError::PairMismatch);
        let (amount_0, amount_1) = if *first == self.mint_0 {
            (amount_first, amount_second)
        } else {
            (amount_second, amount_first)
        };
        self.reserve_0 = self
            .reserve_0
            .checked_sub(amount_0)
            .ok_or(SwapError::MathOverflow)?;
        self.reserve_1 = self
            .reserve_1
            .checked_sub(amount_1)
            .ok_or(SwapError::MathOverflow)?;
        Ok(())
    }

    /// Move reserves for a trade and re-check that the product did not
    /// decrease
    pub fn apply_swap(&mut self, mint_in: &Pubkey, amount_in: u64, amount_out: u64) -> Result<()> {
        require!(self.contains(mint_in), SwapError::PairMismatch);
        let k_before = self.k();

        if *mint_in == self.mint_0 {
            self.reserve_0 = self
                .reserve_0
                .checked_add(amount_in)
                .ok_or(SwapError::MathOverflow)?;
            self.reserve_1 = self
                .reserve_1
                .checked_sub(amount_out)
                .ok_or(SwapError::MathOverflow)?;
        } else {
            self.reserve_1 = self
                .reserve_1
                .checked_add(amount_in)
                .ok_or(SwapError::MathOverflow)?;
            self.reserve_0 = self
                .reserve_0
                .checked_sub(amount_out)
                .ok_or(SwapError::MathOverflow)?;
        }

        require!(self.k() >= k_before, SwapError::InvariantViolation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(mint_0: Pubkey, mint_1: Pubkey, reserve_0: u64, reserve_1: u64) -> Pool {
        Pool {
            bump: 255,
            mint_0,
            mint_1,
            shares_mint: Pubkey::new_unique(),
            reserve_0,
            reserve_1,
            created_at: 0,
        }
    }

    #[test]
    fn canonical_order_is_direction_independent() {
        let x = Pubkey::new_unique();
        let y = Pubkey::new_unique();
        assert_eq!(Pool::canonical(&x, &y), Pool::canonical(&y, &x));
        let (lo, hi) = Pool::canonical(&x, &y);
        assert!(lo < hi);
    }

    #[test]
    fn oriented_reserves_translate_from_canonical_storage() {
        let (lo, hi) = Pool::canonical(&Pubkey::new_unique(), &Pubkey::new_unique());
        let pool = pool(lo, hi, 100, 200);
        assert_eq!(pool.oriented_reserves(&lo).unwrap(), (100, 200));
        assert_eq!(pool.oriented_reserves(&hi).unwrap(), (200, 100));

        let stranger = Pubkey::new_unique();
        assert_eq!(
            pool.oriented_reserves(&stranger).unwrap_err(),
            SwapError::PairMismatch.into()
        );
    }

    #[test]
    fn credit_and_debit_round_trip_to_empty() {
        let (lo, hi) = Pool::canonical(&Pubkey::new_unique(), &Pubkey::new_unique());
        let mut pool = pool(lo, hi, 0, 0);
        assert!(pool.is_empty());

        pool.credit(&hi, 200, 100).unwrap();
        assert_eq!((pool.reserve_0, pool.reserve_1), (100, 200));
        assert!(!pool.is_empty());

        pool.debit(&lo, 100, 200).unwrap();
        assert!(pool.is_empty());
    }

    #[test]
    fn debit_past_reserves_fails_fast() {
        let (lo, hi) = Pool::canonical(&Pubkey::new_unique(), &Pubkey::new_unique());
        let mut pool = pool(lo, hi, 100, 200);
        assert_eq!(
            pool.debit(&lo, 101, 0).unwrap_err(),
            SwapError::MathOverflow.into()
        );
    }

    #[test]
    fn apply_swap_moves_reserves_and_keeps_product() {
        let (lo, hi) = Pool::canonical(&Pubkey::new_unique(), &Pubkey::new_unique());
        let mut pool = pool(lo, hi, 100, 200);
        let k_before = pool.k();

        // 10 of mint_0 in, 18 of mint_1 out (floored constant-product)
        pool.apply_swap(&lo, 10, 18).unwrap();
        assert_eq!((pool.reserve_0, pool.reserve_1), (110, 182));
        assert!(pool.k() >= k_before);
    }

    #[test]
    fn apply_swap_rejects_product_decrease() {
        let (lo, hi) = Pool::canonical(&Pubkey::new_unique(), &Pubkey::new_unique());
        let mut pool = pool(lo, hi, 100, 200);
        assert_eq!(
            pool.apply_swap(&hi, 1, 90).unwrap_err(),
            SwapError::InvariantViolation.into()
        );
    }
}

/// Pairswap constants

// ============================================================================
// SCALING
// ============================================================================

/// Fixed-point scale for spot prices (10^18)
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Decimals of the pool-share mint
pub const SHARE_DECIMALS: u8 = 6;

// ============================================================================
// PDA SEEDS
// ============================================================================

/// Seed for the pool PDA, followed by the canonically ordered mint keys
pub const POOL_SEED: &[u8] = b"pool";

/// Seed for a pool vault PDA (one vault per pooled mint)
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for the pool-share mint PDA
pub const SHARES_MINT_SEED: &[u8] = b"shares";

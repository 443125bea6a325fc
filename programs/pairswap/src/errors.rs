use anchor_lang::prelude::*;

#[error_code]
pub enum SwapError {
    // Argument validation
    #[msg("Amount must be > 0")]
    InvalidAmount,

    #[msg("Invalid reserves")]
    InvalidReserves,

    #[msg("Identical token addresses")]
    IdenticalTokens,

    #[msg("Zero address not allowed")]
    ZeroAddress,

    #[msg("Transaction expired")]
    Expired,

    #[msg("Only 1-step swaps supported")]
    UnsupportedPath,

    // Account binding
    #[msg("Token pair does not match the supplied pool")]
    PairMismatch,

    #[msg("Token account does not match the expected mint or owner")]
    InvalidTokenAccount,

    // Execution
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,

    #[msg("Insufficient share balance")]
    InsufficientShares,

    // Math
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Constant-product invariant violated")]
    InvariantViolation,
}

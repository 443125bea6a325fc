use anchor_lang::prelude::*;

use crate::errors::SwapError;

pub mod add_liquidity;
pub mod quote;
pub mod remove_liquidity;
pub mod swap;

pub use add_liquidity::*;
pub use quote::*;
pub use remove_liquidity::*;
pub use swap::*;

/// Deadline guard shared by every state-mutating instruction, evaluated
/// once at entry
pub(crate) fn check_deadline(deadline: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    require!(now <= deadline, SwapError::Expired);
    Ok(())
}

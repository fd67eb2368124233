use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// `amount * numerator / denominator`, rounded down, with a u128 intermediate
pub fn mul_div(amount: u64, numerator: u64, denominator: u64) -> Result<u64> {
    require!(denominator != 0, VaultError::DivisionByZero);
    let result = (amount as u128)
        .checked_mul(numerator as u128)
        .ok_or(error!(VaultError::MathOverflow))?
        / (denominator as u128);
    u64::try_from(result).map_err(|_| error!(VaultError::MathOverflow))
}

/// `10^decimals` as a u64, the fixed-point unit of a mint
pub fn base_unit(decimals: u8) -> Result<u64> {
    10u64
        .checked_pow(decimals as u32)
        .ok_or(error!(VaultError::MathOverflow))
}

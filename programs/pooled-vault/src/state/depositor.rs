use anchor_lang::prelude::*;

/// Cumulative underlying deposited on behalf of one recipient,
/// checked against `VaultState::user_deposit_limit`
#[account]
#[derive(InitSpace, Default)]
pub struct UserDeposit {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub total_deposited: u64,
    pub bump: u8,
}

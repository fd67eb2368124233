use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::{constants::*, errors::*, state::*};

/// Read-only accounts for the view instructions. Values come back through return data.
#[derive(Accounts)]
pub struct VaultView<'info> {
    #[account(
        seeds = [VAULT_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = vault_state.underlying @ VaultError::InvalidMint)]
    pub underlying_mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        associated_token::mint = underlying_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,
}

impl VaultView<'_> {
    fn balance(&self) -> u64 {
        self.vault_token_account.amount
    }
}

pub fn exchange_rate_handler(ctx: Context<VaultView>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .vault_state
        .exchange_rate(ctx.accounts.balance(), now)
}

pub fn total_underlying_handler(ctx: Context<VaultView>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .vault_state
        .total_underlying(ctx.accounts.balance(), now)
}

pub fn total_float_handler(ctx: Context<VaultView>) -> Result<u64> {
    Ok(ctx.accounts.vault_state.total_float(ctx.accounts.balance()))
}

pub fn locked_profit_handler(ctx: Context<VaultView>) -> Result<u64> {
    ctx.accounts
        .vault_state
        .locked_profit(Clock::get()?.unix_timestamp)
}

pub fn estimated_return_handler(ctx: Context<VaultView>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .vault_state
        .estimated_return(ctx.accounts.balance(), now)
}

pub fn calculate_shares_handler(ctx: Context<VaultView>, underlying_amount: u64) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .vault_state
        .calculate_shares(underlying_amount, ctx.accounts.balance(), now)
}

pub fn calculate_underlying_handler(ctx: Context<VaultView>, share_amount: u64) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .vault_state
        .calculate_underlying(share_amount, ctx.accounts.balance(), now)
}

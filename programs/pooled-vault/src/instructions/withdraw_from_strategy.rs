use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Pull underlying back from a trusted strategy into the vault float
///
/// Strategies return funds to a vault-owned withdraw account whose authority
/// is the PDA `[STRATEGY_WITHDRAW_SEED, vault, strategy]`. Only what the strategy
/// has already parked there can be redeemed. Harvest counts that account as
/// part of the strategy, so redeeming moves value from holdings to float
/// without booking a loss.
#[derive(Accounts)]
pub struct WithdrawFromStrategy<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = vault_state.auth @ VaultError::Unauthorized)]
    pub auth: Account<'info, VaultAuth>,

    #[account(address = vault_state.underlying @ VaultError::InvalidMint)]
    pub underlying_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [STRATEGY_SEED, vault_state.key().as_ref(), strategy_data.strategy.as_ref()],
        bump = strategy_data.bump,
    )]
    pub strategy_data: Account<'info, StrategyData>,

    /// CHECK: PDA used as authority of the withdraw account, validated by seeds
    #[account(
        seeds = [STRATEGY_WITHDRAW_SEED, vault_state.key().as_ref(), strategy_data.strategy.as_ref()],
        bump = strategy_data.withdraw_bump,
    )]
    pub strategy_withdraw_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        associated_token::mint = underlying_mint,
        associated_token::authority = strategy_withdraw_authority,
    )]
    pub strategy_withdraw_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        associated_token::mint = underlying_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<WithdrawFromStrategy>, amount: u64) -> Result<()> {
    let accounts = ctx.accounts;

    VaultState::acquire(&mut accounts.vault_state)?;
    let result = process(accounts, amount);
    accounts.vault_state.unlock();
    result
}

fn process(accounts: &mut WithdrawFromStrategy, amount: u64) -> Result<()> {
    let vault_key = accounts.vault_state.key();
    let caller = accounts.caller.key();
    authorize(
        &*accounts.auth,
        &caller,
        &vault_key,
        Capability::WithdrawFromStrategy,
    )?;

    // EFFECTS
    accounts.vault_state.withdraw_from_strategy(
        &mut accounts.strategy_data,
        amount,
        accounts.strategy_withdraw_account.amount,
    )?;

    // INTERACTIONS
    let strategy = accounts.strategy_data.strategy;
    let withdraw_bump = accounts.strategy_data.withdraw_bump;
    let withdraw_seeds: &[&[u8]] = &[
        STRATEGY_WITHDRAW_SEED,
        vault_key.as_ref(),
        strategy.as_ref(),
        &[withdraw_bump],
    ];
    token::transfer(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.strategy_withdraw_account.to_account_info(),
                to: accounts.vault_token_account.to_account_info(),
                authority: accounts.strategy_withdraw_authority.to_account_info(),
            },
            &[withdraw_seeds],
        ),
        amount,
    )?;

    emit!(StrategyWithdrawal {
        vault: vault_key,
        caller,
        strategy,
        amount,
        strategy_balance: accounts.strategy_data.balance,
        total_strategy_holdings: accounts.vault_state.total_strategy_holdings,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

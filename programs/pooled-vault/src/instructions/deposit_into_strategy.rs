use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Move underlying from the vault float into a trusted strategy
///
/// The strategy receives funds in the associated token account of its own
/// authority PDA `[b"authority", strategy_state]` derived under the strategy program.
#[derive(Accounts)]
pub struct DepositIntoStrategy<'info> {
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
        seeds = [STRATEGY_SEED, vault_state.key().as_ref(), strategy_state.key().as_ref()],
        bump = strategy_data.bump,
    )]
    pub strategy_data: Account<'info, StrategyData>,

    /// CHECK: strategy program code, must be the one recorded at trust time
    #[account(address = strategy_data.strategy_program @ VaultError::InvalidStrategyState)]
    pub strategy_program: UncheckedAccount<'info>,

    /// CHECK: external account, manually deserialized
    #[account(owner = strategy_program.key() @ VaultError::InvalidStrategyState)]
    pub strategy_state: UncheckedAccount<'info>,

    /// CHECK: strategy authority PDA, used to validate the deposit account
    #[account(
        seeds = [STRATEGY_AUTHORITY_SEED, strategy_state.key().as_ref()],
        bump,
        seeds::program = strategy_program.key()
    )]
    pub strategy_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        associated_token::mint = underlying_mint,
        associated_token::authority = strategy_authority,
    )]
    pub strategy_deposit_account: Box<Account<'info, TokenAccount>>,

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

pub fn handler(ctx: Context<DepositIntoStrategy>, amount: u64) -> Result<()> {
    let accounts = ctx.accounts;

    VaultState::acquire(&mut accounts.vault_state)?;
    let result = process(accounts, amount);
    accounts.vault_state.unlock();
    result
}

fn process(accounts: &mut DepositIntoStrategy, amount: u64) -> Result<()> {
    let vault_key = accounts.vault_state.key();
    let caller = accounts.caller.key();
    authorize(
        &*accounts.auth,
        &caller,
        &vault_key,
        Capability::DepositIntoStrategy,
    )?;

    let strategy = CommonStrategyState::from_account_info(&accounts.strategy_state)?;

    // EFFECTS
    accounts.vault_state.deposit_into_strategy(
        &mut accounts.strategy_data,
        &strategy,
        amount,
        accounts.vault_token_account.amount,
    )?;

    // INTERACTIONS
    let underlying = accounts.vault_state.underlying;
    let authority_bump = accounts.vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, underlying.as_ref(), &[authority_bump]];
    token::transfer(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.vault_token_account.to_account_info(),
                to: accounts.strategy_deposit_account.to_account_info(),
                authority: accounts.vault_authority.to_account_info(),
            },
            &[authority_seeds],
        ),
        amount,
    )?;

    emit!(StrategyDeposit {
        vault: vault_key,
        caller,
        strategy: accounts.strategy_data.strategy,
        amount,
        strategy_balance: accounts.strategy_data.balance,
        total_strategy_holdings: accounts.vault_state.total_strategy_holdings,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

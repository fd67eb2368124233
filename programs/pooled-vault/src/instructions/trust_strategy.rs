use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Mark a strategy as trusted, creating its accounting record on first use
#[derive(Accounts)]
pub struct TrustStrategy<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        seeds = [VAULT_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = vault_state.auth @ VaultError::Unauthorized)]
    pub auth: Account<'info, VaultAuth>,

    /// CHECK: strategy program code, owner of strategy_state
    pub strategy_program: UncheckedAccount<'info>,

    /// CHECK: external account, manually deserialized
    #[account(owner = strategy_program.key() @ VaultError::InvalidStrategyState)]
    pub strategy_state: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = caller,
        space = 8 + StrategyData::INIT_SPACE,
        seeds = [STRATEGY_SEED, vault_state.key().as_ref(), strategy_state.key().as_ref()],
        bump
    )]
    pub strategy_data: Account<'info, StrategyData>,

    pub system_program: Program<'info, System>,
}

/// Stop trusting a strategy. Its balance stays accounted for.
#[derive(Accounts)]
pub struct DistrustStrategy<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [VAULT_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = vault_state.auth @ VaultError::Unauthorized)]
    pub auth: Account<'info, VaultAuth>,

    #[account(
        mut,
        seeds = [STRATEGY_SEED, vault_state.key().as_ref(), strategy_data.strategy.as_ref()],
        bump = strategy_data.bump,
    )]
    pub strategy_data: Account<'info, StrategyData>,
}

pub fn trust_handler(ctx: Context<TrustStrategy>) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();
    authorize(
        &*ctx.accounts.auth,
        &ctx.accounts.caller.key(),
        &vault_key,
        Capability::TrustStrategy,
    )?;

    let strategy = CommonStrategyState::from_account_info(&ctx.accounts.strategy_state)?;

    let data = &mut ctx.accounts.strategy_data;
    if data.vault == Pubkey::default() {
        data.vault = vault_key;
        data.strategy = ctx.accounts.strategy_state.key();
        data.strategy_program = ctx.accounts.strategy_program.key();
        data.bump = ctx.bumps.strategy_data;
        data.withdraw_bump = Pubkey::find_program_address(
            &[
                STRATEGY_WITHDRAW_SEED,
                vault_key.as_ref(),
                data.strategy.as_ref(),
            ],
            ctx.program_id,
        )
        .1;
    }

    ctx.accounts.vault_state.trust_strategy(data, &strategy)?;

    emit!(StrategyTrustUpdated {
        vault: vault_key,
        strategy: data.strategy,
        trusted: true,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn distrust_handler(ctx: Context<DistrustStrategy>) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();
    authorize(
        &*ctx.accounts.auth,
        &ctx.accounts.caller.key(),
        &vault_key,
        Capability::DistrustStrategy,
    )?;

    let data = &mut ctx.accounts.strategy_data;
    ctx.accounts.vault_state.distrust_strategy(data);

    emit!(StrategyTrustUpdated {
        vault: vault_key,
        strategy: data.strategy,
        trusted: false,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Update a vault parameter
///
/// Every setter is gated by its own capability on the vault's authority.
#[derive(Accounts)]
pub struct Configure<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = vault_state.auth @ VaultError::Unauthorized)]
    pub auth: Account<'info, VaultAuth>,
}

/// Point the vault at another authority. The new one must be an initialized
/// `VaultAuth`, otherwise every gated instruction would become uncallable.
#[derive(Accounts)]
pub struct SetAuth<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = vault_state.auth @ VaultError::Unauthorized)]
    pub auth: Account<'info, VaultAuth>,

    pub new_auth: Account<'info, VaultAuth>,
}

fn configure(
    ctx: Context<Configure>,
    capability: Capability,
    apply: impl FnOnce(&mut VaultState) -> Result<()>,
) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();
    let caller = ctx.accounts.caller.key();
    authorize(&*ctx.accounts.auth, &caller, &vault_key, capability)?;

    apply(&mut ctx.accounts.vault_state)?;

    emit!(VaultConfigured {
        vault: vault_key,
        caller,
        capability,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn trigger_pause_handler(ctx: Context<Configure>) -> Result<()> {
    configure(ctx, Capability::TriggerPause, |vault| {
        let paused = vault.trigger_pause();
        msg!("vault paused: {}", paused);
        Ok(())
    })
}

pub fn set_deposit_limits_handler(
    ctx: Context<Configure>,
    user_limit: u64,
    vault_limit: u64,
) -> Result<()> {
    configure(ctx, Capability::SetDepositLimits, |vault| {
        vault.user_deposit_limit = user_limit;
        vault.vault_deposit_limit = vault_limit;
        Ok(())
    })
}

pub fn set_auth_handler(ctx: Context<SetAuth>) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();
    let caller = ctx.accounts.caller.key();
    authorize(&*ctx.accounts.auth, &caller, &vault_key, Capability::SetAuth)?;

    ctx.accounts.vault_state.auth = ctx.accounts.new_auth.key();

    emit!(VaultConfigured {
        vault: vault_key,
        caller,
        capability: Capability::SetAuth,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_blocks_per_year_handler(ctx: Context<Configure>, blocks_per_year: u64) -> Result<()> {
    configure(ctx, Capability::SetBlocksPerYear, |vault| {
        vault.blocks_per_year = blocks_per_year;
        Ok(())
    })
}

pub fn set_harvest_fee_percent_handler(ctx: Context<Configure>, percent: u64) -> Result<()> {
    configure(ctx, Capability::SetHarvestFeePercent, |vault| {
        vault.set_harvest_fee_percent(percent)
    })
}

pub fn set_burning_fee_percent_handler(ctx: Context<Configure>, percent: u64) -> Result<()> {
    configure(ctx, Capability::SetBurningFeePercent, |vault| {
        vault.set_burning_fee_percent(percent)
    })
}

pub fn set_harvest_fee_receiver_handler(ctx: Context<Configure>, receiver: Pubkey) -> Result<()> {
    configure(ctx, Capability::SetHarvestFeeReceiver, |vault| {
        vault.harvest_fee_receiver = receiver;
        Ok(())
    })
}

pub fn set_burning_fee_receiver_handler(ctx: Context<Configure>, receiver: Pubkey) -> Result<()> {
    configure(ctx, Capability::SetBurningFeeReceiver, |vault| {
        vault.burning_fee_receiver = receiver;
        Ok(())
    })
}

pub fn set_harvest_window_handler(ctx: Context<Configure>, window: u64) -> Result<()> {
    configure(ctx, Capability::SetHarvestWindow, |vault| {
        vault.set_harvest_window(window)
    })
}

pub fn set_harvest_delay_handler(ctx: Context<Configure>, delay: u64) -> Result<()> {
    configure(ctx, Capability::SetHarvestDelay, |vault| {
        vault.set_harvest_delay(delay)
    })
}

pub fn set_withdrawal_queue_handler(ctx: Context<Configure>, queue: Vec<Pubkey>) -> Result<()> {
    configure(ctx, Capability::SetWithdrawalQueue, |vault| {
        vault.set_withdrawal_queue(queue)
    })
}

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, events::*, state::*};

/// Initialize a new vault for a given underlying token
///
/// There is exactly one vault per underlying mint and any signer may create it
/// with an authority of their choosing. Deployers should initialize in the same
/// transaction that creates the mint, or check `vault_state.auth` (also in the
/// `VaultInitialized` event) before routing funds to the vault.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pays for the vault accounts
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Vault state PDA
    /// Security: Initialized with space for the full withdrawal queue
    #[account(
        init,
        payer = payer,
        space = 8 + VaultState::INIT_SPACE,
        seeds = [VAULT_SEED, underlying_mint.key().as_ref()],
        bump
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    /// Authority the vault delegates permission checks to
    pub auth: Account<'info, VaultAuth>,

    /// Underlying token mint (the token users deposit)
    pub underlying_mint: Box<Account<'info, Mint>>,

    /// Share token mint PDA (vault shares)
    /// Security: Mint authority is vault_authority PDA
    #[account(
        init,
        payer = payer,
        seeds = [SHARE_MINT_SEED, underlying_mint.key().as_ref()],
        bump,
        mint::decimals = underlying_mint.decimals,
        mint::authority = vault_authority,
    )]
    pub share_mint: Box<Account<'info, Mint>>,

    /// Vault authority PDA - share mint authority, owner of float and escrow
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, underlying_mint.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's underlying token account (the float)
    #[account(
        init,
        payer = payer,
        associated_token::mint = underlying_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    /// Share escrow for the open batch-burn round
    #[account(
        init,
        payer = payer,
        associated_token::mint = share_mint,
        associated_token::authority = vault_authority,
    )]
    pub batch_burn_escrow: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    harvest_fee_receiver: Pubkey,
    burning_fee_receiver: Pubkey,
) -> Result<()> {
    let mut vault = VaultState::new(
        ctx.accounts.auth.key(),
        ctx.accounts.underlying_mint.key(),
        ctx.accounts.share_mint.key(),
        ctx.accounts.underlying_mint.decimals,
        harvest_fee_receiver,
        burning_fee_receiver,
    )?;
    vault.bump = ctx.bumps.vault_state;
    vault.share_bump = ctx.bumps.share_mint;
    vault.authority_bump = ctx.bumps.vault_authority;
    vault.last_harvest_slot = Clock::get()?.slot;

    let base_unit = vault.base_unit;
    ctx.accounts.vault_state.set_inner(vault);

    emit!(VaultInitialized {
        vault: ctx.accounts.vault_state.key(),
        auth: ctx.accounts.auth.key(),
        underlying: ctx.accounts.underlying_mint.key(),
        share_mint: ctx.accounts.share_mint.key(),
        base_unit,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Create a roles-and-capabilities authority owned by the signer
#[derive(Accounts)]
pub struct CreateAuth<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = 8 + VaultAuth::INIT_SPACE,
        seeds = [AUTH_SEED, owner.key().as_ref()],
        bump
    )]
    pub auth: Account<'info, VaultAuth>,

    pub system_program: Program<'info, System>,
}

/// Edit the role and capability tables of an authority
#[derive(Accounts)]
pub struct ManageAuth<'info> {
    /// Authority owner - only they can edit the tables
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [AUTH_SEED, owner.key().as_ref()],
        bump = auth.bump,
        has_one = owner @ VaultError::Unauthorized,
    )]
    pub auth: Account<'info, VaultAuth>,
}

pub fn create_handler(ctx: Context<CreateAuth>) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    ctx.accounts
        .auth
        .set_inner(VaultAuth::new(owner, ctx.bumps.auth));

    emit_updated(&ctx.accounts.auth)
}

pub fn set_user_role_handler(
    ctx: Context<ManageAuth>,
    user: Pubkey,
    role: u8,
    enabled: bool,
) -> Result<()> {
    ctx.accounts.auth.set_user_role(user, role, enabled)?;
    emit_updated(&ctx.accounts.auth)
}

pub fn set_role_capability_handler(
    ctx: Context<ManageAuth>,
    role: u8,
    capability: Capability,
    enabled: bool,
) -> Result<()> {
    ctx.accounts
        .auth
        .set_role_capability(role, capability, enabled)?;
    emit_updated(&ctx.accounts.auth)
}

pub fn set_public_capability_handler(
    ctx: Context<ManageAuth>,
    capability: Capability,
    enabled: bool,
) -> Result<()> {
    ctx.accounts
        .auth
        .set_public_capability(capability, enabled);
    emit_updated(&ctx.accounts.auth)
}

fn emit_updated(auth: &Account<VaultAuth>) -> Result<()> {
    emit!(AuthorityUpdated {
        auth: auth.key(),
        owner: auth.owner,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

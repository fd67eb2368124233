use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Queue shares for redemption in the open batch-burn round
///
/// Shares move into the vault escrow and stay in supply until the round
/// executes. A user holding a receipt from an earlier round must exit it first.
#[derive(Accounts)]
pub struct EnterBatchBurn<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = vault_state.share_mint @ VaultError::InvalidMint)]
    pub share_mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + BatchBurnReceipt::INIT_SPACE,
        seeds = [BATCH_BURN_RECEIPT_SEED, vault_state.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub receipt: Account<'info, BatchBurnReceipt>,

    #[account(
        mut,
        constraint = user_share_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
        constraint = user_share_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_share_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = share_mint,
        associated_token::authority = vault_authority,
    )]
    pub batch_burn_escrow: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<EnterBatchBurn>, shares: u64) -> Result<()> {
    let bump = ctx.bumps.receipt;
    let accounts = ctx.accounts;

    VaultState::acquire(&mut accounts.vault_state)?;
    let result = process(accounts, shares, bump);
    accounts.vault_state.unlock();
    result
}

fn process(accounts: &mut EnterBatchBurn, shares: u64, bump: u8) -> Result<()> {
    let vault_key = accounts.vault_state.key();
    let user = accounts.user.key();

    let receipt = &mut accounts.receipt;
    if receipt.vault == Pubkey::default() {
        receipt.vault = vault_key;
        receipt.owner = user;
        receipt.bump = bump;
    }

    // EFFECTS
    accounts.vault_state.enter_batch_burn(receipt, shares)?;

    // INTERACTIONS
    // fails with the token program's insufficient funds error when the user lacks shares
    token::transfer(
        CpiContext::new(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.user_share_account.to_account_info(),
                to: accounts.batch_burn_escrow.to_account_info(),
                authority: accounts.user.to_account_info(),
            },
        ),
        shares,
    )?;

    emit!(BatchBurnEntered {
        vault: vault_key,
        user,
        round: accounts.receipt.round,
        shares,
        receipt_shares: accounts.receipt.shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

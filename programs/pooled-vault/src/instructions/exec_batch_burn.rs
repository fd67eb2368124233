use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Settle the open batch-burn round
///
/// Burns the escrowed shares, freezes the round's amount per share in a
/// `BatchBurn` record, reserves the payout in the float and routes the
/// burning fee to its receiver. Float must already cover the whole round:
/// strategies are not drained automatically.
#[derive(Accounts)]
pub struct ExecBatchBurn<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = vault_state.auth @ VaultError::Unauthorized)]
    pub auth: Account<'info, VaultAuth>,

    #[account(
        init,
        payer = caller,
        space = 8 + BatchBurn::INIT_SPACE,
        seeds = [
            BATCH_BURN_SEED,
            vault_state.key().as_ref(),
            &vault_state.batch_burn_round.to_le_bytes(),
        ],
        bump
    )]
    pub batch_burn: Account<'info, BatchBurn>,

    #[account(address = vault_state.underlying @ VaultError::InvalidMint)]
    pub underlying_mint: Box<Account<'info, Mint>>,

    #[account(mut, address = vault_state.share_mint @ VaultError::InvalidMint)]
    pub share_mint: Box<Account<'info, Mint>>,

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

    #[account(
        mut,
        associated_token::mint = share_mint,
        associated_token::authority = vault_authority,
    )]
    pub batch_burn_escrow: Box<Account<'info, TokenAccount>>,

    /// Underlying account of the burning fee receiver, required when fees accrue
    #[account(
        mut,
        constraint = burning_fee_account.mint == vault_state.underlying @ VaultError::InvalidMint,
        constraint = burning_fee_account.owner == vault_state.burning_fee_receiver @ VaultError::InvalidOwner,
    )]
    pub burning_fee_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ExecBatchBurn>) -> Result<()> {
    let bump = ctx.bumps.batch_burn;
    let accounts = ctx.accounts;

    VaultState::acquire(&mut accounts.vault_state)?;
    let result = process(accounts, bump);
    accounts.vault_state.unlock();
    result
}

fn process(accounts: &mut ExecBatchBurn, bump: u8) -> Result<()> {
    let vault_key = accounts.vault_state.key();
    let caller = accounts.caller.key();
    authorize(&*accounts.auth, &caller, &vault_key, Capability::ExecBatchBurn)?;

    let now = Clock::get()?.unix_timestamp;

    // EFFECTS
    let batch_burn = &mut accounts.batch_burn;
    batch_burn.vault = vault_key;
    batch_burn.bump = bump;
    let settlement = accounts.vault_state.exec_batch_burn(
        batch_burn,
        accounts.vault_token_account.amount,
        now,
    )?;

    // INTERACTIONS
    let underlying = accounts.vault_state.underlying;
    let authority_bump = accounts.vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, underlying.as_ref(), &[authority_bump]];

    token::burn(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Burn {
                mint: accounts.share_mint.to_account_info(),
                from: accounts.batch_burn_escrow.to_account_info(),
                authority: accounts.vault_authority.to_account_info(),
            },
            &[authority_seeds],
        ),
        settlement.total_shares,
    )?;

    if settlement.fees_accrued > 0 {
        let fee_account = accounts
            .burning_fee_account
            .as_ref()
            .ok_or(VaultError::MissingFeeReceiver)?;
        token::transfer(
            CpiContext::new_with_signer(
                accounts.token_program.to_account_info(),
                Transfer {
                    from: accounts.vault_token_account.to_account_info(),
                    to: fee_account.to_account_info(),
                    authority: accounts.vault_authority.to_account_info(),
                },
                &[authority_seeds],
            ),
            settlement.fees_accrued,
        )?;
    }

    msg!(
        "batch burn round {} executed: {} shares at {} per share",
        settlement.round,
        settlement.total_shares,
        settlement.amount_per_share
    );

    emit!(BatchBurnExecuted {
        vault: vault_key,
        caller,
        round: settlement.round,
        total_shares: settlement.total_shares,
        amount_per_share: settlement.amount_per_share,
        underlying_reserved: settlement.underlying_reserved,
        fees_accrued: settlement.fees_accrued,
        timestamp: now,
    });

    Ok(())
}

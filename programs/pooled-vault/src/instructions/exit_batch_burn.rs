use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Claim the underlying owed by an executed batch-burn round
///
/// The receipt and round accounts are decoded by hand so that a missing
/// receipt or an unexecuted round surface as `NoDeposits` / `RoundNotExecuted`
/// instead of an account deserialization failure.
#[derive(Accounts)]
pub struct ExitBatchBurn<'info> {
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    /// CHECK: receipt PDA, validated by seeds and decoded in the handler
    #[account(
        mut,
        seeds = [BATCH_BURN_RECEIPT_SEED, vault_state.key().as_ref(), user.key().as_ref()],
        bump,
    )]
    pub receipt: UncheckedAccount<'info>,

    /// CHECK: round record of the receipt, address checked in the handler
    pub batch_burn: UncheckedAccount<'info>,

    #[account(address = vault_state.underlying @ VaultError::InvalidMint)]
    pub underlying_mint: Box<Account<'info, Mint>>,

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
        constraint = user_token_account.mint == vault_state.underlying @ VaultError::InvalidMint,
        constraint = user_token_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ExitBatchBurn>) -> Result<()> {
    let accounts = ctx.accounts;

    VaultState::acquire(&mut accounts.vault_state)?;
    let result = process(accounts);
    accounts.vault_state.unlock();
    result
}

fn process(accounts: &mut ExitBatchBurn) -> Result<()> {
    let vault_key = accounts.vault_state.key();
    let user = accounts.user.key();

    let mut receipt = read_account::<BatchBurnReceipt>(&accounts.receipt)?.unwrap_or_default();

    let (expected_batch_burn, _) = Pubkey::find_program_address(
        &[
            BATCH_BURN_SEED,
            vault_key.as_ref(),
            &receipt.round.to_le_bytes(),
        ],
        &crate::ID,
    );
    // a wrong or not yet created round record reads as round 0
    let batch_burn = if accounts.batch_burn.key() == expected_batch_burn {
        read_account::<BatchBurn>(&accounts.batch_burn)?.unwrap_or_default()
    } else {
        BatchBurn::default()
    };

    let round = receipt.round;
    let shares = receipt.shares;

    // EFFECTS
    let payout = accounts
        .vault_state
        .exit_batch_burn(&mut receipt, &batch_burn)?;
    write_account(&accounts.receipt, &receipt)?;

    // INTERACTIONS
    let underlying = accounts.vault_state.underlying;
    let authority_bump = accounts.vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, underlying.as_ref(), &[authority_bump]];
    token::transfer(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.vault_token_account.to_account_info(),
                to: accounts.user_token_account.to_account_info(),
                authority: accounts.vault_authority.to_account_info(),
            },
            &[authority_seeds],
        ),
        payout,
    )?;

    emit!(BatchBurnExited {
        vault: vault_key,
        user,
        round,
        shares,
        underlying_amount: payout,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

/// Decode a program account, `None` when it was never created
fn read_account<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(*info.owner, crate::ID, VaultError::InvalidOwner);

    let data = info.try_borrow_data()?;
    let mut slice: &[u8] = &data;
    T::try_deserialize(&mut slice).map(Some)
}

fn write_account<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data;
    value.try_serialize(&mut writer)
}

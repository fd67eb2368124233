use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Deposit underlying into the vault and mint shares to a recipient
///
/// Security checklist:
/// - caller signs and funds the transfer, recipient only receives shares
/// - per-recipient cumulative deposits tracked in a `UserDeposit` PDA
/// - vault state updated before the token CPIs, under the reentrancy lock
#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

    /// CHECK: any address may receive shares, validated through recipient_share_account
    pub recipient: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = vault_state.auth @ VaultError::Unauthorized)]
    pub auth: Account<'info, VaultAuth>,

    #[account(
        init_if_needed,
        payer = caller,
        space = 8 + UserDeposit::INIT_SPACE,
        seeds = [DEPOSITOR_SEED, vault_state.key().as_ref(), recipient.key().as_ref()],
        bump
    )]
    pub user_deposit: Account<'info, UserDeposit>,

    #[account(mut, address = vault_state.share_mint @ VaultError::InvalidMint)]
    pub share_mint: Box<Account<'info, Mint>>,

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
        constraint = caller_token_account.mint == vault_state.underlying @ VaultError::InvalidMint,
        constraint = caller_token_account.owner == caller.key() @ VaultError::InvalidOwner,
    )]
    pub caller_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = recipient_share_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
        constraint = recipient_share_account.owner == recipient.key() @ VaultError::InvalidOwner,
    )]
    pub recipient_share_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = underlying_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let bump = ctx.bumps.user_deposit;
    let accounts = ctx.accounts;

    VaultState::acquire(&mut accounts.vault_state)?;
    let result = process(accounts, amount, bump);
    accounts.vault_state.unlock();
    result
}

fn process(accounts: &mut Deposit, amount: u64, bump: u8) -> Result<()> {
    let vault_key = accounts.vault_state.key();
    let caller = accounts.caller.key();
    authorize(&*accounts.auth, &caller, &vault_key, Capability::Deposit)?;

    let recipient = accounts.recipient.key();
    let depositor = &mut accounts.user_deposit;
    if depositor.vault == Pubkey::default() {
        depositor.vault = vault_key;
        depositor.user = recipient;
        depositor.bump = bump;
    }

    let now = Clock::get()?.unix_timestamp;
    let vault_balance = accounts.vault_token_account.amount;

    // EFFECTS
    let shares = accounts
        .vault_state
        .deposit(depositor, amount, vault_balance, now)?;

    // INTERACTIONS
    token::transfer(
        CpiContext::new(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.caller_token_account.to_account_info(),
                to: accounts.vault_token_account.to_account_info(),
                authority: accounts.caller.to_account_info(),
            },
        ),
        amount,
    )?;

    let underlying = accounts.vault_state.underlying;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        underlying.as_ref(),
        &[accounts.vault_state.authority_bump],
    ];
    token::mint_to(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            MintTo {
                mint: accounts.share_mint.to_account_info(),
                to: accounts.recipient_share_account.to_account_info(),
                authority: accounts.vault_authority.to_account_info(),
            },
            &[authority_seeds],
        ),
        shares,
    )?;

    emit!(Deposited {
        vault: vault_key,
        caller,
        recipient,
        underlying_amount: amount,
        shares_minted: shares,
        total_shares: accounts.vault_state.total_shares,
        timestamp: now,
    });

    Ok(())
}

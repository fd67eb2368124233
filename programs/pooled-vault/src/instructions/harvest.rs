use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::get_associated_token_address,
    token::{self, Mint, MintTo, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, state::*};

/// Realize profit and loss of a set of trusted strategies
///
/// Strategies are passed through `remaining_accounts` in groups of three:
/// `[strategy_data (writable), strategy_state, strategy_withdraw_account]`.
/// A strategy is valued at its reported position plus whatever it has
/// already returned to the vault's withdraw account.
#[derive(Accounts)]
pub struct Harvest<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.underlying.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = vault_state.auth @ VaultError::Unauthorized)]
    pub auth: Account<'info, VaultAuth>,

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
        associated_token::mint = underlying_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    /// Share account of the harvest fee receiver, required when fees accrue
    #[account(
        mut,
        constraint = harvest_fee_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
        constraint = harvest_fee_account.owner == vault_state.harvest_fee_receiver @ VaultError::InvalidOwner,
    )]
    pub harvest_fee_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler<'info>(ctx: Context<'_, '_, 'info, 'info, Harvest<'info>>) -> Result<()> {
    let remaining_accounts = ctx.remaining_accounts;
    let accounts = ctx.accounts;

    VaultState::acquire(&mut accounts.vault_state)?;
    let result = process(accounts, remaining_accounts);
    accounts.vault_state.unlock();
    result
}

fn process<'info>(
    accounts: &mut Harvest<'info>,
    remaining_accounts: &'info [AccountInfo<'info>],
) -> Result<()> {
    let vault_key = accounts.vault_state.key();
    let caller = accounts.caller.key();
    authorize(&*accounts.auth, &caller, &vault_key, Capability::Harvest)?;

    let underlying = accounts.vault_state.underlying;
    let mut strategies = load_strategies(&vault_key, &underlying, remaining_accounts)?;

    let clock = Clock::get()?;
    let summary = {
        let mut reconciled: Vec<(&mut StrategyData, u64)> = strategies
            .iter_mut()
            .map(|(data, reported)| (&mut **data, *reported))
            .collect();
        accounts.vault_state.harvest(
            &mut reconciled,
            accounts.vault_token_account.amount,
            clock.unix_timestamp,
            clock.slot,
        )?
    };

    // remaining accounts are not persisted by Anchor
    for (data, _) in strategies.iter() {
        data.exit(&crate::ID)?;
    }

    if summary.fee_shares > 0 {
        let fee_account = accounts
            .harvest_fee_account
            .as_ref()
            .ok_or(VaultError::MissingFeeReceiver)?;

        let authority_bump = accounts.vault_state.authority_bump;
        let authority_seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, underlying.as_ref(), &[authority_bump]];
        token::mint_to(
            CpiContext::new_with_signer(
                accounts.token_program.to_account_info(),
                MintTo {
                    mint: accounts.share_mint.to_account_info(),
                    to: fee_account.to_account_info(),
                    authority: accounts.vault_authority.to_account_info(),
                },
                &[authority_seeds],
            ),
            summary.fee_shares,
        )?;
    }

    let vault = &accounts.vault_state;
    msg!(
        "harvest: profit {} loss {} fee shares {} locked {}",
        summary.total_profit,
        summary.total_loss,
        summary.fee_shares,
        summary.max_locked_profit
    );

    emit!(Harvested {
        vault: vault_key,
        caller,
        strategies: strategies.iter().map(|(data, _)| data.strategy).collect(),
        total_profit: summary.total_profit,
        total_loss: summary.total_loss,
        fees_accrued: summary.fees_accrued,
        fee_shares: summary.fee_shares,
        max_locked_profit: summary.max_locked_profit,
        total_strategy_holdings: vault.total_strategy_holdings,
        exchange_rate: summary.exchange_rate,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Decode `[strategy_data, strategy_state, strategy_withdraw_account]` groups
/// and value each strategy
fn load_strategies<'info>(
    vault_key: &Pubkey,
    underlying: &Pubkey,
    remaining_accounts: &'info [AccountInfo<'info>],
) -> Result<Vec<(Account<'info, StrategyData>, u64)>> {
    require!(
        remaining_accounts.len() % 3 == 0,
        VaultError::StrategyAccountsMismatch
    );

    let mut strategies: Vec<(Account<'info, StrategyData>, u64)> =
        Vec::with_capacity(remaining_accounts.len() / 3);
    for group in remaining_accounts.chunks(3) {
        let (data_info, state_info, withdraw_info) = (&group[0], &group[1], &group[2]);
        require!(data_info.is_writable, VaultError::StrategyAccountsMismatch);

        let data = Account::<StrategyData>::try_from(data_info)?;
        require_keys_eq!(data.vault, *vault_key, VaultError::StrategyAccountsMismatch);
        require_keys_eq!(
            data.strategy,
            state_info.key(),
            VaultError::StrategyAccountsMismatch
        );
        require_keys_eq!(
            *state_info.owner,
            data.strategy_program,
            VaultError::InvalidStrategyState
        );
        require!(
            strategies.iter().all(|(seen, _)| seen.key() != data.key()),
            VaultError::StrategyAccountsMismatch
        );

        // only the canonical withdraw account counts towards the strategy value
        let withdraw_authority = Pubkey::create_program_address(
            &[
                STRATEGY_WITHDRAW_SEED,
                vault_key.as_ref(),
                data.strategy.as_ref(),
                &[data.withdraw_bump],
            ],
            &crate::ID,
        )
        .map_err(|_| error!(VaultError::StrategyAccountsMismatch))?;
        require_keys_eq!(
            withdraw_info.key(),
            get_associated_token_address(&withdraw_authority, underlying),
            VaultError::StrategyAccountsMismatch
        );
        // not created until the strategy first returns funds
        let withdraw_balance = if withdraw_info.data_is_empty() {
            0
        } else {
            Account::<TokenAccount>::try_from(withdraw_info)?.amount
        };

        let reported = CommonStrategyState::from_account_info(state_info)?
            .reported_value(withdraw_balance)?;
        strategies.push((data, reported));
    }

    Ok(strategies)
}

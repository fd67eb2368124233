// Pooled Vault - pooled-custody yield vault on Solana
// Users deposit one underlying token for shares; float is deployed into trusted
// strategies, profit is harvested into a linearly unlocking reserve and exits
// are settled in batch-burn rounds at a single per-round rate.

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod util;

use instructions::*;
use state::Capability;

declare_id!("PVau1tBatchBurn1111111111111111111111111111");

#[program]
pub mod pooled_vault {
    use super::*;

    /// Initialize a new vault for a given underlying token
    ///
    /// Security considerations:
    /// - Permissionless and one vault per mint: whoever initializes first picks the authority
    /// - Vault starts paused with both deposit limits at 0 (deposits disabled)
    /// - Share mint authority, float and batch-burn escrow all belong to the vault authority PDA
    pub fn initialize(
        ctx: Context<Initialize>,
        harvest_fee_receiver: Pubkey,
        burning_fee_receiver: Pubkey,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, harvest_fee_receiver, burning_fee_receiver)
    }

    // ---------------------------------------------------------------------
    // Authority management
    // ---------------------------------------------------------------------

    pub fn create_auth(ctx: Context<CreateAuth>) -> Result<()> {
        instructions::manage_auth::create_handler(ctx)
    }

    pub fn set_user_role(
        ctx: Context<ManageAuth>,
        user: Pubkey,
        role: u8,
        enabled: bool,
    ) -> Result<()> {
        instructions::manage_auth::set_user_role_handler(ctx, user, role, enabled)
    }

    pub fn set_role_capability(
        ctx: Context<ManageAuth>,
        role: u8,
        capability: Capability,
        enabled: bool,
    ) -> Result<()> {
        instructions::manage_auth::set_role_capability_handler(ctx, role, capability, enabled)
    }

    pub fn set_public_capability(
        ctx: Context<ManageAuth>,
        capability: Capability,
        enabled: bool,
    ) -> Result<()> {
        instructions::manage_auth::set_public_capability_handler(ctx, capability, enabled)
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    pub fn trigger_pause(ctx: Context<Configure>) -> Result<()> {
        instructions::configure::trigger_pause_handler(ctx)
    }

    /// Both limits must be set before deposits are accepted
    pub fn set_deposit_limits(
        ctx: Context<Configure>,
        user_limit: u64,
        vault_limit: u64,
    ) -> Result<()> {
        instructions::configure::set_deposit_limits_handler(ctx, user_limit, vault_limit)
    }

    /// `new_auth` must be an initialized authority account
    pub fn set_auth(ctx: Context<SetAuth>) -> Result<()> {
        instructions::configure::set_auth_handler(ctx)
    }

    pub fn set_blocks_per_year(ctx: Context<Configure>, blocks_per_year: u64) -> Result<()> {
        instructions::configure::set_blocks_per_year_handler(ctx, blocks_per_year)
    }

    pub fn set_harvest_fee_percent(ctx: Context<Configure>, percent: u64) -> Result<()> {
        instructions::configure::set_harvest_fee_percent_handler(ctx, percent)
    }

    pub fn set_burning_fee_percent(ctx: Context<Configure>, percent: u64) -> Result<()> {
        instructions::configure::set_burning_fee_percent_handler(ctx, percent)
    }

    pub fn set_harvest_fee_receiver(ctx: Context<Configure>, receiver: Pubkey) -> Result<()> {
        instructions::configure::set_harvest_fee_receiver_handler(ctx, receiver)
    }

    pub fn set_burning_fee_receiver(ctx: Context<Configure>, receiver: Pubkey) -> Result<()> {
        instructions::configure::set_burning_fee_receiver_handler(ctx, receiver)
    }

    pub fn set_harvest_window(ctx: Context<Configure>, window: u64) -> Result<()> {
        instructions::configure::set_harvest_window_handler(ctx, window)
    }

    /// Applied immediately when no delay is active, otherwise staged for the next harvest
    pub fn set_harvest_delay(ctx: Context<Configure>, delay: u64) -> Result<()> {
        instructions::configure::set_harvest_delay_handler(ctx, delay)
    }

    pub fn set_withdrawal_queue(ctx: Context<Configure>, queue: Vec<Pubkey>) -> Result<()> {
        instructions::configure::set_withdrawal_queue_handler(ctx, queue)
    }

    // ---------------------------------------------------------------------
    // Deposits and strategy allocation
    // ---------------------------------------------------------------------

    /// Deposit underlying and mint shares to `recipient`
    ///
    /// Security considerations:
    /// - Rejected while paused or beyond the per-user / per-vault limits
    /// - Shares are computed at the current exchange rate, rounded down
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Trust a strategy whose underlying matches the vault's. Idempotent.
    pub fn trust_strategy(ctx: Context<TrustStrategy>) -> Result<()> {
        instructions::trust_strategy::trust_handler(ctx)
    }

    pub fn distrust_strategy(ctx: Context<DistrustStrategy>) -> Result<()> {
        instructions::trust_strategy::distrust_handler(ctx)
    }

    pub fn deposit_into_strategy(ctx: Context<DepositIntoStrategy>, amount: u64) -> Result<()> {
        instructions::deposit_into_strategy::handler(ctx, amount)
    }

    pub fn withdraw_from_strategy(ctx: Context<WithdrawFromStrategy>, amount: u64) -> Result<()> {
        instructions::withdraw_from_strategy::handler(ctx, amount)
    }

    /// Reconcile strategy balances with their reported value
    ///
    /// Security considerations:
    /// - Losses are reflected in the exchange rate immediately
    /// - Profits unlock linearly over the harvest delay
    /// - Only allowed inside the current harvest window or once the delay has elapsed
    /// - Each strategy is valued with the vault's withdraw account included
    pub fn harvest<'info>(ctx: Context<'_, '_, 'info, 'info, Harvest<'info>>) -> Result<()> {
        instructions::harvest::handler(ctx)
    }

    // ---------------------------------------------------------------------
    // Batch burn
    // ---------------------------------------------------------------------

    pub fn enter_batch_burn(ctx: Context<EnterBatchBurn>, shares: u64) -> Result<()> {
        instructions::enter_batch_burn::handler(ctx, shares)
    }

    /// Settle the open round at the current exchange rate, net of the burning fee
    pub fn exec_batch_burn(ctx: Context<ExecBatchBurn>) -> Result<()> {
        instructions::exec_batch_burn::handler(ctx)
    }

    pub fn exit_batch_burn(ctx: Context<ExitBatchBurn>) -> Result<()> {
        instructions::exit_batch_burn::handler(ctx)
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    pub fn exchange_rate(ctx: Context<VaultView>) -> Result<u64> {
        instructions::views::exchange_rate_handler(ctx)
    }

    pub fn total_underlying(ctx: Context<VaultView>) -> Result<u64> {
        instructions::views::total_underlying_handler(ctx)
    }

    pub fn total_float(ctx: Context<VaultView>) -> Result<u64> {
        instructions::views::total_float_handler(ctx)
    }

    pub fn locked_profit(ctx: Context<VaultView>) -> Result<u64> {
        instructions::views::locked_profit_handler(ctx)
    }

    pub fn estimated_return(ctx: Context<VaultView>) -> Result<u64> {
        instructions::views::estimated_return_handler(ctx)
    }

    pub fn calculate_shares(ctx: Context<VaultView>, underlying_amount: u64) -> Result<u64> {
        instructions::views::calculate_shares_handler(ctx, underlying_amount)
    }

    pub fn calculate_underlying(ctx: Context<VaultView>, share_amount: u64) -> Result<u64> {
        instructions::views::calculate_underlying_handler(ctx, share_amount)
    }
}

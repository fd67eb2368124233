use anchor_lang::prelude::*;

use super::{BatchBurn, BatchBurnReceipt, StrategyAdapter, StrategyData, UserDeposit};
use crate::{
    constants::*,
    errors::VaultError,
    util::{base_unit, mul_div},
};

/// Global vault state: share accounting, strategy holdings, harvest
/// schedule and batch-burn queue
///
/// Security considerations:
/// - `total_shares` mirrors the share mint supply and is the only supply read by share math
/// - float is derived from the vault token account balance minus `batch_burn_balance`,
///   so underlying owed to executed batch burns is never counted twice
/// - `locked` guards every fund-moving instruction against re-entry
#[account]
#[derive(InitSpace)]
pub struct VaultState {
    /// Roles-and-capabilities authority consulted by privileged instructions
    pub auth: Pubkey,

    /// Mint of the underlying asset token
    pub underlying: Pubkey,

    /// Mint of the vault share token
    pub share_mint: Pubkey,

    /// 10^decimals of the underlying mint, fixed-point unit of every rate and percent
    pub base_unit: u64,

    /// Total shares issued, including shares escrowed for the open batch burn
    pub total_shares: u64,

    /// Underlying the vault believes is deployed across strategies
    pub total_strategy_holdings: u64,

    /// Underlying reserved for executed batch burns that have not been claimed
    pub batch_burn_balance: u64,

    /// Maximum cumulative deposit per recipient (0 disables deposits)
    pub user_deposit_limit: u64,

    /// Maximum total underlying after a deposit (0 disables deposits)
    pub vault_deposit_limit: u64,

    pub paused: bool,

    /// Percent of harvested profit taken as fee, scaled by `base_unit`
    pub harvest_fee_percent: u64,

    /// Percent of batch-burn proceeds taken as fee, scaled by `base_unit`
    pub burning_fee_percent: u64,

    pub harvest_fee_receiver: Pubkey,

    pub burning_fee_receiver: Pubkey,

    /// Exchange rate just before the most recent harvest
    pub last_harvest_exchange_rate: u64,

    /// Slot of the most recent harvest (initialization before the first one)
    pub last_harvest_slot: u64,

    /// Slots between the two most recent harvests, the APR period
    pub last_harvest_interval_in_blocks: u64,

    pub last_harvest_window_start: i64,

    pub last_harvest_window_start_slot: u64,

    /// Timestamp of the most recent harvest, locked profit decays from here
    pub last_harvest: i64,

    /// Seconds between harvest windows, also the profit unlock period
    pub harvest_delay: u64,

    /// Delay that becomes active at the next harvest
    pub next_harvest_delay: u64,

    /// Seconds after a window start during which further harvests are allowed
    pub harvest_window: u64,

    pub max_locked_profit: u64,

    pub blocks_per_year: u64,

    /// Open batch-burn round, starts at 1
    pub batch_burn_round: u64,

    /// Shares queued in the open round
    pub batch_burn_shares: u64,

    #[max_len(MAX_STRATEGIES)]
    pub withdrawal_queue: Vec<Pubkey>,

    /// Reentrancy guard
    pub locked: bool,

    pub bump: u8,

    pub share_bump: u8,

    pub authority_bump: u8,
}

/// Outcome of a harvest, used for events
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    pub total_profit: u64,
    pub total_loss: u64,
    pub fees_accrued: u64,
    pub fee_shares: u64,
    pub max_locked_profit: u64,
    /// Exchange rate once the harvest is applied
    pub exchange_rate: u64,
}

/// Outcome of a batch-burn execution
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchBurnSettlement {
    pub round: u64,
    pub total_shares: u64,
    pub amount_per_share: u64,
    pub underlying_reserved: u64,
    pub fees_accrued: u64,
}

impl VaultState {
    /// Fresh vault: paused, deposits disabled, round 1, exchange rate 1.0
    pub fn new(
        auth: Pubkey,
        underlying: Pubkey,
        share_mint: Pubkey,
        decimals: u8,
        harvest_fee_receiver: Pubkey,
        burning_fee_receiver: Pubkey,
    ) -> Result<Self> {
        Ok(Self {
            auth,
            underlying,
            share_mint,
            base_unit: base_unit(decimals)?,
            total_shares: 0,
            total_strategy_holdings: 0,
            batch_burn_balance: 0,
            user_deposit_limit: 0,
            vault_deposit_limit: 0,
            paused: true,
            harvest_fee_percent: 0,
            burning_fee_percent: 0,
            harvest_fee_receiver,
            burning_fee_receiver,
            last_harvest_exchange_rate: base_unit(decimals)?,
            last_harvest_slot: 0,
            last_harvest_interval_in_blocks: 0,
            last_harvest_window_start: 0,
            last_harvest_window_start_slot: 0,
            last_harvest: 0,
            harvest_delay: 0,
            next_harvest_delay: 0,
            harvest_window: 0,
            max_locked_profit: 0,
            blocks_per_year: 0,
            batch_burn_round: 1,
            batch_burn_shares: 0,
            withdrawal_queue: Vec::new(),
            locked: false,
            bump: 0,
            share_bump: 0,
            authority_bump: 0,
        })
    }

    pub fn lock(&mut self) -> Result<()> {
        require!(!self.locked, VaultError::Reentrancy);
        self.locked = true;
        Ok(())
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Take the lock and write it to the account data right away.
    /// Anchor only serializes accounts after the handler returns, so without
    /// this a nested invocation would still read `locked == false`.
    pub fn acquire(vault_state: &mut Account<VaultState>) -> Result<()> {
        vault_state.lock()?;
        vault_state.exit(&crate::ID)
    }

    // -------------------------------------------------------------------
    // Exchange rate
    // -------------------------------------------------------------------

    /// Underlying held by the vault and not owed to executed batch burns
    pub fn total_float(&self, vault_balance: u64) -> u64 {
        vault_balance.saturating_sub(self.batch_burn_balance)
    }

    /// Harvested profit not yet released into the exchange rate.
    /// Decays linearly to zero over `harvest_delay` seconds after the last harvest.
    pub fn locked_profit(&self, now: i64) -> Result<u64> {
        if self.harvest_delay == 0 || self.max_locked_profit == 0 {
            return Ok(0);
        }

        let elapsed = now.saturating_sub(self.last_harvest).max(0) as u64;
        if elapsed >= self.harvest_delay {
            return Ok(0);
        }

        let unlocked = mul_div(self.max_locked_profit, elapsed, self.harvest_delay)?;
        Ok(self.max_locked_profit - unlocked)
    }

    /// float + strategy holdings - locked profit
    pub fn total_underlying(&self, vault_balance: u64, now: i64) -> Result<u64> {
        let gross = self
            .total_float(vault_balance)
            .checked_add(self.total_strategy_holdings)
            .ok_or(VaultError::MathOverflow)?;
        Ok(gross.saturating_sub(self.locked_profit(now)?))
    }

    /// Underlying per share, scaled by `base_unit`. 1.0 while no shares exist.
    pub fn exchange_rate(&self, vault_balance: u64, now: i64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(self.base_unit);
        }
        mul_div(
            self.total_underlying(vault_balance, now)?,
            self.base_unit,
            self.total_shares,
        )
    }

    /// Shares worth `underlying_amount`, rounded down
    pub fn calculate_shares(&self, underlying_amount: u64, vault_balance: u64, now: i64) -> Result<u64> {
        let rate = self.exchange_rate(vault_balance, now)?;
        mul_div(underlying_amount, self.base_unit, rate)
    }

    /// Underlying worth `share_amount`, rounded down
    pub fn calculate_underlying(&self, share_amount: u64, vault_balance: u64, now: i64) -> Result<u64> {
        let rate = self.exchange_rate(vault_balance, now)?;
        mul_div(share_amount, rate, self.base_unit)
    }

    /// Annualized growth of the exchange rate over the latest harvest interval:
    /// `(rate_now / rate_before_last_harvest - 1) * blocks_per_year / interval`,
    /// as a fraction scaled by `base_unit` (0 when unknown or negative).
    pub fn estimated_return(&self, vault_balance: u64, now: i64) -> Result<u64> {
        let last_rate = self.last_harvest_exchange_rate;
        let blocks = self.last_harvest_interval_in_blocks;
        if self.blocks_per_year == 0 || last_rate == 0 || blocks == 0 {
            return Ok(0);
        }

        let rate = self.exchange_rate(vault_balance, now)?;
        if rate <= last_rate {
            return Ok(0);
        }

        let growth = mul_div(rate - last_rate, self.base_unit, last_rate)?;
        mul_div(growth, self.blocks_per_year, blocks)
    }

    // -------------------------------------------------------------------
    // Deposits
    // -------------------------------------------------------------------

    /// Validate a deposit of `amount` for `depositor` and account the minted shares.
    /// `vault_balance` is the vault token account balance before the transfer.
    pub fn deposit(
        &mut self,
        depositor: &mut UserDeposit,
        amount: u64,
        vault_balance: u64,
        now: i64,
    ) -> Result<u64> {
        require!(!self.paused, VaultError::Paused);
        require!(amount > 0, VaultError::AmountCannotBeZero);

        let user_total = depositor
            .total_deposited
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        require!(
            user_total <= self.user_deposit_limit,
            VaultError::UserDepositLimitsReached
        );

        let vault_total = self
            .total_underlying(vault_balance, now)?
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        require!(
            vault_total <= self.vault_deposit_limit,
            VaultError::VaultDepositLimitsReached
        );

        let shares = self.calculate_shares(amount, vault_balance, now)?;
        require!(shares > 0, VaultError::SharesCannotBeZero);

        depositor.total_deposited = user_total;
        self.total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;

        Ok(shares)
    }

    // -------------------------------------------------------------------
    // Strategy allocation
    // -------------------------------------------------------------------

    pub fn trust_strategy(
        &self,
        data: &mut StrategyData,
        strategy: &impl StrategyAdapter,
    ) -> Result<()> {
        require_keys_eq!(
            strategy.underlying(),
            self.underlying,
            VaultError::WrongUnderlying
        );
        data.trusted = true;
        Ok(())
    }

    pub fn distrust_strategy(&self, data: &mut StrategyData) {
        data.trusted = false;
    }

    /// Move `amount` of float into a trusted strategy
    pub fn deposit_into_strategy(
        &mut self,
        data: &mut StrategyData,
        strategy: &impl StrategyAdapter,
        amount: u64,
        vault_balance: u64,
    ) -> Result<()> {
        require!(!self.paused, VaultError::Paused);
        require!(data.trusted, VaultError::UntrustedStrategy);
        require!(amount > 0, VaultError::AmountCannotBeZero);
        require!(
            self.total_float(vault_balance) >= amount,
            VaultError::NotEnoughUnderlying
        );
        require!(strategy.accepts_deposits(), VaultError::MintFailed);

        data.balance = data
            .balance
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        self.total_strategy_holdings = self
            .total_strategy_holdings
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    /// Pull `amount` back from a trusted strategy. `redeemable` is what the
    /// strategy has made available to the vault.
    pub fn withdraw_from_strategy(
        &mut self,
        data: &mut StrategyData,
        amount: u64,
        redeemable: u64,
    ) -> Result<()> {
        require!(data.trusted, VaultError::UntrustedStrategy);
        require!(amount > 0, VaultError::AmountCannotBeZero);
        require!(redeemable >= amount, VaultError::RedeemFailed);

        data.balance = data
            .balance
            .checked_sub(amount)
            .ok_or(VaultError::StrategyBalanceTooLow)?;
        self.total_strategy_holdings = self
            .total_strategy_holdings
            .checked_sub(amount)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    pub fn set_withdrawal_queue(&mut self, queue: Vec<Pubkey>) -> Result<()> {
        require!(queue.len() <= MAX_STRATEGIES, VaultError::QueueTooBig);
        self.withdrawal_queue = queue;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Harvest
    // -------------------------------------------------------------------

    /// Reconcile each strategy's accounting balance with its reported value.
    ///
    /// Losses hit `total_strategy_holdings` immediately. Net profit minus the
    /// harvest fee is added to the locked profit and released over `harvest_delay`.
    /// Fee shares are priced at the pre-harvest exchange rate, so minting them
    /// leaves the rate unchanged.
    pub fn harvest(
        &mut self,
        strategies: &mut [(&mut StrategyData, u64)],
        vault_balance: u64,
        now: i64,
        slot: u64,
    ) -> Result<HarvestSummary> {
        let window_start = self.last_harvest_window_start;
        let next_window = window_start
            .checked_add(self.harvest_delay as i64)
            .ok_or(VaultError::MathOverflow)?;
        let starts_new_window = window_start == 0 || now >= next_window;
        if !starts_new_window {
            let window_end = window_start
                .checked_add(self.harvest_window as i64)
                .ok_or(VaultError::MathOverflow)?;
            require!(now <= window_end, VaultError::BadHarvestTime);
        }

        require!(
            strategies.iter().all(|(data, _)| data.trusted),
            VaultError::UntrustedStrategy
        );

        let rate_before = self.exchange_rate(vault_balance, now)?;
        let still_locked = self.locked_profit(now)?;

        let mut total_profit = 0u64;
        let mut total_loss = 0u64;
        let mut holdings = self.total_strategy_holdings;
        for (data, reported) in strategies.iter_mut() {
            let reported = *reported;
            if reported >= data.balance {
                total_profit = total_profit
                    .checked_add(reported - data.balance)
                    .ok_or(VaultError::MathOverflow)?;
            } else {
                total_loss = total_loss
                    .checked_add(data.balance - reported)
                    .ok_or(VaultError::MathOverflow)?;
            }
            holdings = holdings
                .checked_sub(data.balance)
                .and_then(|h| h.checked_add(reported))
                .ok_or(VaultError::MathOverflow)?;
            data.balance = reported;
        }

        let net_profit = total_profit.saturating_sub(total_loss);
        let fees_accrued = if self.harvest_fee_receiver != Pubkey::default() {
            mul_div(net_profit, self.harvest_fee_percent, self.base_unit)?
        } else {
            0
        };
        let fee_shares = if fees_accrued > 0 {
            mul_div(fees_accrued, self.base_unit, rate_before)?
        } else {
            0
        };

        self.total_shares = self
            .total_shares
            .checked_add(fee_shares)
            .ok_or(VaultError::MathOverflow)?;
        self.max_locked_profit = still_locked
            .checked_add(net_profit - fees_accrued)
            .ok_or(VaultError::MathOverflow)?;
        self.total_strategy_holdings = holdings;
        self.last_harvest = now;
        self.last_harvest_exchange_rate = rate_before;
        self.last_harvest_interval_in_blocks = slot.saturating_sub(self.last_harvest_slot);
        self.last_harvest_slot = slot;

        if starts_new_window {
            self.last_harvest_window_start = now;
            self.last_harvest_window_start_slot = slot;
        }

        if self.next_harvest_delay != 0 {
            self.harvest_delay = self.next_harvest_delay;
            self.next_harvest_delay = 0;
        }

        Ok(HarvestSummary {
            total_profit,
            total_loss,
            fees_accrued,
            fee_shares,
            max_locked_profit: self.max_locked_profit,
            exchange_rate: self.exchange_rate(vault_balance, now)?,
        })
    }

    // -------------------------------------------------------------------
    // Batch burn
    // -------------------------------------------------------------------

    /// Queue `shares` for the open round. The shares stay in supply until execution.
    pub fn enter_batch_burn(&mut self, receipt: &mut BatchBurnReceipt, shares: u64) -> Result<()> {
        require!(shares > 0, VaultError::AmountCannotBeZero);
        if receipt.has_deposits() {
            require_eq!(
                receipt.round,
                self.batch_burn_round,
                VaultError::DifferentRounds
            );
        }

        receipt.round = self.batch_burn_round;
        receipt.shares = receipt
            .shares
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;
        self.batch_burn_shares = self
            .batch_burn_shares
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    /// Settle the open round at the current exchange rate, net of the burning fee.
    ///
    /// The payout for the whole round plus the fee must already be in float.
    /// On success the queued shares leave supply, the payout is reserved in
    /// `batch_burn_balance` and the next round opens.
    pub fn exec_batch_burn(
        &mut self,
        batch_burn: &mut BatchBurn,
        vault_balance: u64,
        now: i64,
    ) -> Result<BatchBurnSettlement> {
        let cooldown_end = self
            .last_harvest
            .checked_add(self.harvest_delay as i64)
            .ok_or(VaultError::MathOverflow)?;
        require!(now >= cooldown_end, VaultError::LatestHarvestNotExpired);

        let total_shares = self.batch_burn_shares;
        require!(total_shares > 0, VaultError::TotalSharesCannotBeZero);

        let rate = self.exchange_rate(vault_balance, now)?;
        let amount_per_share = if self.burning_fee_receiver != Pubkey::default() {
            let fee_per_share = mul_div(rate, self.burning_fee_percent, self.base_unit)?;
            rate - fee_per_share
        } else {
            rate
        };

        let gross = mul_div(total_shares, rate, self.base_unit)?;
        let underlying_reserved = mul_div(total_shares, amount_per_share, self.base_unit)?;
        let fees_accrued = gross - underlying_reserved;

        require!(
            self.total_float(vault_balance) >= gross,
            VaultError::NotEnoughUnderlying
        );

        self.batch_burn_balance = self
            .batch_burn_balance
            .checked_add(underlying_reserved)
            .ok_or(VaultError::MathOverflow)?;
        self.total_shares = self
            .total_shares
            .checked_sub(total_shares)
            .ok_or(VaultError::MathOverflow)?;
        self.batch_burn_shares = 0;

        let round = self.batch_burn_round;
        batch_burn.round = round;
        batch_burn.total_shares = total_shares;
        batch_burn.amount_per_share = amount_per_share;

        self.batch_burn_round = round.checked_add(1).ok_or(VaultError::MathOverflow)?;

        Ok(BatchBurnSettlement {
            round,
            total_shares,
            amount_per_share,
            underlying_reserved,
            fees_accrued,
        })
    }

    /// Claim the proceeds of an executed round and clear the receipt
    pub fn exit_batch_burn(
        &mut self,
        receipt: &mut BatchBurnReceipt,
        batch_burn: &BatchBurn,
    ) -> Result<u64> {
        require!(receipt.has_deposits(), VaultError::NoDeposits);
        require!(
            receipt.round < self.batch_burn_round,
            VaultError::RoundNotExecuted
        );
        require_eq!(batch_burn.round, receipt.round, VaultError::DifferentRounds);

        let payout = mul_div(receipt.shares, batch_burn.amount_per_share, self.base_unit)?;
        self.batch_burn_balance = self
            .batch_burn_balance
            .checked_sub(payout)
            .ok_or(VaultError::MathOverflow)?;
        receipt.clear();

        Ok(payout)
    }

    // -------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------

    pub fn trigger_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn set_harvest_fee_percent(&mut self, percent: u64) -> Result<()> {
        require!(percent <= self.base_unit, VaultError::FeeTooHigh);
        self.harvest_fee_percent = percent;
        Ok(())
    }

    pub fn set_burning_fee_percent(&mut self, percent: u64) -> Result<()> {
        require!(percent <= self.base_unit, VaultError::FeeTooHigh);
        self.burning_fee_percent = percent;
        Ok(())
    }

    /// The first delay applies immediately; later changes wait for the next harvest
    pub fn set_harvest_delay(&mut self, delay: u64) -> Result<()> {
        require!(delay != 0, VaultError::DelayCannotBeZero);
        require!(delay <= MAX_HARVEST_DELAY, VaultError::DelayTooLong);

        if self.harvest_delay == 0 {
            self.harvest_delay = delay;
        } else {
            self.next_harvest_delay = delay;
        }
        Ok(())
    }

    pub fn set_harvest_window(&mut self, window: u64) -> Result<()> {
        require!(window <= self.harvest_delay, VaultError::WindowTooLong);
        self.harvest_window = window;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u64 = 1_000_000_000;

    fn mock_vault(total_shares: u64, total_strategy_holdings: u64) -> VaultState {
        let mut vault = VaultState::new(
            Pubkey::default(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            9,
            Pubkey::default(),
            Pubkey::default(),
        )
        .unwrap();
        vault.total_shares = total_shares;
        vault.total_strategy_holdings = total_strategy_holdings;
        vault
    }

    #[test]
    fn test_initial_state() {
        let vault = mock_vault(0, 0);
        assert!(vault.paused);
        assert_eq!(vault.batch_burn_round, 1);
        assert_eq!(vault.base_unit, UNIT);
        assert_eq!(vault.exchange_rate(0, 0).unwrap(), UNIT);
        assert_eq!(vault.last_harvest_exchange_rate, UNIT);
        assert_eq!(vault.user_deposit_limit, 0);
        assert_eq!(vault.vault_deposit_limit, 0);
        assert!(vault.withdrawal_queue.is_empty());
    }

    #[test]
    fn test_exchange_rate_with_profit() {
        // 1000 shares backed by 500 float + 1500 in strategies
        let vault = mock_vault(1000, 1500);
        assert_eq!(vault.exchange_rate(500, 0).unwrap(), 2 * UNIT);
        assert_eq!(vault.calculate_shares(500, 500, 0).unwrap(), 250);
        assert_eq!(vault.calculate_underlying(500, 500, 0).unwrap(), 1000);
    }

    #[test]
    fn test_float_excludes_batch_burn_balance() {
        let mut vault = mock_vault(0, 0);
        vault.batch_burn_balance = 300;
        assert_eq!(vault.total_float(1000), 700);
        assert_eq!(vault.total_float(100), 0);
    }

    #[test]
    fn test_locked_profit_decays_linearly() {
        let mut vault = mock_vault(1000, 1000);
        vault.harvest_delay = 100;
        vault.max_locked_profit = 1000;
        vault.last_harvest = 1_000;

        assert_eq!(vault.locked_profit(1_000).unwrap(), 1000);
        assert_eq!(vault.locked_profit(1_025).unwrap(), 750);
        assert_eq!(vault.locked_profit(1_050).unwrap(), 500);
        assert_eq!(vault.locked_profit(1_100).unwrap(), 0);
        assert_eq!(vault.locked_profit(5_000).unwrap(), 0);
    }

    #[test]
    fn test_locked_profit_zero_without_delay() {
        let mut vault = mock_vault(1000, 1000);
        vault.max_locked_profit = 1000;
        vault.last_harvest = 1_000;
        assert_eq!(vault.locked_profit(1_000).unwrap(), 0);
    }

    #[test]
    fn test_lock_rejects_reentry() {
        let mut vault = mock_vault(0, 0);
        vault.lock().unwrap();
        assert!(vault.lock().is_err());
        vault.unlock();
        assert!(vault.lock().is_ok());
    }

    #[test]
    fn test_lock_survives_serialization() {
        // a nested invocation decodes the vault from account data
        let mut vault = mock_vault(0, 0);
        vault.lock().unwrap();

        let mut data = Vec::new();
        vault.try_serialize(&mut data).unwrap();

        let mut nested = VaultState::try_deserialize(&mut data.as_slice()).unwrap();
        assert!(nested.locked);
        assert_eq!(
            nested.lock().unwrap_err(),
            anchor_lang::error::Error::from(VaultError::Reentrancy)
        );
    }

    #[test]
    fn test_set_harvest_delay_stages_changes() {
        let mut vault = mock_vault(0, 0);
        vault.set_harvest_delay(1000).unwrap();
        assert_eq!(vault.harvest_delay, 1000);

        vault.set_harvest_delay(2000).unwrap();
        assert_eq!(vault.harvest_delay, 1000);
        assert_eq!(vault.next_harvest_delay, 2000);
    }

    #[test]
    fn test_estimated_return() {
        let mut vault = mock_vault(3000, 3150);
        vault.blocks_per_year = 365;
        vault.last_harvest_exchange_rate = UNIT;
        vault.last_harvest_interval_in_blocks = 73;

        // 5% growth over 73 blocks -> 5% * 365 / 73 = 25%
        let apr = vault.estimated_return(0, 0).unwrap();
        assert_eq!(apr, UNIT / 4);

        // no harvest interval yet
        vault.last_harvest_interval_in_blocks = 0;
        assert_eq!(vault.estimated_return(0, 0).unwrap(), 0);
    }

    #[test]
    fn test_estimated_return_right_after_harvest() {
        let mut vault = mock_vault(3000, 3000);
        vault.blocks_per_year = 365;
        vault.last_harvest_slot = 100;
        let mut data = StrategyData {
            trusted: true,
            balance: 3000,
            ..Default::default()
        };

        // 150 of yield, harvested 73 slots after the previous one
        vault.harvest(&mut [(&mut data, 3150)], 0, 1_000, 173).unwrap();

        assert_eq!(vault.last_harvest_exchange_rate, UNIT);
        assert_eq!(vault.last_harvest_interval_in_blocks, 73);
        assert_eq!(vault.last_harvest_slot, 173);
        assert_eq!(vault.exchange_rate(0, 1_000).unwrap(), 1_050_000_000);
        assert_eq!(vault.estimated_return(0, 1_000).unwrap(), UNIT / 4);
    }
}

use anchor_lang::prelude::*;

use crate::state::Capability;

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub auth: Pubkey,
    pub underlying: Pubkey,
    pub share_mint: Pubkey,
    pub base_unit: u64,
    pub timestamp: i64,
}

/// Event emitted when underlying is deposited for shares
#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub recipient: Pubkey,
    pub underlying_amount: u64,
    pub shares_minted: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when a strategy is trusted or distrusted
#[event]
pub struct StrategyTrustUpdated {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub trusted: bool,
    pub timestamp: i64,
}

/// Event emitted when float is deployed into a strategy
#[event]
pub struct StrategyDeposit {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub strategy: Pubkey,
    pub amount: u64,
    pub strategy_balance: u64,
    pub total_strategy_holdings: u64,
    pub timestamp: i64,
}

/// Event emitted when underlying is pulled back from a strategy
#[event]
pub struct StrategyWithdrawal {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub strategy: Pubkey,
    pub amount: u64,
    pub strategy_balance: u64,
    pub total_strategy_holdings: u64,
    pub timestamp: i64,
}

/// Event emitted after strategies are harvested
#[event]
pub struct Harvested {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub strategies: Vec<Pubkey>,
    pub total_profit: u64,
    pub total_loss: u64,
    pub fees_accrued: u64,
    pub fee_shares: u64,
    pub max_locked_profit: u64,
    pub total_strategy_holdings: u64,
    pub exchange_rate: u64,
    pub timestamp: i64,
}

/// Event emitted when a user queues shares for the open batch burn
#[event]
pub struct BatchBurnEntered {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub round: u64,
    pub shares: u64,
    pub receipt_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when a batch-burn round is settled
#[event]
pub struct BatchBurnExecuted {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub round: u64,
    pub total_shares: u64,
    pub amount_per_share: u64,
    pub underlying_reserved: u64,
    pub fees_accrued: u64,
    pub timestamp: i64,
}

/// Event emitted when a user claims batch-burn proceeds
#[event]
pub struct BatchBurnExited {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub round: u64,
    pub shares: u64,
    pub underlying_amount: u64,
    pub timestamp: i64,
}

/// Event emitted whenever a vault parameter changes
#[event]
pub struct VaultConfigured {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub capability: Capability,
    pub timestamp: i64,
}

/// Event emitted when an authority table changes
#[event]
pub struct AuthorityUpdated {
    pub auth: Pubkey,
    pub owner: Pubkey,
    pub timestamp: i64,
}

use anchor_lang::prelude::*;

/// Custom error codes for the Pooled Vault program
#[error_code]
pub enum VaultError {
    #[msg("Caller is not authorized to perform this action")]
    Unauthorized,

    #[msg("Pausable: paused")]
    Paused,

    #[msg("Amount cannot be zero")]
    AmountCannotBeZero,

    #[msg("Deposit is too small to mint any shares")]
    SharesCannotBeZero,

    #[msg("User deposit limit reached")]
    UserDepositLimitsReached,

    #[msg("Vault deposit limit reached")]
    VaultDepositLimitsReached,

    #[msg("Strategy is not trusted")]
    UntrustedStrategy,

    #[msg("Strategy underlying does not match vault underlying")]
    WrongUnderlying,

    #[msg("Strategy rejected the deposit")]
    MintFailed,

    #[msg("Strategy could not return the requested underlying")]
    RedeemFailed,

    #[msg("Withdraw amount exceeds the strategy accounting balance")]
    StrategyBalanceTooLow,

    #[msg("Harvest called outside of the allowed window")]
    BadHarvestTime,

    #[msg("Latest harvest has not expired yet")]
    LatestHarvestNotExpired,

    #[msg("No shares queued for this batch burn round")]
    TotalSharesCannotBeZero,

    #[msg("Not enough underlying in the vault float")]
    NotEnoughUnderlying,

    #[msg("Receipt belongs to a different batch burn round")]
    DifferentRounds,

    #[msg("Batch burn round has not been executed yet")]
    RoundNotExecuted,

    #[msg("No batch burn deposits for this user")]
    NoDeposits,

    #[msg("Fee percent cannot exceed 100%")]
    FeeTooHigh,

    #[msg("Harvest delay cannot be zero")]
    DelayCannotBeZero,

    #[msg("Harvest delay cannot exceed 365 days")]
    DelayTooLong,

    #[msg("Harvest window cannot exceed the harvest delay")]
    WindowTooLong,

    #[msg("Withdrawal queue exceeds the maximum number of strategies")]
    QueueTooBig,

    #[msg("Reentrant call detected")]
    Reentrancy,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Cannot divide by zero")]
    DivisionByZero,

    #[msg("Invalid token mint - does not match vault mint")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,

    #[msg("Strategy state account could not be decoded")]
    InvalidStrategyState,

    #[msg("Harvest accounts must come in strategy data / strategy state pairs")]
    StrategyAccountsMismatch,

    #[msg("Fee receiver account is required when fees are accrued")]
    MissingFeeReceiver,

    #[msg("Authority role list is full")]
    RoleListFull,

    #[msg("Role index out of range")]
    InvalidRole,
}

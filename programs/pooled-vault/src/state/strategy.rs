use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Vault-side accounting for one strategy
///
/// Created the first time a strategy is trusted. Distrusting only flips
/// `trusted`; the balance stays so holdings remain accounted for until
/// the funds are withdrawn.
#[account]
#[derive(InitSpace, Default)]
pub struct StrategyData {
    pub vault: Pubkey,

    /// Strategy state account (external, owned by `strategy_program`)
    pub strategy: Pubkey,

    /// Program that owns the strategy state account
    pub strategy_program: Pubkey,

    pub trusted: bool,

    /// Underlying the vault believes is deployed in this strategy.
    /// Incremented on deposit, decremented on withdraw, reset to the
    /// reported value on harvest.
    pub balance: u64,

    pub bump: u8,

    /// Bump of the withdraw authority `[STRATEGY_WITHDRAW_SEED, vault, strategy]`
    pub withdraw_bump: u8,
}

/// Read side of a yield strategy as seen by the vault
pub trait StrategyAdapter {
    /// Mint of the asset the strategy accepts
    fn underlying(&self) -> Pubkey;

    /// Current value of the strategy position, in underlying
    fn estimated_underlying(&self) -> u64;

    /// Whether the strategy will take new deposits
    fn accepts_deposits(&self) -> bool;

    /// Value the vault books for this strategy on harvest: the live position
    /// plus what has already been sent back to the vault's withdraw account
    /// and not yet redeemed.
    fn reported_value(&self, withdraw_balance: u64) -> Result<u64> {
        self.estimated_underlying()
            .checked_add(withdraw_balance)
            .ok_or(error!(VaultError::MathOverflow))
    }
}

// EXTERNAL state, belonging to strategy programs.
// Every strategy program keeps this struct at the start of its state
// account and updates it when it receives underlying, earns yield or
// takes a loss. Underlying sent back to the vault's withdraw account
// leaves `estimated_underlying`: the vault counts that account itself.
#[derive(Clone, Debug, AnchorSerialize, AnchorDeserialize, PartialEq)]
pub struct CommonStrategyState {
    pub discriminator: [u8; 8],

    pub underlying_mint: Pubkey,

    /// underlying value of the position still held by the strategy
    pub estimated_underlying: u64,

    /// false while the strategy is winding down or full
    pub accepting_deposits: bool,
}

impl CommonStrategyState {
    /// deserialize an external strategy state account
    pub fn from_account_info(strategy_state: &AccountInfo) -> Result<Self> {
        let data = strategy_state.try_borrow_data()?;
        let mut data_slice: &[u8] = &data;
        Self::deserialize(&mut data_slice).map_err(|_| error!(VaultError::InvalidStrategyState))
    }
}

impl StrategyAdapter for CommonStrategyState {
    fn underlying(&self) -> Pubkey {
        self.underlying_mint
    }

    fn estimated_underlying(&self) -> u64 {
        self.estimated_underlying
    }

    fn accepts_deposits(&self) -> bool {
        self.accepting_deposits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_state_decodes_with_trailing_bytes() {
        let state = CommonStrategyState {
            discriminator: [7; 8],
            underlying_mint: Pubkey::new_unique(),
            estimated_underlying: 42,
            accepting_deposits: true,
        };

        // strategy programs append their own fields after the common part
        let mut data = Vec::new();
        state.serialize(&mut data).unwrap();
        data.extend_from_slice(&[0xAA; 16]);

        let mut slice: &[u8] = &data;
        let decoded = CommonStrategyState::deserialize(&mut slice).unwrap();

        assert_eq!(decoded, state);
        assert_eq!(decoded.estimated_underlying(), 42);
        assert!(decoded.accepts_deposits());
    }

    #[test]
    fn test_reported_value_counts_withdraw_account() {
        let state = CommonStrategyState {
            discriminator: [0; 8],
            underlying_mint: Pubkey::new_unique(),
            estimated_underlying: 600,
            accepting_deposits: true,
        };

        assert_eq!(state.reported_value(0).unwrap(), 600);
        assert_eq!(state.reported_value(400).unwrap(), 1000);
        assert!(state.reported_value(u64::MAX).is_err());
    }
}

// Constants for the Pooled Vault program

use anchor_lang::prelude::*;

/// Seed for vault state PDA
#[constant]
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for share mint PDA
#[constant]
pub const SHARE_MINT_SEED: &[u8] = b"shares";

/// Seed for the PDA that owns the float account, the batch-burn escrow and the share mint
#[constant]
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Seed for the roles-and-capabilities authority PDA
#[constant]
pub const AUTH_SEED: &[u8] = b"auth";

/// Seed for per-strategy accounting PDA
#[constant]
pub const STRATEGY_SEED: &[u8] = b"strategy";

/// Seed for the vault-owned authority of each strategy's withdraw account
#[constant]
pub const STRATEGY_WITHDRAW_SEED: &[u8] = b"strategy_withdraw";

/// Seed of the strategy-side PDA that owns a strategy's deposit account.
/// Derived under the strategy program, not this one.
#[constant]
pub const STRATEGY_AUTHORITY_SEED: &[u8] = b"authority";

/// Seed for per-depositor deposit tracking PDA
#[constant]
pub const DEPOSITOR_SEED: &[u8] = b"depositor";

/// Seed for executed batch-burn round PDAs
#[constant]
pub const BATCH_BURN_SEED: &[u8] = b"batch_burn";

/// Seed for per-user batch-burn receipt PDAs
#[constant]
pub const BATCH_BURN_RECEIPT_SEED: &[u8] = b"batch_burn_receipt";

/// Maximum strategies in the withdrawal queue
pub const MAX_STRATEGIES: usize = 20;

/// Longest harvest delay that can be configured (365 days)
#[constant]
pub const MAX_HARVEST_DELAY: u64 = 365 * 24 * 60 * 60;

/// Maximum user -> roles entries held by one authority
pub const MAX_USER_ROLES: usize = 16;

/// Number of distinct roles an authority can define
pub const MAX_ROLES: u8 = 8;

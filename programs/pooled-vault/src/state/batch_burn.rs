use anchor_lang::prelude::*;

/// Settlement record of an executed batch-burn round
///
/// Created by `exec_batch_burn` and never modified afterwards:
/// `amount_per_share` alone determines every payout of the round.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct BatchBurn {
    pub vault: Pubkey,
    pub round: u64,
    /// Shares burned when the round was executed
    pub total_shares: u64,
    /// Underlying paid per share, scaled by the vault base unit
    pub amount_per_share: u64,
    pub bump: u8,
}

/// A user's pending claim in the batch-burn queue
///
/// At most one per user. Exiting zeroes it in place so the same PDA can be
/// reused for a later round.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct BatchBurnReceipt {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub round: u64,
    pub shares: u64,
    pub bump: u8,
}

impl BatchBurnReceipt {
    pub fn has_deposits(&self) -> bool {
        self.shares > 0
    }

    pub fn clear(&mut self) {
        self.round = 0;
        self.shares = 0;
    }
}

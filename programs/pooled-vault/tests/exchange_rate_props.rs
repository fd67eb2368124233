/// Property tests for the exchange rate and batch-burn settlement math
use anchor_lang::prelude::*;
use pooled_vault::state::{BatchBurn, BatchBurnReceipt, UserDeposit, VaultState};
use proptest::prelude::*;

const UNIT: u64 = 1_000_000_000;

fn open_vault() -> VaultState {
    let mut vault = VaultState::new(
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        9,
        Pubkey::default(),
        Pubkey::default(),
    )
    .unwrap();
    vault.paused = false;
    vault.user_deposit_limit = u64::MAX;
    vault.vault_deposit_limit = u64::MAX;
    vault
}

proptest! {
    #[test]
    fn test_rate_constant_without_strategy_activity(
        deposits in prop::collection::vec(1u64..1_000_000 * UNIT, 1..20),
    ) {
        let mut vault = open_vault();
        let mut vault_balance = 0u64;

        for amount in deposits {
            let mut depositor = UserDeposit::default();
            let shares = vault.deposit(&mut depositor, amount, vault_balance, 0).unwrap();
            vault_balance += amount;

            prop_assert_eq!(shares, amount);
            prop_assert_eq!(vault.exchange_rate(vault_balance, 0).unwrap(), UNIT);
        }
    }

    #[test]
    fn test_round_trip_loses_less_than_one_share(
        total_shares in UNIT..1_000_000 * UNIT,
        float in 0u64..1_000_000 * UNIT,
        holdings in UNIT..1_000_000 * UNIT,
        amount in 1u64..1_000 * UNIT,
    ) {
        let mut vault = open_vault();
        vault.total_shares = total_shares;
        vault.total_strategy_holdings = holdings;

        let rate = vault.exchange_rate(float, 0).unwrap();
        let shares = vault.calculate_shares(amount, float, 0).unwrap();
        let back = vault.calculate_underlying(shares, float, 0).unwrap();

        prop_assert!(back <= amount);
        prop_assert!(amount - back <= rate.div_ceil(UNIT));
    }

    #[test]
    fn test_round_trip_exact_at_par(amount in 1u64..u64::MAX / UNIT) {
        let vault = open_vault();
        let shares = vault.calculate_shares(amount, 0, 0).unwrap();
        prop_assert_eq!(vault.calculate_underlying(shares, 0, 0).unwrap(), amount);
    }

    #[test]
    fn test_batch_burn_pays_every_participant_the_same_rate(
        entries in prop::collection::vec(1u64..1_000 * UNIT, 1..10),
        holdings in 0u64..10_000 * UNIT,
        loss in 0u64..100 * UNIT,
    ) {
        let mut vault = open_vault();
        let total: u64 = entries.iter().sum();
        let vault_balance = total + holdings;
        vault.total_shares = vault_balance;
        // strategy value drops before execution
        vault.total_strategy_holdings = holdings.saturating_sub(loss);
        let float_only = total;

        let mut receipts: Vec<BatchBurnReceipt> = entries.iter().map(|_| BatchBurnReceipt::default()).collect();
        for (receipt, shares) in receipts.iter_mut().zip(&entries) {
            vault.enter_batch_burn(receipt, *shares).unwrap();
        }

        let rate = vault.exchange_rate(float_only, 0).unwrap();
        let mut batch_burn = BatchBurn::default();
        let settlement = vault.exec_batch_burn(&mut batch_burn, float_only, 0).unwrap();
        prop_assert_eq!(settlement.amount_per_share, rate);

        let mut paid = 0u64;
        for (receipt, shares) in receipts.iter_mut().zip(&entries) {
            let payout = vault.exit_batch_burn(receipt, &batch_burn).unwrap();
            prop_assert_eq!(payout, (*shares as u128 * rate as u128 / UNIT as u128) as u64);
            paid += payout;
        }

        let expected = (total as u128 * rate as u128 / UNIT as u128) as u64;
        prop_assert!(expected - paid <= entries.len() as u64);
        prop_assert!(vault.batch_burn_balance <= entries.len() as u64);
    }
}

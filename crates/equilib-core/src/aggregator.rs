//! Balance aggregation: the signed per-currency total of one side.

use equilib_types::{Account, Currency, SumOptions};
use rust_decimal::Decimal;

/// Sum the net contribution of every account in a partition for one
/// currency.
///
/// An account with no balance record for the currency contributes
/// exactly zero — never NaN and never a null propagation. The per-record
/// formula is `balance + credit − debt − loan_amount`, with the optional
/// components gated by `options`.
#[must_use]
pub fn sum_side(accounts: &[&Account], currency: &Currency, options: SumOptions) -> Decimal {
    accounts
        .iter()
        .filter_map(|account| account.balance_for(currency))
        .map(|balance| balance.net(options))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_contributes_zero() {
        let with = Account::dummy(&["user"], "TOMAN", Decimal::new(100, 0));
        let without = Account::dummy(&["user"], "USDT", Decimal::new(999, 0));
        let accounts = vec![&with, &without];
        assert_eq!(
            sum_side(&accounts, &Currency::new("TOMAN"), SumOptions::default()),
            Decimal::new(100, 0)
        );
    }

    #[test]
    fn empty_partition_sums_to_zero() {
        assert_eq!(
            sum_side(&[], &Currency::new("TOMAN"), SumOptions::default()),
            Decimal::ZERO
        );
    }

    #[test]
    fn sums_net_across_accounts() {
        let mut a = Account::dummy(&["user"], "TOMAN", Decimal::new(1000, 0));
        a.balances[0].debt = Decimal::new(100, 0);
        let mut b = Account::dummy(&["user"], "TOMAN", Decimal::new(500, 0));
        b.balances[0].credit = Decimal::new(50, 0);
        b.balances[0].loan_amount = Decimal::new(200, 0);

        let accounts = vec![&a, &b];
        // (1000 - 100) + (500 + 50 - 200) = 1250
        assert_eq!(
            sum_side(&accounts, &Currency::new("TOMAN"), SumOptions::default()),
            Decimal::new(1250, 0)
        );
    }

    #[test]
    fn currency_match_is_case_insensitive() {
        let account = Account::dummy(&["user"], "toman", Decimal::new(7, 0));
        let accounts = vec![&account];
        assert_eq!(
            sum_side(&accounts, &Currency::new("TOMAN"), SumOptions::default()),
            Decimal::new(7, 0)
        );
    }

    #[test]
    fn negative_balances_sum_signed() {
        let a = Account::dummy(&["user"], "TOMAN", Decimal::new(-300, 0));
        let b = Account::dummy(&["user"], "TOMAN", Decimal::new(100, 0));
        let accounts = vec![&a, &b];
        assert_eq!(
            sum_side(&accounts, &Currency::new("TOMAN"), SumOptions::default()),
            Decimal::new(-200, 0)
        );
    }
}

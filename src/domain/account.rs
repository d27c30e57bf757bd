use super::money::Balance;
use crate::error::{BankError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A customer account holding a non-negative balance.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub number: String,
    pub balance: Balance,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(id: String, user_id: String, number: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            number,
            balance: Balance::ZERO,
            created_at,
        }
    }

    /// Balance that applying `delta` would produce, without applying it.
    ///
    /// Fails with `InsufficientFunds` below zero and with `InvalidInput`
    /// when the sum leaves the `Decimal` range.
    pub fn balance_after(&self, delta: Decimal) -> Result<Balance> {
        let next = self
            .balance
            .checked_add(delta)
            .ok_or_else(|| BankError::invalid("amount would overflow the account balance"))?;
        if next.is_negative() {
            return Err(BankError::InsufficientFunds {
                account_id: self.id.clone(),
            });
        }
        Ok(next)
    }

    /// Applies a signed delta to the balance. The balance is untouched on
    /// failure.
    pub fn apply(&mut self, delta: Decimal) -> Result<Balance> {
        let next = self.balance_after(delta)?;
        self.balance = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account() -> Account {
        Account::new("a1".into(), "u1".into(), "4081".into(), Utc::now())
    }

    #[test]
    fn test_account_credit_and_debit() {
        let mut account = account();
        assert_eq!(
            account.apply(dec!(10.00)).unwrap(),
            Balance::new(dec!(10.00))
        );
        assert_eq!(
            account.apply(dec!(-4.50)).unwrap(),
            Balance::new(dec!(5.50))
        );
    }

    #[test]
    fn test_account_debit_to_exactly_zero() {
        let mut account = account();
        account.apply(dec!(3.00)).unwrap();
        assert_eq!(
            account.apply(dec!(-3.00)).unwrap(),
            Balance::ZERO
        );
    }

    #[test]
    fn test_account_overdraft_rejected() {
        let mut account = account();
        account.apply(dec!(10.00)).unwrap();

        let result = account.apply(dec!(-10.01));
        assert!(matches!(result, Err(BankError::InsufficientFunds { .. })));
        assert_eq!(account.balance, Balance::new(dec!(10.00)));
    }

    #[test]
    fn test_account_credit_overflow_rejected() {
        let mut account = account();
        account.apply(Decimal::MAX).unwrap();

        let result = account.apply(dec!(1.00));
        assert!(matches!(result, Err(BankError::InvalidInput(_))));
        assert_eq!(account.balance, Balance::new(Decimal::MAX));
        assert!(account.balance_after(dec!(-1.00)).is_ok());
    }
}

//! Loan application: validate, price, amortize, persist, disburse.

use super::engine::BankEngine;
use crate::domain::amortization::{calculate_monthly_payment, generate_payment_schedule};
use crate::domain::loan::{Loan, Payment};
use crate::domain::money::Amount;
use crate::domain::transaction::{Transaction, TransactionType};
use crate::error::{BankError, Result};
use chrono::Utc;
use rust_decimal::Decimal;

/// Longest term accepted for a single loan.
pub const MAX_TERM_MONTHS: u32 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanApplication {
    pub user_id: String,
    pub account_id: String,
    pub amount: Decimal,
    pub term_months: i64,
}

fn validate_term(term_months: i64) -> Result<u32> {
    match u32::try_from(term_months) {
        Ok(term) if term > 0 && term <= MAX_TERM_MONTHS => Ok(term),
        _ if term_months <= 0 => Err(BankError::invalid(
            "loan amount and term must be positive",
        )),
        _ => Err(BankError::invalid(format!(
            "loan term cannot exceed {MAX_TERM_MONTHS} months"
        ))),
    }
}

impl BankEngine {
    /// Issues a loan and credits its principal to the borrower's account.
    ///
    /// The loan record and the disbursement are written under two separate
    /// guards. If the disbursement fails, the recorded loan stays in place
    /// with no matching funds movement; nothing rolls it back.
    pub async fn apply_loan(&self, application: LoanApplication) -> Result<Loan> {
        let amount = Amount::new(application.amount)
            .map_err(|_| BankError::invalid("loan amount and term must be positive"))?;
        let term_months = validate_term(application.term_months)?;

        {
            let ledger = self.store.read().await;
            ledger.user(&application.user_id)?;
            ledger.account(&application.account_id)?;
        }

        let interest_rate = self.base_rate().await + self.pricing.margin;
        let monthly_payment = calculate_monthly_payment(amount.value(), interest_rate, term_months)?;
        let start_date = Utc::now();
        let payment_schedule = generate_payment_schedule(
            amount.value(),
            interest_rate,
            term_months,
            start_date,
            monthly_payment,
        )?;

        let loan = Loan {
            id: self.ids.id(),
            user_id: application.user_id,
            account_id: application.account_id,
            amount: amount.value(),
            interest_rate,
            term_months,
            start_date,
            payment_schedule,
            remaining_amount: amount.value(),
        };

        self.store.write().await.insert_loan(loan.clone());

        if let Err(e) = self.disburse(&loan, amount).await {
            tracing::error!(
                loan_id = %loan.id,
                error = %e,
                "Loan recorded but disbursement failed, no rollback applied"
            );
            return Err(e);
        }

        tracing::info!(
            loan_id = %loan.id,
            user_id = %loan.user_id,
            amount = %loan.amount,
            rate = %interest_rate,
            term_months,
            account_id = %loan.account_id,
            "Loan approved and disbursed"
        );
        Ok(loan)
    }

    pub async fn loan_schedule(&self, loan_id: &str) -> Result<Vec<Payment>> {
        let ledger = self.store.read().await;
        Ok(ledger.loan(loan_id)?.payment_schedule.clone())
    }

    /// Base rate from the cache, or the configured fallback when the rate
    /// source fails.
    async fn base_rate(&self) -> Decimal {
        match self.rates.get_rate().await {
            Ok(rate) => rate,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    fallback = %self.pricing.fallback_rate,
                    "Failed to get key rate, using fallback"
                );
                self.pricing.fallback_rate
            }
        }
    }

    async fn disburse(&self, loan: &Loan, amount: Amount) -> Result<()> {
        let tx = Transaction::new(
            self.ids.id(),
            None,
            Some(loan.account_id.clone()),
            amount,
            TransactionType::LoanDisbursement,
            format!("Loan disbursement (ID: {})", loan.id),
        )?;

        let mut ledger = self.store.write().await;
        ledger.update_balance(&loan.account_id, amount.value())?;
        ledger.append_transaction(tx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_term() {
        assert_eq!(validate_term(12), Ok(12));
        assert_eq!(validate_term(MAX_TERM_MONTHS as i64), Ok(MAX_TERM_MONTHS));
        assert!(matches!(validate_term(0), Err(BankError::InvalidInput(_))));
        assert!(matches!(validate_term(-3), Err(BankError::InvalidInput(_))));
        assert!(matches!(validate_term(601), Err(BankError::InvalidInput(_))));
        assert!(matches!(
            validate_term(i64::MAX),
            Err(BankError::InvalidInput(_))
        ));
    }
}

use super::engine::BankEngine;
use crate::domain::money::decimal_money;
use crate::domain::transaction::Transaction;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;

/// Aggregate view of a user's balances and loan debt.
///
/// Loan debt sums each loan's stored remaining amount, which is not reduced
/// by paid installments.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct FinancialSummary {
    pub user_id: String,
    #[serde(with = "decimal_money")]
    pub total_account_balance: Decimal,
    pub number_of_accounts: usize,
    #[serde(with = "decimal_money")]
    pub total_loan_debt: Decimal,
    pub active_loans: usize,
}

impl BankEngine {
    /// Transactions touching `account_id`, newest first.
    pub async fn account_transactions(&self, account_id: &str) -> Result<Vec<Transaction>> {
        let mut transactions = {
            let ledger = self.store.read().await;
            ledger.account(account_id)?;
            ledger.transactions().query(account_id)
        };
        // Equal timestamps keep the most recently appended entry first.
        transactions.reverse();
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        tracing::info!(count = transactions.len(), %account_id, "Fetched transactions");
        Ok(transactions)
    }

    pub async fn financial_summary(&self, user_id: &str) -> FinancialSummary {
        let (accounts, loans) = {
            let ledger = self.store.read().await;
            (ledger.accounts_for_user(user_id), ledger.loans_for_user(user_id))
        };

        let summary = FinancialSummary {
            user_id: user_id.to_string(),
            total_account_balance: accounts.iter().map(|a| a.balance.value()).sum(),
            number_of_accounts: accounts.len(),
            total_loan_debt: loans.iter().map(|l| l.remaining_amount).sum(),
            active_loans: loans.iter().filter(|l| l.is_active()).count(),
        };

        tracing::info!(%user_id, "Generated financial summary");
        summary
    }
}

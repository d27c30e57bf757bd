use super::money::Amount;
use crate::error::{BankError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Transfer,
    Deposit,
    Payment,
    LoanDisbursement,
}

/// An immutable ledger entry describing one balance movement.
///
/// Deposits and disbursements have no source, card payments have no
/// destination. At least one side is always present.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account_id: Option<String>,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Transaction {
    pub fn new(
        id: String,
        from_account_id: Option<String>,
        to_account_id: Option<String>,
        amount: Amount,
        transaction_type: TransactionType,
        description: String,
    ) -> Result<Self> {
        if from_account_id.is_none() && to_account_id.is_none() {
            return Err(BankError::invalid(
                "transaction needs a source or a destination account",
            ));
        }
        Ok(Self {
            id,
            from_account_id,
            to_account_id,
            amount,
            timestamp: Utc::now(),
            transaction_type,
            description,
        })
    }

    /// Whether `account_id` appears on either side of the entry.
    pub fn touches(&self, account_id: &str) -> bool {
        self.from_account_id.as_deref() == Some(account_id)
            || self.to_account_id.as_deref() == Some(account_id)
    }
}

//! Balance-moving operations: deposits, card payments and transfers.
//!
//! Each one takes the store's write guard once and performs validation,
//! balance updates and the ledger append under it, so no other operation
//! can observe a debited source without the matching credit or entry.

use super::engine::BankEngine;
use crate::domain::card;
use crate::domain::money::Amount;
use crate::domain::transaction::{Transaction, TransactionType};
use crate::error::{BankError, Entity, Result};
use chrono::Utc;
use rust_decimal::Decimal;

impl BankEngine {
    /// Credits `account_id` from an external source.
    pub async fn deposit(&self, account_id: &str, amount: Decimal) -> Result<Transaction> {
        let amount = Amount::new(amount)
            .map_err(|_| BankError::invalid("deposit amount must be positive"))?;

        let mut ledger = self.store.write().await;
        let number = ledger.account(account_id)?.number.clone();
        let tx = Transaction::new(
            self.ids.id(),
            None,
            Some(account_id.to_string()),
            amount,
            TransactionType::Deposit,
            format!("Deposit to account {number}"),
        )?;
        ledger.update_balance(account_id, amount.value())?;
        ledger.append_transaction(tx.clone());
        drop(ledger);

        tracing::info!(amount = %amount.value(), %account_id, "Deposit successful");
        Ok(tx)
    }

    /// Debits the account behind `card_number` in favour of an external
    /// merchant.
    pub async fn pay_with_card(
        &self,
        card_number: &str,
        amount: Decimal,
        merchant: &str,
    ) -> Result<Transaction> {
        let amount = Amount::new(amount)
            .map_err(|_| BankError::invalid("payment amount must be positive"))?;

        let mut ledger = self.store.write().await;
        let card = ledger
            .card_by_number(card_number)
            .cloned()
            .ok_or_else(|| BankError::not_found(Entity::Card, card::mask_number(card_number)))?;
        if card.is_expired(Utc::now()) {
            return Err(BankError::invalid("card expired"));
        }

        let tx = Transaction::new(
            self.ids.id(),
            Some(card.account_id.clone()),
            None,
            amount,
            TransactionType::Payment,
            format!("Payment to {merchant}"),
        )?;
        ledger.update_balance(&card.account_id, -amount.value())?;
        ledger.append_transaction(tx.clone());
        drop(ledger);

        tracing::info!(
            amount = %amount.value(),
            account_id = %card.account_id,
            card = %card.short_number(),
            %merchant,
            "Card payment processed"
        );
        Ok(tx)
    }

    /// Moves `amount` between two accounts and records one `transfer` entry.
    pub async fn transfer(&self, from_id: &str, to_id: &str, amount: Decimal) -> Result<Transaction> {
        if from_id == to_id {
            return Err(BankError::invalid("cannot transfer to the same account"));
        }
        let amount = Amount::new(amount)
            .map_err(|_| BankError::invalid("transfer amount must be positive"))?;

        let mut ledger = self.store.write().await;
        let from_number = ledger
            .account(from_id)
            .map(|a| a.number.clone())
            .map_err(|_| BankError::not_found(Entity::SourceAccount, from_id));
        let to_number = ledger
            .account(to_id)
            .map(|a| a.number.clone())
            .map_err(|_| BankError::not_found(Entity::DestinationAccount, to_id));
        let (from_number, to_number) = (from_number?, to_number?);

        let tx = Transaction::new(
            self.ids.id(),
            Some(from_id.to_string()),
            Some(to_id.to_string()),
            amount,
            TransactionType::Transfer,
            format!("Transfer from {from_number} to {to_number}"),
        )?;
        // Both sides are checked before either balance changes.
        ledger.account(from_id)?.balance_after(-amount.value())?;
        ledger.account(to_id)?.balance_after(amount.value())?;
        ledger.update_balance(from_id, -amount.value())?;
        ledger.update_balance(to_id, amount.value())?;
        ledger.append_transaction(tx.clone());
        drop(ledger);

        tracing::info!(amount = %amount.value(), %from_id, %to_id, "Transfer successful");
        Ok(tx)
    }
}

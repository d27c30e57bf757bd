use crate::domain::account::Account;
use crate::domain::card::Card;
use crate::domain::loan::Loan;
use crate::domain::money::Balance;
use crate::domain::transaction::Transaction;
use crate::domain::user::User;
use crate::error::{BankError, Entity, Result};
use crate::infrastructure::transaction_log::TransactionLog;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Everything the ledger owns, guarded as one unit.
///
/// Multi-step operations take the write guard once and call these methods
/// for the whole read-validate-mutate-append sequence.
#[derive(Debug, Default)]
pub struct LedgerState {
    users: HashMap<String, User>,
    accounts: HashMap<String, Account>,
    cards: HashMap<String, Card>,
    loans: HashMap<String, Loan>,
    transactions: TransactionLog,
}

impl LedgerState {
    pub fn insert_user(&mut self, user: User) -> Result<()> {
        let taken = self
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Err(BankError::Conflict(
                "username or email already exists".into(),
            ));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    pub fn user(&self, id: &str) -> Result<&User> {
        self.users
            .get(id)
            .ok_or_else(|| BankError::not_found(Entity::User, id))
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|u| u.username == username)
    }

    pub fn insert_account(&mut self, account: Account) {
        self.accounts.insert(account.id.clone(), account);
    }

    pub fn account(&self, id: &str) -> Result<&Account> {
        self.accounts
            .get(id)
            .ok_or_else(|| BankError::not_found(Entity::Account, id))
    }

    pub fn accounts_for_user(&self, user_id: &str) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        accounts
    }

    /// Applies a signed `delta` and returns the new balance.
    ///
    /// Fails with `NotFound` for unknown accounts, with `InsufficientFunds`
    /// when a debit would go below zero and with `InvalidInput` on overflow;
    /// the balance is untouched on failure.
    pub fn update_balance(&mut self, id: &str, delta: Decimal) -> Result<Balance> {
        let account = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| BankError::not_found(Entity::Account, id))?;
        account.apply(delta)
    }

    pub fn insert_card(&mut self, card: Card) {
        self.cards.insert(card.id.clone(), card);
    }

    pub fn card_by_number(&self, number: &str) -> Option<&Card> {
        self.cards.values().find(|c| c.number == number)
    }

    pub fn cards_for_account(&self, account_id: &str) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .cards
            .values()
            .filter(|c| c.account_id == account_id)
            .cloned()
            .collect();
        cards.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        cards
    }

    pub fn insert_loan(&mut self, loan: Loan) {
        self.loans.insert(loan.id.clone(), loan);
    }

    pub fn loan(&self, id: &str) -> Result<&Loan> {
        self.loans
            .get(id)
            .ok_or_else(|| BankError::not_found(Entity::Loan, id))
    }

    pub fn loans_for_user(&self, user_id: &str) -> Vec<Loan> {
        self.loans
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn append_transaction(&mut self, tx: Transaction) {
        self.transactions.append(tx);
    }

    pub fn transactions(&self) -> &TransactionLog {
        &self.transactions
    }
}

/// A thread-safe in-memory ledger store.
///
/// One `Arc<RwLock<LedgerState>>` covers users, accounts, cards, loans and
/// the transaction log. Cloning shares the same state.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().await
    }

    pub async fn get_account(&self, id: &str) -> Result<Account> {
        self.read().await.account(id).cloned()
    }

    pub async fn update_balance(&self, id: &str, delta: Decimal) -> Result<Balance> {
        self.write().await.update_balance(id, delta)
    }

    pub async fn query_transactions(&self, account_id: &str) -> Vec<Transaction> {
        self.read().await.transactions().query(account_id)
    }
}

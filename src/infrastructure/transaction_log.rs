use crate::domain::transaction::Transaction;

/// Append-only history of ledger entries, kept in insertion order.
#[derive(Debug, Default)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, tx: Transaction) {
        self.entries.push(tx);
    }

    /// Entries where `account_id` is the source or the destination, in
    /// storage order. Callers that want newest-first must sort.
    pub fn query(&self, account_id: &str) -> Vec<Transaction> {
        self.entries
            .iter()
            .filter(|tx| tx.touches(account_id))
            .cloned()
            .collect()
    }
}

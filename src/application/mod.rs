//! Application layer orchestrating the ledger.
//!
//! `BankEngine` is the entry point for every use case. It owns the shared
//! ledger store, the rate cache and the notification queue; multi-step
//! ledger changes hold the store's single write guard for their whole
//! sequence.

pub mod analytics;
pub mod engine;
pub mod loans;
pub mod notifications;
pub mod payments;
pub mod rate_cache;

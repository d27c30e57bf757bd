//! Infrastructure adapters: the in-memory ledger store and the concrete
//! collaborators behind the domain ports.

pub mod ids;
pub mod in_memory;
pub mod notifier;
pub mod password;
pub mod rate_source;
pub mod transaction_log;

//! Domain layer: value objects, ledger entities, loan amortization math and
//! the ports through which the engine reaches external collaborators.

pub mod account;
pub mod amortization;
pub mod card;
pub mod loan;
pub mod money;
pub mod ports;
pub mod transaction;
pub mod user;

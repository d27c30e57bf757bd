use std::fmt;
use thiserror::Error;

/// The kind of record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Account,
    SourceAccount,
    DestinationAccount,
    Card,
    Loan,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::User => "User",
            Entity::Account => "Account",
            Entity::SourceAccount => "Source account",
            Entity::DestinationAccount => "Destination account",
            Entity::Card => "Card",
            Entity::Loan => "Loan",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: String },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Insufficient funds in account {account_id}")]
    InsufficientFunds { account_id: String },
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BankError {
    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        BankError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        BankError::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, BankError>;

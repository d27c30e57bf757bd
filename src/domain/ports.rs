use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Supplies the base annual interest rate, in percent.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rate(&self) -> Result<Decimal>;
}

/// A message handed to the notification queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Best-effort message delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<()>;
}

/// One-way credential hashing.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String>;
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// Produces opaque unique identifiers and printable numbers.
pub trait IdGenerator: Send + Sync {
    fn id(&self) -> String;
    fn account_number(&self) -> String;
    fn card_number(&self) -> String;
    fn cvv(&self) -> String;
}

pub type RateSourceRef = Arc<dyn RateSource>;
pub type NotifierRef = Arc<dyn Notifier>;
pub type CredentialHasherRef = Arc<dyn CredentialHasher>;
pub type IdGeneratorRef = Arc<dyn IdGenerator>;

#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use simple_bank::application::engine::BankEngine;
use simple_bank::application::notifications::{NotificationQueue, NotificationWorkers};
use simple_bank::application::rate_cache::RateCache;
use simple_bank::domain::account::Account;
use simple_bank::domain::ports::{
    CredentialHasher, Notification, Notifier, RateSource, RateSourceRef,
};
use simple_bank::domain::user::User;
use simple_bank::error::{BankError, Result};
use simple_bank::infrastructure::in_memory::InMemoryStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Cheap reversible stand-in for argon2 so tests stay fast.
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, plaintext: &str) -> Result<String> {
        Ok(format!("plain:{plaintext}"))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        hash == format!("plain:{plaintext}")
    }
}

pub struct CountingRateSource {
    pub rate: Decimal,
    calls: AtomicUsize,
}

impl CountingRateSource {
    pub fn new(rate: Decimal) -> Self {
        Self {
            rate,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateSource for CountingRateSource {
    async fn fetch_rate(&self) -> Result<Decimal> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rate)
    }
}

pub struct FailingRateSource;

#[async_trait]
impl RateSource for FailingRateSource {
    async fn fetch_rate(&self) -> Result<Decimal> {
        Err(BankError::Internal("rate feed unreachable".into()))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Notification>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

pub struct Harness {
    pub engine: Arc<BankEngine>,
    pub notifier: Arc<RecordingNotifier>,
    pub workers: NotificationWorkers,
}

pub fn harness_with_rates(source: RateSourceRef) -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let (queue, workers) = NotificationQueue::spawn(notifier.clone(), 2, 32);
    let engine = BankEngine::new(InMemoryStore::new(), RateCache::new(source), queue)
        .with_hasher(Arc::new(PlainHasher));
    Harness {
        engine: Arc::new(engine),
        notifier,
        workers,
    }
}

pub fn harness() -> Harness {
    harness_with_rates(Arc::new(CountingRateSource::new(dec!(16.0))))
}

pub async fn user_with_account(engine: &BankEngine, username: &str) -> (User, Account) {
    let user = engine
        .register_user(username, &format!("{username}@example.com"), "secret")
        .await
        .unwrap();
    let account = engine.create_account(&user.id).await.unwrap();
    (user, account)
}

pub async fn funded_account(engine: &BankEngine, username: &str, amount: Decimal) -> Account {
    let (_, account) = user_with_account(engine, username).await;
    if amount > Decimal::ZERO {
        engine.deposit(&account.id, amount).await.unwrap();
    }
    account
}

pub async fn balance_of(engine: &BankEngine, account_id: &str) -> Decimal {
    engine
        .store()
        .get_account(account_id)
        .await
        .unwrap()
        .balance
        .value()
}

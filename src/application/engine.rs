use crate::application::notifications::NotificationQueue;
use crate::application::rate_cache::RateCache;
use crate::domain::account::Account;
use crate::domain::card::{self, Card};
use crate::domain::ports::{CredentialHasherRef, IdGeneratorRef, Notification};
use crate::domain::user::User;
use crate::error::{BankError, Result};
use crate::infrastructure::ids::RandomIdGenerator;
use crate::infrastructure::in_memory::InMemoryStore;
use crate::infrastructure::password::Argon2Hasher;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tokio::task;

const CARD_VALID_YEARS: u32 = 3;

/// Rates applied when pricing a loan, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPricing {
    /// Base rate used when the rate source cannot be reached.
    pub fallback_rate: Decimal,
    /// Bank margin added on top of the base rate.
    pub margin: Decimal,
}

impl Default for LoanPricing {
    fn default() -> Self {
        Self {
            fallback_rate: dec!(10),
            margin: dec!(5),
        }
    }
}

/// The main entry point for banking operations.
///
/// `BankEngine` owns handles to the ledger store and the external
/// collaborators. It is shared behind an `Arc` by every request handler.
pub struct BankEngine {
    pub(super) store: InMemoryStore,
    pub(super) rates: RateCache,
    pub(super) notifications: NotificationQueue,
    pub(super) pricing: LoanPricing,
    pub(super) ids: IdGeneratorRef,
    pub(super) hasher: CredentialHasherRef,
}

impl BankEngine {
    /// Creates an engine with UUID identifiers, argon2 credentials and the
    /// default loan pricing.
    pub fn new(store: InMemoryStore, rates: RateCache, notifications: NotificationQueue) -> Self {
        Self {
            store,
            rates,
            notifications,
            pricing: LoanPricing::default(),
            ids: Arc::new(RandomIdGenerator),
            hasher: Arc::new(Argon2Hasher),
        }
    }

    pub fn with_pricing(mut self, pricing: LoanPricing) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_id_generator(mut self, ids: IdGeneratorRef) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_hasher(mut self, hasher: CredentialHasherRef) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    pub async fn register_user(&self, username: &str, email: &str, password: &str) -> Result<User> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(BankError::invalid(
                "username, email, and password are required",
            ));
        }

        let hasher = self.hasher.clone();
        let plaintext = password.to_string();
        let password_hash = task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| BankError::Internal(format!("Failed to execute hashing task: {e}")))??;

        let user = User {
            id: self.ids.id(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now(),
        };
        self.store.write().await.insert_user(user.clone())?;

        self.notifications.dispatch(Notification {
            to: user.email.clone(),
            subject: "Welcome to Simple Bank!".to_string(),
            body: format!(
                "Hello {},\n\nThank you for registering at Simple Bank.",
                user.username
            ),
        });

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Checks credentials and returns the user id.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let user = self
            .store
            .read()
            .await
            .user_by_username(username)
            .cloned()
            .ok_or(BankError::InvalidCredentials)?;

        let hasher = self.hasher.clone();
        let plaintext = password.to_string();
        let hash = user.password_hash.clone();
        let verified = task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(|e| BankError::Internal(format!("Failed to execute verify task: {e}")))?;
        if !verified {
            return Err(BankError::InvalidCredentials);
        }

        tracing::info!(username = %user.username, "User logged in");
        Ok(user.id)
    }

    pub async fn create_account(&self, user_id: &str) -> Result<Account> {
        if user_id.is_empty() {
            return Err(BankError::invalid("user_id is required"));
        }

        let mut ledger = self.store.write().await;
        ledger.user(user_id)?;
        let account = Account::new(
            self.ids.id(),
            user_id.to_string(),
            self.ids.account_number(),
            Utc::now(),
        );
        ledger.insert_account(account.clone());
        drop(ledger);

        tracing::info!(number = %account.number, %user_id, "Account created");
        Ok(account)
    }

    pub async fn user_accounts(&self, user_id: &str) -> Vec<Account> {
        let accounts = self.store.read().await.accounts_for_user(user_id);
        tracing::info!(count = accounts.len(), %user_id, "Fetched accounts");
        accounts
    }

    pub async fn generate_card(&self, account_id: &str) -> Result<Card> {
        let mut ledger = self.store.write().await;
        ledger.account(account_id)?;

        let now = Utc::now();
        let (expiry_month, expiry_year) = card::expiry_from(now, CARD_VALID_YEARS);
        let card = Card {
            id: self.ids.id(),
            account_id: account_id.to_string(),
            number: self.ids.card_number(),
            expiry_month,
            expiry_year,
            cvv: self.ids.cvv(),
            created_at: now,
        };
        ledger.insert_card(card.clone());
        drop(ledger);

        tracing::info!(%account_id, "Card generated");
        Ok(card)
    }

    pub async fn account_cards(&self, account_id: &str) -> Result<Vec<Card>> {
        let ledger = self.store.read().await;
        ledger.account(account_id)?;
        Ok(ledger.cards_for_account(account_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::notifications::NotificationQueue;
    use crate::domain::ports::CredentialHasher;
    use crate::error::Entity;
    use crate::infrastructure::notifier::LogNotifier;
    use crate::infrastructure::rate_source::FixedRateSource;

    struct PlainHasher;

    impl CredentialHasher for PlainHasher {
        fn hash(&self, plaintext: &str) -> Result<String> {
            Ok(format!("plain:{plaintext}"))
        }

        fn verify(&self, plaintext: &str, hash: &str) -> bool {
            hash == format!("plain:{plaintext}")
        }
    }

    fn engine() -> BankEngine {
        let (queue, _workers) = NotificationQueue::spawn(Arc::new(LogNotifier), 1, 8);
        let rates = RateCache::new(Arc::new(FixedRateSource::new(dec!(16))));
        BankEngine::new(InMemoryStore::new(), rates, queue).with_hasher(Arc::new(PlainHasher))
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let engine = engine();
        let user = engine
            .register_user("alice", "alice@example.com", "pw")
            .await
            .unwrap();

        assert_eq!(engine.login("alice", "pw").await.unwrap(), user.id);
        assert_eq!(
            engine.login("alice", "wrong").await,
            Err(BankError::InvalidCredentials)
        );
        assert_eq!(
            engine.login("nobody", "pw").await,
            Err(BankError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_argon2_credentials_round_trip_off_the_runtime() {
        let (queue, _workers) = NotificationQueue::spawn(Arc::new(LogNotifier), 1, 8);
        let rates = RateCache::new(Arc::new(FixedRateSource::new(dec!(16))));
        let engine = BankEngine::new(InMemoryStore::new(), rates, queue);

        let user = engine
            .register_user("alice", "alice@example.com", "pw")
            .await
            .unwrap();
        assert!(user.password_hash.starts_with("$argon2"));
        assert_eq!(engine.login("alice", "pw").await.unwrap(), user.id);
        assert_eq!(
            engine.login("alice", "nope").await,
            Err(BankError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() {
        let engine = engine();
        let result = engine.register_user("alice", "", "pw").await;
        assert!(matches!(result, Err(BankError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_register_duplicate_conflicts() {
        let engine = engine();
        engine.register_user("alice", "a@x.io", "pw").await.unwrap();
        let result = engine.register_user("alice", "b@x.io", "pw").await;
        assert!(matches!(result, Err(BankError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_account_starts_at_zero() {
        let engine = engine();
        let user = engine.register_user("alice", "a@x.io", "pw").await.unwrap();

        let account = engine.create_account(&user.id).await.unwrap();
        assert_eq!(account.balance.value(), Decimal::ZERO);
        assert_eq!(engine.user_accounts(&user.id).await, vec![account]);
    }

    #[tokio::test]
    async fn test_create_account_for_unknown_user() {
        let engine = engine();
        let result = engine.create_account("ghost").await;
        assert!(matches!(
            result,
            Err(BankError::NotFound {
                entity: Entity::User,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_cards_are_listed_per_account() {
        let engine = engine();
        let user = engine.register_user("alice", "a@x.io", "pw").await.unwrap();
        let account = engine.create_account(&user.id).await.unwrap();

        let card = engine.generate_card(&account.id).await.unwrap();
        assert!(!card.is_expired(Utc::now()));
        assert_eq!(engine.account_cards(&account.id).await.unwrap(), vec![card]);
        assert!(engine.account_cards("missing").await.is_err());
    }
}

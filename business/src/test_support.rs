//! In-memory stores and fixtures shared by the use case tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;

use crate::domain::auth::identity::{AuthIdentity, SignInProvider, VerifiedAccount};
use crate::domain::cart::authority::CartContext;
use crate::domain::cart::model::{Cart, LineItem};
use crate::domain::cart::reconciliation::{MergeClaim, MergeToken};
use crate::domain::cart::repository::{LocalCartStore, MergeLedger, RemoteCartStore};
use crate::domain::cart::subscription::{CartChangeHub, CartSubscription};
use crate::domain::cart::value_objects::{Money, ProductId, ProductSnapshot, Quantity};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::{BrowserProfile, UserId};

mock! {
    pub Log {}
    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

pub fn product(id: &str, price: f64) -> ProductSnapshot {
    ProductSnapshot::new(
        ProductId::new(id).unwrap(),
        format!("Produto {}", id),
        Money::from_f64(price).unwrap(),
        None,
        Some("mercearia".to_string()),
    )
    .unwrap()
}

pub fn line_item(id: &str, price: f64, quantity: i64) -> LineItem {
    LineItem::new(product(id, price), Quantity::new(quantity).unwrap())
}

pub fn profile() -> BrowserProfile {
    BrowserProfile::parse("browser-1").unwrap()
}

pub fn anonymous_context() -> CartContext {
    CartContext::new(profile(), None)
}

pub fn account(user: &str, login_generation: i64) -> VerifiedAccount {
    VerifiedAccount {
        user_id: UserId::new(user),
        provider: SignInProvider::Password,
        email: Some(format!("{}@bazar.co.mz", user)),
        email_verified: true,
        login_generation,
    }
}

pub fn verified_context(user: &str, login_generation: i64) -> CartContext {
    CartContext::new(
        profile(),
        Some(AuthIdentity::Verified(account(user, login_generation))),
    )
}

#[derive(Default)]
pub struct InMemoryLocalCartStore {
    carts: Mutex<HashMap<BrowserProfile, Vec<LineItem>>>,
    fail_writes: AtomicBool,
}

impl InMemoryLocalCartStore {
    pub fn seed(&self, profile: &BrowserProfile, items: Vec<LineItem>) {
        self.carts.lock().unwrap().insert(profile.clone(), items);
    }

    pub fn items(&self, profile: &BrowserProfile) -> Vec<LineItem> {
        self.carts
            .lock()
            .unwrap()
            .get(profile)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::StorageError);
        }
        Ok(())
    }
}

#[async_trait]
impl LocalCartStore for InMemoryLocalCartStore {
    async fn load(&self, profile: &BrowserProfile) -> Result<Vec<LineItem>, RepositoryError> {
        Ok(self.items(profile))
    }

    async fn save(
        &self,
        profile: &BrowserProfile,
        items: &[LineItem],
    ) -> Result<(), RepositoryError> {
        self.check_write()?;
        self.seed(profile, items.to_vec());
        Ok(())
    }

    async fn remove(&self, profile: &BrowserProfile) -> Result<(), RepositoryError> {
        self.check_write()?;
        self.carts.lock().unwrap().remove(profile);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRemoteCartStore {
    carts: Mutex<HashMap<UserId, Cart>>,
    hub: CartChangeHub,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    batches: AtomicUsize,
}

impl InMemoryRemoteCartStore {
    pub fn seed(&self, user: &str, items: Vec<LineItem>) {
        self.carts
            .lock()
            .unwrap()
            .insert(UserId::new(user), Cart::from_items(items));
    }

    pub fn items(&self, user: &str) -> Vec<LineItem> {
        self.carts
            .lock()
            .unwrap()
            .get(&UserId::new(user))
            .map(|cart| cart.items().to_vec())
            .unwrap_or_default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of committed batch writes.
    pub fn batches(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }

    fn write<T>(
        &self,
        user_id: &UserId,
        change: impl FnOnce(&mut Cart) -> T,
    ) -> Result<T, RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::DatabaseError);
        }
        let result = {
            let mut carts = self.carts.lock().unwrap();
            change(carts.entry(user_id.clone()).or_default())
        };
        self.hub.publish(user_id);
        Ok(result)
    }
}

#[async_trait]
impl RemoteCartStore for InMemoryRemoteCartStore {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<LineItem>, RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::DatabaseError);
        }
        Ok(self.items(user_id.as_str()))
    }

    async fn save(&self, user_id: &UserId, item: &LineItem) -> Result<(), RepositoryError> {
        self.write(user_id, |cart| {
            let mut items = cart.items().to_vec();
            items.push(item.clone());
            *cart = Cart::from_items(items);
        })
    }

    async fn update_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        self.write(user_id, |cart| {
            let _ = cart.set_quantity(product_id, i64::from(quantity.get()));
        })
    }

    async fn delete(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError> {
        self.write(user_id, |cart| {
            cart.remove(product_id);
        })
    }

    async fn save_batch(
        &self,
        user_id: &UserId,
        items: &[LineItem],
    ) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::BatchFailed);
        }
        self.write(user_id, |cart| {
            let mut merged = cart.items().to_vec();
            merged.extend_from_slice(items);
            *cart = Cart::from_items(merged);
        })?;
        self.batches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        self.write(user_id, |cart| {
            let removed = cart.len() as u64;
            cart.clear();
            removed
        })
    }

    fn subscribe(&self, user_id: &UserId) -> CartSubscription {
        self.hub.subscribe(user_id)
    }
}

/// Ledger kept in a map: `false` while a merge runs, `true` once applied.
#[derive(Default)]
pub struct InMemoryMergeLedger {
    merges: Mutex<HashMap<MergeToken, bool>>,
    fail: AtomicBool,
}

impl InMemoryMergeLedger {
    pub fn is_applied(&self, token: &MergeToken) -> bool {
        self.merges.lock().unwrap().get(token) == Some(&true)
    }

    pub fn is_claimed(&self, token: &MergeToken) -> bool {
        self.merges.lock().unwrap().contains_key(token)
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::DatabaseError);
        }
        Ok(())
    }
}

#[async_trait]
impl MergeLedger for InMemoryMergeLedger {
    async fn claim(
        &self,
        token: &MergeToken,
        _user_id: &UserId,
    ) -> Result<MergeClaim, RepositoryError> {
        self.check()?;
        let mut merges = self.merges.lock().unwrap();
        Ok(match merges.get(token) {
            Some(true) => MergeClaim::AlreadyApplied,
            Some(false) => MergeClaim::InProgress,
            None => {
                merges.insert(token.clone(), false);
                MergeClaim::Granted
            }
        })
    }

    async fn mark_applied(&self, token: &MergeToken) -> Result<(), RepositoryError> {
        self.check()?;
        self.merges.lock().unwrap().insert(token.clone(), true);
        Ok(())
    }

    async fn release(&self, token: &MergeToken) -> Result<(), RepositoryError> {
        self.check()?;
        let mut merges = self.merges.lock().unwrap();
        if merges.get(token) == Some(&false) {
            merges.remove(token);
        }
        Ok(())
    }
}

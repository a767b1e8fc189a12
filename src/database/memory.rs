//! In-process stores used by the test suites in place of MongoDB.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{ProductStore, UserStore};
use crate::models::{NewProduct, NewUser, Product, ProductChanges, UpdateOutcome, User};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    writes: AtomicUsize,
}

impl MemoryUserStore {
    /// Successful inserts so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn remove(&self, id: &str) {
        self.users.lock().unwrap().retain(|u| u.id != id);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        // Check and insert under one lock, like a unique index.
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }

        let stored = User {
            id: ObjectId::new().to_hex(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
        };
        users.push(stored.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(stored)
    }
}

#[derive(Default)]
pub struct MemoryProductStore {
    products: Mutex<Vec<Product>>,
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, product: NewProduct) -> Result<Product, AppError> {
        let stored = Product {
            id: ObjectId::new().to_hex(),
            name: product.name,
            price: product.price,
            category: product.category,
            company: product.company,
            user_id: product.user_id,
        };
        self.products.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.products.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        Ok(self.products.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: &str, changes: &ProductChanges) -> Result<UpdateOutcome, AppError> {
        let mut products = self.products.lock().unwrap();
        Ok(match products.iter_mut().find(|p| p.id == id) {
            Some(product) => UpdateOutcome {
                matched_count: 1,
                modified_count: u64::from(changes.apply(product)),
            },
            None => UpdateOutcome { matched_count: 0, modified_count: 0 },
        })
    }

    async fn delete(&self, id: &str) -> Result<u64, AppError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok((before - products.len()) as u64)
    }

    async fn search(&self, key: &str) -> Result<Vec<Product>, AppError> {
        let pattern = regex::RegexBuilder::new(&regex::escape(key))
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::validation(e.to_string()))?;

        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                pattern.is_match(&p.name) || pattern.is_match(&p.company) || pattern.is_match(&p.category)
            })
            .cloned()
            .collect())
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Product>, AppError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ann".into(),
            email: email.into(),
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_insert_admits_one() {
        let store = Arc::new(MemoryUserStore::default());

        let (a, b) = tokio::join!(
            store.insert(new_user("ann@x.com")),
            store.insert(new_user("ann@x.com"))
        );

        assert!(a.is_ok() ^ b.is_ok());
        let rejected = if a.is_err() { a } else { b };
        assert!(matches!(rejected, Err(AppError::DuplicateEmail)));
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_email_match_is_case_sensitive() {
        let store = MemoryUserStore::default();
        store.insert(new_user("ann@x.com")).await.unwrap();

        assert!(store.find_by_email("ANN@x.com").await.unwrap().is_none());
        assert!(store.insert(new_user("ANN@x.com")).await.is_ok());
    }
}

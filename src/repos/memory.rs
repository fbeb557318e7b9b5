//! In-process user store.
//!
//! Used when no `DATABASE_URL` is configured, and by the test suites.
//! Every write takes the lock once, so check-then-insert is atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_repo::{UserRepository, UserRow};

type Key = (String, String);

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<HashMap<Key, UserRow>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn key(last_name: &str, first_name: &str) -> Key {
    (last_name.to_owned(), first_name.to_owned())
}

fn new_row(last_name: &str, first_name: &str, age: i32) -> UserRow {
    let now = Utc::now();
    UserRow {
        id: Uuid::new_v4(),
        last_name: last_name.to_owned(),
        first_name: first_name.to_owned(),
        age,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, last_name: &str, first_name: &str) -> RepoResult<Option<UserRow>> {
        Ok(self.rows.read().await.get(&key(last_name, first_name)).cloned())
    }

    async fn create(&self, last_name: &str, first_name: &str, age: i32) -> RepoResult<UserRow> {
        let mut rows = self.rows.write().await;
        let k = key(last_name, first_name);
        if rows.contains_key(&k) {
            return Err(RepoError::Conflict);
        }

        let row = new_row(last_name, first_name, age);
        rows.insert(k, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        last_name: &str,
        first_name: &str,
        age: i32,
    ) -> RepoResult<Option<UserRow>> {
        let mut rows = self.rows.write().await;
        let row = rows
            .entry(key(last_name, first_name))
            .and_modify(|row| {
                row.age = age;
                row.updated_at = Utc::now();
            })
            .or_insert_with(|| new_row(last_name, first_name, age));

        Ok(Some(row.clone()))
    }
}

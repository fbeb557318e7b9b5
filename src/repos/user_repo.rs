/*
 * Responsibility
 * - UserRepository: the interface handlers use to read/write users
 * - PgUserRepository: SQLx operations against the `users` table
 * - uniqueness of ("lastName", "firstName") is enforced by the table constraint
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    #[sqlx(rename = "lastName")]
    pub last_name: String,
    #[sqlx(rename = "firstName")]
    pub first_name: String,
    pub age: i32,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// User persistence keyed by (last_name, first_name).
///
/// Implementations must be safe to share across requests (`Arc<dyn UserRepository>`).
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn get(&self, last_name: &str, first_name: &str) -> RepoResult<Option<UserRow>>;

    // Returns `RepoError::Conflict` if the key already exists. Must be atomic:
    // two concurrent creates for one key produce one row and one Conflict.
    async fn create(&self, last_name: &str, first_name: &str, age: i32) -> RepoResult<UserRow>;

    // Upsert: sets age for the key, inserting the row when it is absent.
    async fn update(
        &self,
        last_name: &str,
        first_name: &str,
        age: i32,
    ) -> RepoResult<Option<UserRow>>;
}

#[derive(Debug, Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get(&self, last_name: &str, first_name: &str) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", "lastName", "firstName", age, "createdAt", "updatedAt"
            FROM users
            WHERE "lastName" = $1 AND "firstName" = $2
            "#,
        )
        .bind(last_name)
        .bind(first_name)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn create(&self, last_name: &str, first_name: &str, age: i32) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users ("lastName", "firstName", age)
            VALUES ($1, $2, $3)
            RETURNING "userId", "lastName", "firstName", age, "createdAt", "updatedAt"
            "#,
        )
        .bind(last_name)
        .bind(first_name)
        .bind(age)
        .fetch_one(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update(
        &self,
        last_name: &str,
        first_name: &str,
        age: i32,
    ) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users ("lastName", "firstName", age)
            VALUES ($1, $2, $3)
            ON CONFLICT ("lastName", "firstName")
            DO UPDATE SET age = EXCLUDED.age, "updatedAt" = now()
            RETURNING "userId", "lastName", "firstName", age, "createdAt", "updatedAt"
            "#,
        )
        .bind(last_name)
        .bind(first_name)
        .bind(age)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }
}

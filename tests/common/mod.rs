//! Shared fixtures for router-level tests.
#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use users_api::app::build_router;
use users_api::repos::error::{RepoError, RepoResult};
use users_api::repos::{InMemoryUserRepository, UserRepository, UserRow};
use users_api::services::auth::{TokenCheck, TokenValidator};
use users_api::state::AppState;

/// Validator returning a fixed outcome and recording every credential it saw.
pub struct StubValidator {
    outcome: TokenCheck,
    seen: Mutex<Vec<String>>,
}

impl StubValidator {
    pub fn new(outcome: TokenCheck) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenValidator for StubValidator {
    async fn check(&self, credential: &str) -> TokenCheck {
        self.seen.lock().unwrap().push(credential.to_owned());
        self.outcome
    }
}

/// In-memory repository that counts every call made through the trait.
#[derive(Default)]
pub struct CountingRepo {
    pub inner: InMemoryUserRepository,
    calls: AtomicUsize,
}

impl CountingRepo {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for CountingRepo {
    async fn get(&self, last_name: &str, first_name: &str) -> RepoResult<Option<UserRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(last_name, first_name).await
    }

    async fn create(&self, last_name: &str, first_name: &str, age: i32) -> RepoResult<UserRow> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create(last_name, first_name, age).await
    }

    async fn update(
        &self,
        last_name: &str,
        first_name: &str,
        age: i32,
    ) -> RepoResult<Option<UserRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update(last_name, first_name, age).await
    }
}

/// How a `ScriptedRepo` answers one operation.
#[derive(Clone, Copy, Debug)]
pub enum Reply {
    /// `Ok(None)` (or a synthesized row for `create`)
    Nothing,
    /// `Ok(Some(row))` built from the call arguments
    Row,
    Conflict,
    /// `Err(RepoError::Db(..))`
    DbFailure,
}

/// Repository with fixed answers, for the error arms an in-memory store never takes.
pub struct ScriptedRepo {
    pub get: Reply,
    pub create: Reply,
    pub update: Reply,
}

fn scripted_row(last_name: &str, first_name: &str, age: i32) -> UserRow {
    let now = chrono::Utc::now();
    UserRow {
        id: uuid::Uuid::new_v4(),
        last_name: last_name.to_owned(),
        first_name: first_name.to_owned(),
        age,
        created_at: now,
        updated_at: now,
    }
}

fn db_failure() -> RepoError {
    RepoError::Db(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl UserRepository for ScriptedRepo {
    async fn get(&self, last_name: &str, first_name: &str) -> RepoResult<Option<UserRow>> {
        match self.get {
            Reply::Nothing => Ok(None),
            Reply::Row => Ok(Some(scripted_row(last_name, first_name, 1))),
            Reply::Conflict => Err(RepoError::Conflict),
            Reply::DbFailure => Err(db_failure()),
        }
    }

    async fn create(&self, last_name: &str, first_name: &str, age: i32) -> RepoResult<UserRow> {
        match self.create {
            Reply::Nothing | Reply::Row => Ok(scripted_row(last_name, first_name, age)),
            Reply::Conflict => Err(RepoError::Conflict),
            Reply::DbFailure => Err(db_failure()),
        }
    }

    async fn update(
        &self,
        last_name: &str,
        first_name: &str,
        age: i32,
    ) -> RepoResult<Option<UserRow>> {
        match self.update {
            Reply::Nothing => Ok(None),
            Reply::Row => Ok(Some(scripted_row(last_name, first_name, age))),
            Reply::Conflict => Err(RepoError::Conflict),
            Reply::DbFailure => Err(db_failure()),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<CountingRepo>,
    pub validator: Arc<StubValidator>,
}

impl TestApp {
    pub fn new(outcome: TokenCheck) -> Self {
        let repo = CountingRepo::new();
        let validator = StubValidator::new(outcome);
        let state = AppState::new(repo.clone(), validator.clone());
        let router = build_router(state, Duration::from_secs(30));

        Self {
            router,
            repo,
            validator,
        }
    }

    /// Accepting authority in front of a `ScriptedRepo`. `repo` stays an empty
    /// counting repo and is not wired in.
    pub fn scripted(repo: ScriptedRepo) -> Self {
        let validator = StubValidator::new(TokenCheck::Valid);
        let state = AppState::new(Arc::new(repo), validator.clone());
        let router = build_router(state, Duration::from_secs(30));

        Self {
            router,
            repo: CountingRepo::new(),
            validator,
        }
    }

    pub fn accepting() -> Self {
        Self::new(TokenCheck::Valid)
    }

    /// Sends one request. The body is `Value::Null` when empty.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        credential: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(credential) = credential {
            builder = builder.header(header::AUTHORIZATION, credential);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }
}

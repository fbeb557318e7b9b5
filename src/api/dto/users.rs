/*
 * Responsibility
 * - Users request/response DTO
 * - validate() does the shape checks (required age, non-blank names)
 */
use serde::{Deserialize, Serialize};

use crate::repos::UserRow;

/// Path segments of `/users/{last_name}/{first_name}`.
#[derive(Debug, Deserialize)]
pub struct UserPath {
    pub last_name: String,
    pub first_name: String,
}

impl UserPath {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.last_name.trim().is_empty() {
            return Err("last_name is required");
        }
        if self.first_name.trim().is_empty() {
            return Err("first_name is required");
        }
        Ok(())
    }
}

/// Body of both POST and PUT.
#[derive(Debug, Deserialize)]
pub struct UserAgeRequest {
    // Option so a missing field reaches validate() instead of failing in serde.
    pub age: Option<i32>,
}

impl UserAgeRequest {
    pub fn validate(&self) -> Result<i32, &'static str> {
        match self.age {
            None => Err("age is required"),
            Some(age) if age < 0 => Err("age must be a non-negative integer"),
            Some(age) => Ok(age),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub last_name: String,
    pub first_name: String,
    pub age: i32,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            last_name: row.last_name,
            first_name: row.first_name,
            age: row.age,
        }
    }
}

/// `{"user": {...}}`
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

impl From<UserRow> for UserEnvelope {
    fn from(row: UserRow) -> Self {
        Self { user: row.into() }
    }
}

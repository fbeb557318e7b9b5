/*
 * Responsibility
 * - shared context bound to the Router (AppState)
 *   - users: UserRepository, tokens: TokenValidator
 * - meant to be cloned per request (Arc inside)
 */
use std::sync::Arc;

use crate::repos::UserRepository;
use crate::services::auth::TokenValidator;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenValidator>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenValidator>) -> Self {
        Self { users, tokens }
    }
}

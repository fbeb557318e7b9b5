/*
 * Responsibility
 * - persistence boundary for users (trait + Postgres / in-memory backends)
 */
pub mod error;
pub mod memory;
pub mod user_repo;

pub use memory::InMemoryUserRepository;
pub use user_repo::{PgUserRepository, UserRepository, UserRow};

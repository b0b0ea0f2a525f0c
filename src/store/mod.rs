//! Persistence for users and tasks.
//!
//! Handlers only talk to the [`Store`] trait. Two implementations exist:
//! [`PgStore`] backed by a single per-process Postgres pool, and
//! [`MemoryStore`] for tests and for running without a database.
//!
//! Reads always go to the backing store; nothing is cached between requests,
//! so the ownership check in [`TaskStore::update_owned`] and
//! [`TaskStore::delete_owned`] is evaluated against current data.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, Task, TaskChanges, User, UserUpdate};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Credential store.
///
/// Lookups return `Ok(None)` when nothing matches; callers decide which
/// "not found" error that becomes.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Inserts a new user. Fails with `AppError::DuplicateEmail` if the
    /// email is already registered.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    /// Applies `update` and returns the updated user, or `None` if `id` is unknown.
    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<Option<User>, AppError>;
}

/// Task store. Every mutation is scoped by owner in a single atomic step.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks owned by `owner`, oldest first.
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Task>, AppError>;

    /// Creates a "Pending" task owned by `owner`.
    async fn insert(&self, owner: Uuid, title: String) -> Result<Task, AppError>;

    /// Updates the task matching both `id` and `owner`. Returns `None` when
    /// no such task exists, which is also the answer for another user's task.
    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: TaskChanges,
    ) -> Result<Option<Task>, AppError>;

    /// Deletes the task matching both `id` and `owner`; `false` if none did.
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool, AppError>;
}

/// The full backing store shared by all handlers.
#[async_trait]
pub trait Store: UserStore + TaskStore {
    /// Cheap round trip used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}

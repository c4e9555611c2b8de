//! Repositories for document-store operations
//!
//! Handlers talk to the [`UserStore`] and [`TodoStore`] traits. The MongoDB
//! implementations live in [`user`] and [`todo`]; [`memory`] keeps everything
//! in process and is what the router tests run against.

use async_trait::async_trait;
use common::error::DatabaseResult;
use mongodb::bson::oid::ObjectId;

use crate::models::{Todo, TodoChanges, TodoFilter, User};

#[cfg(test)]
pub mod memory;
pub mod todo;
pub mod user;

pub use todo::TodoRepository;
pub use user::UserRepository;

/// Persistence operations on the `users` collection
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether a user with this username already exists
    async fn username_exists(&self, username: &str) -> DatabaseResult<bool>;

    /// Insert a new user
    ///
    /// Fails with `DatabaseError::Duplicate` if the store itself rejects the
    /// username as taken.
    async fn insert(&self, user: &User) -> DatabaseResult<()>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;
}

/// Persistence operations on the `todos` collection
///
/// Every method that reads or mutates an existing todo takes the owner, so
/// ownership is part of the filter rather than a check after the fetch.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Todos matching `filter`, sorted by deadline ascending
    async fn list(&self, filter: &TodoFilter) -> DatabaseResult<Vec<Todo>>;

    /// Insert a new todo
    async fn insert(&self, todo: &Todo) -> DatabaseResult<()>;

    /// Apply `changes` to the todo with this id and owner
    ///
    /// Returns the post-update document, or `None` when nothing matched.
    async fn update(
        &self,
        id: ObjectId,
        owner: ObjectId,
        changes: &TodoChanges,
    ) -> DatabaseResult<Option<Todo>>;

    /// Delete the todo with this id and owner, returning whether one was removed
    async fn delete(&self, id: ObjectId, owner: ObjectId) -> DatabaseResult<bool>;
}

//! In-process stores with the same semantics as the MongoDB repositories

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{TodoStore, UserStore};
use crate::models::{Todo, TodoChanges, TodoFilter, User};

/// User store that enforces username uniqueness like the unique index does
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn username_exists(&self, username: &str) -> DatabaseResult<bool> {
        let users = self.users.read().await;
        Ok(users.iter().any(|user| user.username == username))
    }

    async fn insert(&self, user: &User) -> DatabaseResult<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.username == user.username) {
            return Err(DatabaseError::Duplicate(format!(
                "username {} already exists",
                user.username
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.username == username).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoStore {
    /// Every stored todo regardless of owner
    pub async fn all(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }
}

fn apply_changes(todo: &mut Todo, changes: &TodoChanges) {
    if let Some(title) = &changes.title {
        todo.title = title.clone();
    }
    if let Some(description) = &changes.description {
        todo.description = Some(description.clone());
    }
    if let Some(priority) = changes.priority {
        todo.priority = priority;
    }
    if let Some(status) = changes.status {
        todo.status = status;
    }
    if let Some(deadline) = &changes.deadline {
        todo.deadline = Some(deadline.clone());
    }
    if let Some(tags) = &changes.tags {
        todo.tags = tags.clone();
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn list(&self, filter: &TodoFilter) -> DatabaseResult<Vec<Todo>> {
        let todos = self.todos.read().await;
        let mut matching: Vec<Todo> = todos
            .iter()
            .filter(|todo| filter.matches(todo))
            .cloned()
            .collect();
        // Missing deadlines sort first, as null does in MongoDB
        matching.sort_by(|a, b| a.deadline.cmp(&b.deadline));
        Ok(matching)
    }

    async fn insert(&self, todo: &Todo) -> DatabaseResult<()> {
        self.todos.write().await.push(todo.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: ObjectId,
        owner: ObjectId,
        changes: &TodoChanges,
    ) -> DatabaseResult<Option<Todo>> {
        let mut todos = self.todos.write().await;
        let updated = todos
            .iter_mut()
            .find(|todo| todo.id == id && todo.user_id == owner)
            .map(|todo| {
                apply_changes(todo, changes);
                todo.clone()
            });
        Ok(updated)
    }

    async fn delete(&self, id: ObjectId, owner: ObjectId) -> DatabaseResult<bool> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|todo| !(todo.id == id && todo.user_id == owner));
        Ok(todos.len() < before)
    }
}

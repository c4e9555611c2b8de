//! User repository backed by MongoDB

use async_trait::async_trait;
use common::{database::with_timeout, error::DatabaseResult};
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use std::time::Duration;
use tracing::info;

use super::UserStore;
use crate::models::User;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
    timeout: Duration,
}

impl UserRepository {
    /// Create a new user repository over the `users` collection
    pub fn new(database: &Database, timeout: Duration) -> Self {
        Self {
            collection: database.collection("users"),
            timeout,
        }
    }

    /// Create the unique index on `username`
    pub async fn ensure_indexes(&self) -> DatabaseResult<()> {
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        with_timeout(self.timeout, self.collection.create_index(username_index)).await?;
        info!("Ensured unique index on users.username");
        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn username_exists(&self, username: &str) -> DatabaseResult<bool> {
        let count = with_timeout(
            self.timeout,
            self.collection
                .count_documents(doc! { "username": username }),
        )
        .await?;

        Ok(count > 0)
    }

    async fn insert(&self, user: &User) -> DatabaseResult<()> {
        info!("Creating new user: {}", user.username);
        with_timeout(self.timeout, self.collection.insert_one(user)).await?;
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        with_timeout(
            self.timeout,
            self.collection.find_one(doc! { "username": username }),
        )
        .await
    }
}

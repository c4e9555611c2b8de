//! Todo repository backed by MongoDB

use async_trait::async_trait;
use common::{database::with_timeout, error::DatabaseResult};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use std::time::Duration;
use tracing::info;

use super::TodoStore;
use crate::models::{Todo, TodoChanges, TodoFilter};

/// Todo repository
#[derive(Clone)]
pub struct TodoRepository {
    collection: Collection<Todo>,
    timeout: Duration,
}

impl TodoRepository {
    /// Create a new todo repository over the `todos` collection
    pub fn new(database: &Database, timeout: Duration) -> Self {
        Self {
            collection: database.collection("todos"),
            timeout,
        }
    }

    /// Create the owner index every query filters on
    pub async fn ensure_indexes(&self) -> DatabaseResult<()> {
        let owner_index = IndexModel::builder().keys(doc! { "userId": 1 }).build();

        with_timeout(self.timeout, self.collection.create_index(owner_index)).await?;
        info!("Ensured index on todos.userId");
        Ok(())
    }
}

/// Filter selecting one todo, and only if `owner` owns it
pub fn owned_todo(id: ObjectId, owner: ObjectId) -> Document {
    doc! { "_id": id, "userId": owner }
}

#[async_trait]
impl TodoStore for TodoRepository {
    async fn list(&self, filter: &TodoFilter) -> DatabaseResult<Vec<Todo>> {
        let query = async {
            let cursor = self
                .collection
                .find(filter.to_document())
                .sort(doc! { "deadline": 1 })
                .await?;
            cursor.try_collect::<Vec<_>>().await
        };

        with_timeout(self.timeout, query).await
    }

    async fn insert(&self, todo: &Todo) -> DatabaseResult<()> {
        with_timeout(self.timeout, self.collection.insert_one(todo)).await?;
        Ok(())
    }

    async fn update(
        &self,
        id: ObjectId,
        owner: ObjectId,
        changes: &TodoChanges,
    ) -> DatabaseResult<Option<Todo>> {
        let filter = owned_todo(id, owner);

        // `$set` rejects an empty document
        if changes.is_empty() {
            return with_timeout(self.timeout, self.collection.find_one(filter)).await;
        }

        with_timeout(
            self.timeout,
            self.collection
                .find_one_and_update(filter, doc! { "$set": changes.to_set_document() })
                .return_document(ReturnDocument::After),
        )
        .await
    }

    async fn delete(&self, id: ObjectId, owner: ObjectId) -> DatabaseResult<bool> {
        let result = with_timeout(
            self.timeout,
            self.collection.delete_one(owned_todo(id, owner)),
        )
        .await?;

        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_todo_filter_binds_id_and_owner() {
        let id = ObjectId::new();
        let owner = ObjectId::new();

        let filter = owned_todo(id, owner);
        assert_eq!(filter, doc! { "_id": id, "userId": owner });
        assert_eq!(filter.get_object_id("userId").unwrap(), owner);
        assert_eq!(filter.len(), 2);
    }
}

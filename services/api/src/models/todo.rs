//! Todo model, request payloads, and the filter/update builders

use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Todo priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err("Priority must be one of: low, medium, high".to_string()),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Todo status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Status::Pending),
            "in-progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            _ => Err("Status must be one of: pending, in-progress, completed".to_string()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Todo document as stored in the `todos` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "userId")]
    pub user_id: ObjectId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    /// Caller-supplied date string, sorted lexicographically
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Todo {
    /// Build a todo owned by `owner` with a freshly generated id
    pub fn new(owner: ObjectId, new_todo: NewTodo) -> Self {
        Self {
            id: ObjectId::new(),
            user_id: owner,
            title: new_todo.title,
            description: new_todo.description,
            priority: new_todo.priority,
            status: new_todo.status,
            deadline: new_todo.deadline,
            tags: new_todo.tags,
        }
    }
}

/// Validated todo fields, before an owner and id are bound
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub deadline: Option<String>,
    pub tags: Vec<String>,
}

/// Todo as returned by the API, ids rendered as hex strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.to_hex(),
            user_id: todo.user_id.to_hex(),
            title: todo.title,
            description: todo.description,
            priority: todo.priority,
            status: todo.status,
            deadline: todo.deadline,
            tags: todo.tags,
        }
    }
}

/// Request body for creating a todo
///
/// Enumerations arrive as strings so an unknown value is reported as a
/// validation error rather than a body parse failure. Any `id` or `userId`
/// the caller sends is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl CreateTodoRequest {
    pub fn validate(self) -> Result<NewTodo, String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }

        let priority = self.priority.as_deref().unwrap_or_default().parse()?;
        let status = self.status.as_deref().unwrap_or_default().parse()?;

        Ok(NewTodo {
            title: self.title,
            description: non_empty(self.description),
            priority,
            status,
            deadline: non_empty(self.deadline),
            tags: self.tags.unwrap_or_default(),
        })
    }
}

/// Request body for a partial update
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl UpdateTodoRequest {
    /// Keep only the fields that are present and non-empty
    ///
    /// An empty string or an empty tag list means "leave unchanged", not
    /// "clear". Non-empty enumeration values must still be valid, and a
    /// whitespace-only title is rejected as it is on create.
    pub fn into_changes(self) -> Result<TodoChanges, String> {
        let title = non_empty(self.title);
        if title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err("Title is required".to_string());
        }

        let priority = non_empty(self.priority)
            .map(|value| value.parse::<Priority>())
            .transpose()?;
        let status = non_empty(self.status)
            .map(|value| value.parse::<Status>())
            .transpose()?;

        Ok(TodoChanges {
            title,
            description: non_empty(self.description),
            priority,
            status,
            deadline: non_empty(self.deadline),
            tags: self.tags.filter(|tags| !tags.is_empty()),
        })
    }
}

/// Fields a partial update will overwrite
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub deadline: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        *self == TodoChanges::default()
    }

    /// Body of the `$set` operator for this update
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(title) = &self.title {
            set.insert("title", title.as_str());
        }
        if let Some(description) = &self.description {
            set.insert("description", description.as_str());
        }
        if let Some(priority) = self.priority {
            set.insert("priority", priority.as_str());
        }
        if let Some(status) = self.status {
            set.insert("status", status.as_str());
        }
        if let Some(deadline) = &self.deadline {
            set.insert("deadline", deadline.as_str());
        }
        if let Some(tags) = &self.tags {
            set.insert(
                "tags",
                tags.iter().cloned().map(Bson::String).collect::<Vec<_>>(),
            );
        }
        set
    }
}

/// Query parameters for listing todos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoQuery {
    pub priority: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub tags: Option<String>,
}

/// Owner-scoped filter for listing todos
///
/// Every filter carries the owner; there is no way to build one without it.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoFilter {
    pub owner: ObjectId,
    /// Exact match on the stored priority string
    pub priority: Option<String>,
    /// Exact match on the stored status string
    pub status: Option<String>,
    /// Case-insensitive literal substring of the title
    pub search: Option<String>,
    /// A single tag the todo must carry
    pub tag: Option<String>,
}

impl TodoFilter {
    pub fn new(owner: ObjectId, query: TodoQuery) -> Self {
        Self {
            owner,
            priority: non_empty(query.priority),
            status: non_empty(query.status),
            search: non_empty(query.search),
            tag: non_empty(query.tags),
        }
    }

    /// Only the owner, no other constraints
    pub fn for_owner(owner: ObjectId) -> Self {
        Self::new(owner, TodoQuery::default())
    }

    pub fn to_document(&self) -> Document {
        let mut filter = doc! { "userId": self.owner };
        if let Some(priority) = &self.priority {
            filter.insert("priority", priority.as_str());
        }
        if let Some(status) = &self.status {
            filter.insert("status", status.as_str());
        }
        if let Some(search) = &self.search {
            filter.insert(
                "title",
                doc! { "$regex": regex::escape(search), "$options": "i" },
            );
        }
        if let Some(tag) = &self.tag {
            filter.insert("tags", doc! { "$in": [tag.as_str()] });
        }
        filter
    }

    /// Evaluate the filter against a todo held in memory
    pub fn matches(&self, todo: &Todo) -> bool {
        if todo.user_id != self.owner {
            return false;
        }
        if let Some(priority) = &self.priority {
            if todo.priority.as_str() != priority {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if todo.status.as_str() != status {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !todo.title.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !todo.tags.contains(tag) {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

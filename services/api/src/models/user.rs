//! User model and related payloads

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document as stored in the `users` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    /// Argon2 PHC string, never the plaintext
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: ObjectId::new(),
            username,
            password_hash,
        }
    }
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username.clone(),
        }
    }
}

/// Request for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response for user registration
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Request for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response for user login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_hides_password_hash() {
        let user = User::new("alice".to_string(), "$argon2id$v=19$hash".to_string());
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert_eq!(json["id"], user.id.to_hex());
        assert_eq!(json["username"], "alice");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_register_request_missing_fields_default_to_empty() {
        let request: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(request.username.is_empty());
        assert!(request.password.is_empty());
    }
}

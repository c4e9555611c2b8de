//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    jwt::JwtService,
    repositories::{TodoStore, UserStore},
};

/// Application state shared across handlers
///
/// Everything in here is established once at startup and only read
/// afterwards.
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub todo_store: Arc<dyn TodoStore>,
    pub jwt_service: JwtService,
}

impl AppState {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        todo_store: Arc<dyn TodoStore>,
        jwt_service: JwtService,
    ) -> Self {
        Self {
            user_store,
            todo_store,
            jwt_service,
        }
    }
}

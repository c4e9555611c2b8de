//! API models for request and response payloads

pub mod todo;
pub mod user;

pub use todo::{
    CreateTodoRequest, NewTodo, Priority, Status, Todo, TodoChanges, TodoFilter, TodoQuery,
    TodoResponse, UpdateTodoRequest,
};
pub use user::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User, UserResponse};

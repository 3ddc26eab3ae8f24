/// User domain types
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// User account as exposed to clients (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub fullname: String,
}

/// Data for registering a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub username: String,
    /// Plain-text password; hashed before it reaches storage
    pub password: String,
    pub fullname: String,
}

/// Username/password pair presented at login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

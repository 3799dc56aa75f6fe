//! Authentication models

use serde::{Deserialize, Serialize};
use std::fmt;

/// User roles for authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Administrator - sees user management
    Admin,
    /// Workshop employee
    Employee,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "Admin"),
            UserRole::Employee => write!(f, "Employee"),
        }
    }
}

/// Seed entry checked at login. The password is stored and compared in plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: u32,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "Active".to_string()
}

impl CredentialRecord {
    /// Strip the secret, leaving the client-visible profile
    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            status: self.status.clone(),
        }
    }
}

/// Client-visible identity of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u32,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub status: String,
}

impl Profile {
    /// Check if user is admin
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Login credentials. Both fields are optional on the wire so an
/// incomplete body can be answered with a 400 instead of a rejection.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Both fields, if present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let email = self.email.as_deref().filter(|e| !e.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((email, password))
    }
}

/// Login response with token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: Profile,
    pub token: String,
}

/// Error payload returned by the JSON API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

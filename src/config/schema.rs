//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::auth::credentials::CredentialStore;
use crate::auth::guard::DEFAULT_PROTECTED_PREFIXES;
use crate::auth::models::CredentialRecord;
use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub client: ClientConfig,

    /// Seed accounts; the demo accounts are used when empty
    #[serde(default)]
    pub users: Vec<CredentialRecord>,
}

/// Server configuration for the HTTP app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3456
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Route protection and session cookie names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Where a successful form login lands
    #[serde(default = "default_home_path")]
    pub home_path: String,

    #[serde(default = "default_protected_prefixes")]
    pub protected_prefixes: Vec<String>,

    #[serde(default = "default_token_cookie")]
    pub token_cookie: String,

    #[serde(default = "default_user_cookie")]
    pub user_cookie: String,
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_home_path() -> String {
    "/dashboard".to_string()
}

fn default_protected_prefixes() -> Vec<String> {
    DEFAULT_PROTECTED_PREFIXES
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_token_cookie() -> String {
    "token".to_string()
}

fn default_user_cookie() -> String {
    "user".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            home_path: default_home_path(),
            protected_prefixes: default_protected_prefixes(),
            token_cookie: default_token_cookie(),
            user_cookie: default_user_cookie(),
        }
    }
}

/// Settings for the CLI acting as a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

fn default_server_url() -> String {
    "http://127.0.0.1:3456".to_string()
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".forgedesk/session.json")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            session_file: default_session_file(),
        }
    }
}

impl Config {
    /// Credential store from the configured users, or the demo accounts
    pub fn credential_store(&self) -> Result<CredentialStore> {
        if self.users.is_empty() {
            Ok(CredentialStore::demo())
        } else {
            CredentialStore::new(self.users.clone())
        }
    }
}

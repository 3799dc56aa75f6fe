//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "forgedesk.toml";

/// Load configuration from forgedesk.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load forgedesk.toml if one exists, defaults otherwise
pub fn load_or_default() -> Result<Config> {
    match load_config() {
        Ok(config) => Ok(config),
        Err(Error::ConfigNotFound) => {
            tracing::info!("No {} found, using defaults", CONFIG_FILENAME);
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# forgedesk configuration

[server]
host = "0.0.0.0"
port = 3456

[auth]
login_path = "/login"
home_path = "/dashboard"
token_cookie = "token"
user_cookie = "user"
protected_prefixes = [
    "/dashboard",
    "/admin",
    "/projects",
    "/orders",
    "/customer-statements",
    "/finances",
    "/my-tasks",
    "/inventory",
    "/performance",
    "/quotes",
    "/employees",
    "/clients",
]

[client]
server_url = "${FORGEDESK_URL:-http://127.0.0.1:3456}"
session_file = ".forgedesk/session.json"

# Seed accounts. Leave empty to use the two demo accounts.
# Passwords are compared in plain text: do not reuse real ones here.
# [[users]]
# id = 1
# email = "admin@elegantsteelhw.com"
# password = "${ADMIN_PASSWORD:-password123}"
# name = "Admin User"
# role = "Admin"
# status = "Active"
"#
}

//! Client-side session storage and the per-render session snapshot

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::auth::guard::{Access, Guard, SessionSignal};
use crate::auth::middleware::SessionEvidence;
use crate::auth::models::{LoginResponse, Profile};
use crate::error::Result;

/// Storage key holding the serialized profile
pub const USER_KEY: &str = "user";
/// Storage key holding the raw session token
pub const TOKEN_KEY: &str = "token";

/// Persistent key/value storage on the client side
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// JSON file on disk holding a flat string map. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> HashMap<String, String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::warn!("Cannot read session file {}: {}", self.path.display(), e);
                return HashMap::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
            HashMap::new()
        })
    }

    fn save(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(values)?)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.load();
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut values = self.load();
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

/// Where the client should go next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    To(String),
}

/// Read-once view of the session, passed explicitly to whatever renders
/// or authorizes against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub user: Option<Profile>,
    pub token: Option<String>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build the snapshot from cookie/header evidence on the server side
    pub fn from_evidence(evidence: &SessionEvidence) -> Self {
        Self {
            user: evidence.user.as_deref().and_then(decode_cookie_profile),
            token: evidence.token.clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(Profile::is_admin)
    }
}

impl SessionSignal for SessionContext {
    fn has_session(&self) -> bool {
        self.is_authenticated()
    }
}

/// Typed decode of a stored profile; any failure reads as "no user"
pub fn decode_profile(raw: &str) -> Option<Profile> {
    match serde_json::from_str(raw) {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::warn!("Discarding stored profile that does not decode: {}", e);
            None
        }
    }
}

/// Cookie values carry the profile percent-encoded
pub fn decode_cookie_profile(raw: &str) -> Option<Profile> {
    let decoded = urlencoding::decode(raw).ok()?;
    decode_profile(&decoded)
}

/// Session accessor over a client store
#[derive(Debug, Clone)]
pub struct ClientSession<S: SessionStore> {
    store: S,
    login_path: String,
}

impl<S: SessionStore> ClientSession<S> {
    pub fn new(store: S, login_path: impl Into<String>) -> Self {
        Self {
            store,
            login_path: login_path.into(),
        }
    }

    pub fn get_user(&self) -> Option<Profile> {
        self.store.get(USER_KEY).and_then(|raw| decode_profile(&raw))
    }

    pub fn get_token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    /// Existence of both values; contents are not validated
    pub fn is_authenticated(&self) -> bool {
        self.get_user().is_some() && self.get_token().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.get_user().is_some_and(|u| u.is_admin())
    }

    /// Store a successful login
    pub fn persist(&mut self, login: &LoginResponse) -> Result<()> {
        self.store
            .set(USER_KEY, &serde_json::to_string(&login.user)?)?;
        self.store.set(TOKEN_KEY, &login.token)?;
        Ok(())
    }

    /// Drop both stored values and head to the login route
    pub fn logout(&mut self) -> Navigation {
        for key in [USER_KEY, TOKEN_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!("Failed to clear '{}' from session store: {}", key, e);
            }
        }
        Navigation::To(self.login_path.clone())
    }

    pub fn snapshot(&self) -> SessionContext {
        SessionContext {
            user: self.get_user(),
            token: self.get_token(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Page-mount check: `Some` navigation when the page must not render
pub fn require_session(ctx: &SessionContext, guard: &Guard, path: &str) -> Option<Navigation> {
    match guard.check(path, ctx) {
        Access::Allow => None,
        Access::Redirect(to) => Some(Navigation::To(to)),
    }
}

//! Route classification and the access decision
//!
//! Both the HTTP middleware and the page-level session check go through
//! [`Guard::check`]. What counts as "having a session" is supplied by the
//! caller's snapshot through [`SessionSignal`]; the decision itself lives
//! only here.

use crate::config::AuthConfig;

/// Protected prefixes used when the config does not override them
pub const DEFAULT_PROTECTED_PREFIXES: &[&str] = &[
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
];

/// Whether a path needs a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Protected,
    Public,
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Request proceeds unmodified
    Allow,
    /// Send the client to the given login route
    Redirect(String),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// Anything that can answer "is there a session here?"
pub trait SessionSignal {
    fn has_session(&self) -> bool;
}

/// Ordered list of protected path prefixes
#[derive(Debug, Clone)]
pub struct RouteTable {
    prefixes: Vec<String>,
}

impl RouteTable {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// A prefix covers itself and its subpaths (`/admin`, `/admin/...`),
    /// not lookalikes such as `/adminx`. Anything unmatched is public.
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.prefixes.iter().any(|p| covers(p, path)) {
            RouteClass::Protected
        } else {
            RouteClass::Public
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

fn covers(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(DEFAULT_PROTECTED_PREFIXES.iter().copied())
    }
}

/// The single authorization decision
pub fn authorize(class: RouteClass, has_session: bool, login_path: &str) -> Access {
    match class {
        RouteClass::Public => Access::Allow,
        RouteClass::Protected if has_session => Access::Allow,
        RouteClass::Protected => Access::Redirect(login_path.to_string()),
    }
}

/// Route table plus the login route denied requests are sent to
#[derive(Debug, Clone)]
pub struct Guard {
    routes: RouteTable,
    login_path: String,
}

impl Guard {
    pub fn new(routes: RouteTable, login_path: impl Into<String>) -> Self {
        Self {
            routes,
            login_path: login_path.into(),
        }
    }

    pub fn from_config(auth: &AuthConfig) -> Self {
        Self::new(
            RouteTable::new(auth.protected_prefixes.iter().cloned()),
            auth.login_path.clone(),
        )
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        self.routes.classify(path)
    }

    /// Decide whether `path` may proceed given the caller's session snapshot
    pub fn check(&self, path: &str, session: &impl SessionSignal) -> Access {
        authorize(self.classify(path), session.has_session(), &self.login_path)
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self::new(RouteTable::default(), "/login")
    }
}

//! Route guard middleware and request session evidence

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::server::SharedState;
use crate::auth::guard::{Access, SessionSignal};
use crate::config::AuthConfig;
use crate::error::Error;

/// Session indicators found on a request. Only presence is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionEvidence {
    pub token: Option<String>,
    pub user: Option<String>,
}

impl SessionEvidence {
    /// Token from the token cookie, falling back to the Authorization header;
    /// profile from the user cookie
    pub fn from_headers(headers: &HeaderMap, auth: &AuthConfig) -> Self {
        let token =
            cookie_value(headers, &auth.token_cookie).or_else(|| authorization_token(headers));
        let user = cookie_value(headers, &auth.user_cookie);
        Self { token, user }
    }
}

impl SessionSignal for SessionEvidence {
    fn has_session(&self) -> bool {
        self.token.is_some() || self.user.is_some()
    }
}

/// Value of the named cookie across all Cookie headers. Empty values count as absent.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Any non-empty Authorization value counts, minus a leading `Bearer `
fn authorization_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim_start();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Middleware redirecting session-less requests on protected paths to login
pub async fn route_guard(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, Error> {
    let path = req.uri().path().to_string();
    let evidence = SessionEvidence::from_headers(req.headers(), &state.config.auth);

    match state.guard.check(&path, &evidence) {
        Access::Allow => Ok(next.run(req).await),
        Access::Redirect(login_path) => {
            tracing::debug!("No session for protected path {}, redirecting", path);
            Err(Error::MissingSession(login_path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_no_evidence() {
        let evidence = SessionEvidence::from_headers(&HeaderMap::new(), &AuthConfig::default());
        assert_eq!(evidence, SessionEvidence::default());
        assert!(!evidence.has_session());
    }

    #[test]
    fn test_token_cookie() {
        let map = headers(&[(header::COOKIE, "theme=dark; token=eyJ1c2VySWQiOjF9")]);
        let evidence = SessionEvidence::from_headers(&map, &AuthConfig::default());
        assert_eq!(evidence.token.as_deref(), Some("eyJ1c2VySWQiOjF9"));
        assert!(evidence.has_session());
    }

    #[test]
    fn test_bearer_header() {
        let map = headers(&[(header::AUTHORIZATION, "Bearer abc123")]);
        let evidence = SessionEvidence::from_headers(&map, &AuthConfig::default());
        assert_eq!(evidence.token.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_cookie_wins_over_bearer() {
        let map = headers(&[
            (header::AUTHORIZATION, "Bearer from-header"),
            (header::COOKIE, "token=from-cookie"),
        ]);
        let evidence = SessionEvidence::from_headers(&map, &AuthConfig::default());
        assert_eq!(evidence.token.as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_user_cookie_alone_counts() {
        let map = headers(&[(header::COOKIE, "user=%7B%7D")]);
        let evidence = SessionEvidence::from_headers(&map, &AuthConfig::default());
        assert!(evidence.token.is_none());
        assert!(evidence.has_session());
    }

    #[test]
    fn test_empty_and_lookalike_cookies_ignored() {
        let map = headers(&[
            (header::COOKIE, "token=; xtoken=abc"),
            (header::COOKIE, "usertoken=1"),
        ]);
        let evidence = SessionEvidence::from_headers(&map, &AuthConfig::default());
        assert!(!evidence.has_session());
    }

    #[test]
    fn test_any_authorization_scheme_counts() {
        let guard = crate::auth::guard::Guard::default();
        for (value, expected) in [
            ("Basic dXNlcjpwYXNz", "Basic dXNlcjpwYXNz"),
            ("bearer abc", "bearer abc"),
            ("Token abc", "Token abc"),
        ] {
            let map = headers(&[(header::AUTHORIZATION, value)]);
            let evidence = SessionEvidence::from_headers(&map, &AuthConfig::default());
            assert_eq!(evidence.token.as_deref(), Some(expected));
            assert!(guard.check("/dashboard/x", &evidence).is_allowed(), "{}", value);
        }
    }

    #[test]
    fn test_empty_authorization_ignored() {
        for value in ["", "Bearer ", "   "] {
            let map = headers(&[(header::AUTHORIZATION, value)]);
            let evidence = SessionEvidence::from_headers(&map, &AuthConfig::default());
            assert!(!evidence.has_session(), "{:?}", value);
        }
    }
}

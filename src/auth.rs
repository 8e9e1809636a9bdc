use self::session::{Identity, SessionStore};
use crate::config::AdminConfig;
use axum::http::{header, HeaderMap};
use cookie::Cookie;
use std::sync::Arc;
use tracing::debug;

pub mod session;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Authentication gate for the admin area.
#[derive(Debug)]
pub struct Auth {
    admin: AdminConfig,
    sessions: Arc<dyn SessionStore>,
}

impl Auth {
    pub fn new(admin: AdminConfig, sessions: Arc<dyn SessionStore>) -> Self {
        Self { admin, sessions }
    }

    /// Exact comparison against the configured admin pair.
    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        username == self.admin.username && password == self.admin.password
    }

    /// Opens a session when the credentials match and returns its token.
    pub fn login(&self, username: &str, password: &str) -> Option<String> {
        if !self.verify_credentials(username, password) {
            return None;
        }

        let token = self.sessions.create(Identity::new(username));
        debug!("Live sessions: {}", self.sessions.live());

        Some(token)
    }

    /// Resolves the identity behind the request's session cookie, if any.
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<Identity> {
        session_token(headers).and_then(|token| self.sessions.lookup(&token))
    }

    pub fn logout(&self, headers: &HeaderMap) {
        if let Some(token) = session_token(headers) {
            self.sessions.revoke(&token);
        }
    }

    /// Site wide, script inaccessible cookie without an expiry.
    pub fn create_session_cookie(token: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE, token);
        cookie.set_http_only(true);
        cookie.set_path("/");
        cookie
    }

    pub fn removal_cookie() -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE, "");
        cookie.set_http_only(true);
        cookie.set_path("/");
        cookie.set_max_age(cookie::time::Duration::ZERO);
        cookie
    }
}

/// The first `session` entry across all `Cookie` headers.
///
/// Values are decoded lossily so a non ASCII cookie set by someone else on
/// the domain does not hide the session.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers
        .get_all(header::COOKIE)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .collect::<Vec<_>>()
        .join("; ");

    Cookie::split_parse(raw)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

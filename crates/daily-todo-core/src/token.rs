//! Token Store
//!
//! Persists the session credential in a cookie named `auth_token`, scoped to
//! the whole application with a seven day expiry. The cookie jar itself is
//! abstracted so the browser, the edge server and tests share one format.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Cookie holding the session credential
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Credential lifetime: 7 days
pub const TOKEN_TTL_SECS: i64 = 60 * 60 * 24 * 7;

/// Characters that cannot appear raw in a cookie value
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b',')
    .add(b';')
    .add(b'\\')
    .add(b'%');

/// A client-local cookie store
///
/// Implementations never fail loudly: unreadable storage reads as absent.
pub trait CookieJar {
    /// Current value, or `None` when unset or expired
    fn get(&self, name: &str) -> Option<String>;

    /// Set a value that expires `max_age_secs` from now
    fn set(&self, name: &str, value: &str, max_age_secs: i64);

    /// Expire the value immediately
    fn remove(&self, name: &str);
}

/// Build a `document.cookie` assignment for the application-wide path
pub fn cookie_assignment(name: &str, value: &str, max_age_secs: i64) -> String {
    let value = utf8_percent_encode(value, COOKIE_VALUE);
    format!("{name}={value}; path=/; max-age={max_age_secs}; SameSite=Lax")
}

/// Find a cookie in a `name=value; name2=value2` list
///
/// Works on both `document.cookie` and a request's `Cookie` header.
/// Empty values read as absent.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value.trim()).decode_utf8_lossy().into_owned())
        .filter(|value| !value.is_empty())
}

/// Read/write/clear access to the session credential
#[derive(Clone)]
pub struct TokenStore {
    jar: Rc<dyn CookieJar>,
}

impl TokenStore {
    pub fn new(jar: Rc<dyn CookieJar>) -> Self {
        Self { jar }
    }

    /// The current credential; expired and never-set look the same
    pub fn read(&self) -> Option<String> {
        self.jar.get(AUTH_TOKEN_KEY).filter(|token| !token.is_empty())
    }

    /// Persist `token`, replacing any prior credential
    pub fn write(&self, token: &str, ttl_secs: i64) {
        self.jar.set(AUTH_TOKEN_KEY, token, ttl_secs);
    }

    /// Drop the credential regardless of its expiry
    pub fn clear(&self) {
        self.jar.remove(AUTH_TOKEN_KEY);
    }

    pub fn is_present(&self) -> bool {
        self.read().is_some()
    }
}

struct StoredCookie {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-process cookie jar with real expiry
///
/// Used off the browser and in tests; `advance` moves its clock forward.
pub struct MemoryCookieJar {
    cookies: RefCell<HashMap<String, StoredCookie>>,
    offset: Cell<Duration>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self {
            cookies: RefCell::new(HashMap::new()),
            offset: Cell::new(Duration::zero()),
        }
    }

    /// Shift this jar's notion of "now"
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now() + self.offset.get()
    }
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let now = self.now();
        let mut cookies = self.cookies.borrow_mut();
        match cookies.get(name) {
            Some(cookie) if cookie.expires_at > now => Some(cookie.value.clone()),
            Some(_) => {
                cookies.remove(name);
                None
            }
            None => None,
        }
    }

    fn set(&self, name: &str, value: &str, max_age_secs: i64) {
        if max_age_secs <= 0 {
            self.remove(name);
            return;
        }
        let expires_at = self.now() + Duration::seconds(max_age_secs);
        self.cookies.borrow_mut().insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                expires_at,
            },
        );
    }

    fn remove(&self, name: &str) {
        self.cookies.borrow_mut().remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (Rc<MemoryCookieJar>, TokenStore) {
        let jar = Rc::new(MemoryCookieJar::new());
        let tokens = TokenStore::new(jar.clone());
        (jar, tokens)
    }

    #[test]
    fn test_read_absent_by_default() {
        let (_, tokens) = store();
        assert_eq!(tokens.read(), None);
        assert!(!tokens.is_present());
    }

    #[test]
    fn test_write_overwrites_prior_token() {
        let (_, tokens) = store();
        tokens.write("first", TOKEN_TTL_SECS);
        tokens.write("second", TOKEN_TTL_SECS);
        assert_eq!(tokens.read().as_deref(), Some("second"));
    }

    #[test]
    fn test_clear_removes_token() {
        let (_, tokens) = store();
        tokens.write("abc123", TOKEN_TTL_SECS);
        tokens.clear();
        assert_eq!(tokens.read(), None);
    }

    #[test]
    fn test_token_expires_after_ttl() {
        let (jar, tokens) = store();
        tokens.write("abc123", TOKEN_TTL_SECS);

        jar.advance(Duration::seconds(TOKEN_TTL_SECS - 1));
        assert_eq!(tokens.read().as_deref(), Some("abc123"));

        jar.advance(Duration::seconds(1));
        assert_eq!(tokens.read(), None);
    }

    #[test]
    fn test_cookie_assignment_format() {
        assert_eq!(
            cookie_assignment(AUTH_TOKEN_KEY, "abc123", TOKEN_TTL_SECS),
            "auth_token=abc123; path=/; max-age=604800; SameSite=Lax"
        );
        assert_eq!(
            cookie_assignment(AUTH_TOKEN_KEY, "", 0),
            "auth_token=; path=/; max-age=0; SameSite=Lax"
        );
    }

    #[test]
    fn test_cookie_value_lookup() {
        let header = "theme=dark; auth_token=eyJhbGciOi.J9.sig; lang=cs";
        assert_eq!(
            cookie_value(header, AUTH_TOKEN_KEY).as_deref(),
            Some("eyJhbGciOi.J9.sig")
        );
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value("auth_token=", AUTH_TOKEN_KEY), None);
        assert_eq!(cookie_value("", AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn test_cookie_value_round_trips_reserved_chars() {
        let assignment = cookie_assignment(AUTH_TOKEN_KEY, "a;b c", 60);
        let pair = assignment.split("; path").next().unwrap();
        assert_eq!(cookie_value(pair, AUTH_TOKEN_KEY).as_deref(), Some("a;b c"));
    }
}

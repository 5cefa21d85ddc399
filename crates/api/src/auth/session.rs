//! Opaque session tokens and the cookie that carries them.
//!
//! A token is 32 random bytes, hex-encoded, handed to the browser in an
//! `HttpOnly` cookie. Only its SHA-256 digest is stored, so a database leak
//! does not expose live sessions.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use campusdesk_core::hashing::sha256_hex;

use crate::config::SessionConfig;
use crate::error::AppError;

/// Generate a fresh session token.
///
/// Returns `(plaintext_token, sha256_hex_digest)`. The plaintext goes to the
/// client; only the digest is persisted.
pub fn generate_session_token() -> (String, String) {
    let bytes: [u8; 32] = rand::random();
    let token: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    let digest = hash_session_token(&token);
    (token, digest)
}

/// Digest of a token as stored in `sessions.token_hash`.
pub fn hash_session_token(token: &str) -> String {
    sha256_hex(token.as_bytes())
}

/// `Set-Cookie` value opening a session.
pub fn session_cookie(config: &SessionConfig, token: &str) -> Result<HeaderValue, AppError> {
    let max_age = config.ttl_hours * 3600;
    build_cookie(config, token, max_age)
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn expired_session_cookie(config: &SessionConfig) -> Result<HeaderValue, AppError> {
    build_cookie(config, "", 0)
}

fn build_cookie(config: &SessionConfig, value: &str, max_age: i64) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
        config.cookie_name
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {e}")))
}

/// Find the session token in the request's `Cookie` headers.
pub fn token_from_headers<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secure: bool) -> SessionConfig {
        SessionConfig {
            cookie_name: "sid".to_string(),
            ttl_hours: 2,
            cookie_secure: secure,
            sweep_interval_secs: 60,
        }
    }

    #[test]
    fn tokens_are_unique_hex() {
        let (a, a_hash) = generate_session_token();
        let (b, _) = generate_session_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
        assert_eq!(a_hash, hash_session_token(&a));
        assert_ne!(a_hash, a);
    }

    #[test]
    fn cookie_attributes() {
        let open = session_cookie(&config(false), "abc").unwrap();
        assert_eq!(
            open.to_str().unwrap(),
            "sid=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=7200"
        );
        let closed = expired_session_cookie(&config(true)).unwrap();
        assert_eq!(
            closed.to_str().unwrap(),
            "sid=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Secure"
        );
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; sid=deadbeef"));
        assert_eq!(token_from_headers(&headers, "sid"), Some("deadbeef"));
        assert_eq!(token_from_headers(&headers, "other"), None);

        let mut empty = HeaderMap::new();
        empty.insert(COOKIE, HeaderValue::from_static("sid="));
        assert_eq!(token_from_headers(&empty, "sid"), None);
    }
}

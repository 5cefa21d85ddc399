use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session cookie and lifetime settings.
    pub session: SessionConfig,
    /// Root of the static pages (`login/`, `dashboard/`).
    pub static_dir: PathBuf,
    /// Where uploaded profile pictures are written and served from.
    pub upload_dir: PathBuf,
    /// Largest accepted profile picture, in bytes.
    pub max_upload_bytes: usize,
    /// Minimum password length enforced at signup.
    pub min_password_length: usize,
}

/// Server-side session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name of the cookie carrying the opaque session token.
    pub cookie_name: String,
    /// Session lifetime in hours.
    pub ttl_hours: i64,
    /// Add the `Secure` attribute to the cookie (HTTPS deployments).
    pub cookie_secure: bool,
    /// How often expired sessions are purged, in seconds.
    pub sweep_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `SESSION_COOKIE_NAME`         | `campusdesk_sid`        |
    /// | `SESSION_TTL_HOURS`           | `24`                    |
    /// | `SESSION_COOKIE_SECURE`       | `false`                 |
    /// | `SESSION_SWEEP_INTERVAL_SECS` | `3600`                  |
    /// | `STATIC_DIR`                  | `public`                |
    /// | `UPLOAD_DIR`                  | `uploads`               |
    /// | `MAX_UPLOAD_BYTES`            | `5242880`               |
    /// | `MIN_PASSWORD_LENGTH`         | `6`                     |
    ///
    /// Panics on unparsable values, and on a zero sweep interval, so
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = parse_env("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let session = SessionConfig {
            cookie_name: std::env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "campusdesk_sid".into()),
            ttl_hours: parse_env("SESSION_TTL_HOURS", 24),
            cookie_secure: parse_env("SESSION_COOKIE_SECURE", false),
            sweep_interval_secs: nonzero(
                "SESSION_SWEEP_INTERVAL_SECS",
                parse_env("SESSION_SWEEP_INTERVAL_SECS", 3600),
            ),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            session,
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "public".into())
                .into(),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".into())
                .into(),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 5 * 1024 * 1024),
            min_password_length: parse_env("MIN_PASSWORD_LENGTH", 6),
        }
    }
}

/// Read and parse `key`, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

/// A sweep interval of zero would make `tokio::time::interval` panic later.
fn nonzero(key: &str, value: u64) -> u64 {
    if value == 0 {
        panic!("{key} must be greater than zero");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_intervals_are_kept() {
        assert_eq!(nonzero("SESSION_SWEEP_INTERVAL_SECS", 60), 60);
    }

    #[test]
    #[should_panic(expected = "SESSION_SWEEP_INTERVAL_SECS must be greater than zero")]
    fn zero_interval_is_rejected() {
        nonzero("SESSION_SWEEP_INTERVAL_SECS", 0);
    }
}

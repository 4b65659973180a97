//! Runtime settings read from the environment (and `.env`).

use std::{env, fmt, str::FromStr};

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEV_JWT_SECRET, MIN_JWT_SECRET_LENGTH,
};

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const HIDDEN: &str = "[REDACTED]";
        f.debug_struct("Config")
            .field("database_url", &HIDDEN)
            .field("redis_url", &HIDDEN)
            .field("jwt_secret", &HIDDEN)
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

fn text_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parsed value of `key`; unset or unparsable values fall back to `default`.
fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparsable setting");
            default
        }),
        Err(_) => default,
    }
}

/// Signing secret; only debug builds may run without one.
///
/// # Panics
/// When `JWT_SECRET` is missing in a release build or shorter than
/// `MIN_JWT_SECRET_LENGTH`.
fn jwt_secret() -> String {
    let secret = match env::var("JWT_SECRET") {
        Ok(secret) => secret,
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, signing tokens with the development secret");
            DEV_JWT_SECRET.to_string()
        }
        Err(_) => panic!("JWT_SECRET must be set in release builds"),
    };

    assert!(
        secret.len() >= MIN_JWT_SECRET_LENGTH,
        "JWT_SECRET must be at least {} characters long",
        MIN_JWT_SECRET_LENGTH
    );
    secret
}

impl Config {
    /// Load settings, reading `.env` first when present.
    ///
    /// # Panics
    /// See [`jwt_secret`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: text_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            redis_url: text_or("REDIS_URL", DEFAULT_REDIS_URL),
            jwt_secret: jwt_secret(),
            jwt_expiration_hours: parsed_or("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: text_or("SERVER_HOST", DEFAULT_SERVER_HOST),
            server_port: parsed_or("SERVER_PORT", DEFAULT_SERVER_PORT),
        }
    }

    /// Default connection settings with the given signing secret.
    pub fn with_jwt_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }

    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// `host:port` to bind
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "a-very-long-secret-used-for-tests-only";

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = Config::with_jwt_secret(SECRET);
        config.database_url = "postgres://buyer:hunter2@db/procurement".to_string();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("a-very-long-secret"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_server_addr() {
        let mut config = Config::with_jwt_secret(SECRET);
        config.server_port = 8081;
        assert_eq!(config.server_addr(), "0.0.0.0:8081");
    }

    #[test]
    fn test_parsed_or_falls_back_when_unset() {
        assert_eq!(parsed_or("PROCUREMENT_TEST_UNSET_PORT", 4000u16), 4000);
    }
}

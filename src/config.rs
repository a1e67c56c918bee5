use std::env;

/// Runtime configuration, read once at startup. Everything except
/// `DATABASE_URL` has a default suitable for local development.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub session_ttl_secs: i64,
    pub default_max_guests: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            session_ttl_secs: parse_or("SESSION_TTL_SECS", 86_400),
            default_max_guests: parse_or("DEFAULT_MAX_GUESTS", 6),
        }
    }
}

fn parse_or(key: &str, default: i64) -> i64 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

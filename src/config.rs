use std::env;
use tracing::{info, warn};

/// Runtime settings read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// MySQL url. `None` runs the service on the in-memory store.
    pub database_url: Option<String>,
    /// Create the `posts` table at startup when missing.
    pub auto_migrate: bool,
}

impl Config {
    pub fn load() -> Self {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        if database_url.is_none() {
            warn!("DATABASE_URL not set, posts are kept in memory");
        }

        Config {
            database_url,
            auto_migrate: flag("POSTS_AUTO_MIGRATE", true),
        }
    }

    pub fn in_memory() -> Self {
        Config {
            database_url: None,
            auto_migrate: false,
        }
    }
}

fn flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => parse_flag(&raw).unwrap_or_else(|| {
            warn!("Invalid {key} value {raw:?}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

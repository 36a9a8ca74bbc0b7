use serde::Deserialize;

/// Development fallback for `SESSION_SECRET`. Never use it in production.
pub const DEV_SESSION_SECRET: &str = "dev_secret-change-me-before-deploying-wallkeep";

const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_days: i64,
    pub cookie_secure: bool,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub frontend_origin: String,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session = SessionConfig {
            secret: get("SESSION_SECRET").unwrap_or_else(|| DEV_SESSION_SECRET.into()),
            ttl_days: get("SESSION_TTL_DAYS")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|d| *d > 0)
                .unwrap_or(7),
            cookie_secure: get("COOKIE_SECURE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            sweep_interval_secs: get("SESSION_SWEEP_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|s| *s > 0)
                .unwrap_or(3600),
        };

        if session.secret.len() < MIN_SECRET_LEN {
            anyhow::bail!("SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes");
        }

        let port = match get("PORT") {
            Some(v) => v.parse::<u16>()?,
            None => 4000,
        };

        Ok(Self {
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://wallkeep.sqlite?mode=rwc".into()),
            frontend_origin: get("FRONTEND_ORIGIN")
                .unwrap_or_else(|| "http://localhost:5173".into()),
            session,
        })
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.session.secret == DEV_SESSION_SECRET
    }

    /// Config for tests: in-memory database, dev secret.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: "sqlite::memory:".into(),
            frontend_origin: "http://localhost:5173".into(),
            session: SessionConfig {
                secret: DEV_SESSION_SECRET.into(),
                ttl_days: 7,
                cookie_secure: false,
                sweep_interval_secs: 3600,
            },
        }
    }
}

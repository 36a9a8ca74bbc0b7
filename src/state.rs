use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::SqlitePool;
use time::Duration;

use crate::{config::AppConfig, db};

/// Shared per-process services, handed to every handler via `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    cookie_key: Key,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = db::connect(&config.database_url).await?;
        Ok(Self::from_parts(db, Arc::new(config)))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        let cookie_key = Key::derive_from(config.session.secret.as_bytes());
        Self {
            db,
            config,
            cookie_key,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::days(self.config.session.ttl_days)
    }

    /// Closes the pool. Call once, after the server has drained.
    pub async fn close(&self) {
        self.db.close().await;
        tracing::info!("database pool closed");
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

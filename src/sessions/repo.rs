use anyhow::Context;
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use sqlx::SqlitePool;
use time::{Duration, OffsetDateTime};
use tracing::debug;

const TOKEN_LEN: usize = 43;

/// Server-side session records keyed by an opaque token.
pub struct Session;

fn new_token() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

impl Session {
    /// Issue a token for `user_id`, valid for `ttl` from now.
    pub async fn create(db: &SqlitePool, user_id: i64, ttl: Duration) -> anyhow::Result<String> {
        let token = new_token();
        let expires_at = (OffsetDateTime::now_utc() + ttl).unix_timestamp();
        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?1, ?2, ?3)")
            .bind(&token)
            .bind(user_id)
            .bind(expires_at)
            .execute(db)
            .await
            .context("insert session")?;
        debug!(user_id, "session created");
        Ok(token)
    }

    /// The user behind an unexpired token, if any.
    pub async fn resolve(db: &SqlitePool, token: &str) -> anyhow::Result<Option<i64>> {
        if token.is_empty() || token.len() > 128 {
            return Ok(None);
        }
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let row = sqlx::query_as::<_, (i64,)>(
            "SELECT user_id FROM sessions WHERE token = ?1 AND expires_at > ?2",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(db)
        .await
        .context("resolve session")?;
        Ok(row.map(|(user_id,)| user_id))
    }

    /// Idempotent: unknown tokens are not an error.
    pub async fn destroy(db: &SqlitePool, token: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?1")
            .bind(token)
            .execute(db)
            .await
            .context("delete session")?;
        Ok(())
    }

    pub async fn purge_expired(db: &SqlitePool) -> anyhow::Result<u64> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let res = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?1")
            .bind(now)
            .execute(db)
            .await
            .context("purge expired sessions")?;
        Ok(res.rows_affected())
    }
}

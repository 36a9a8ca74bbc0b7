use anyhow::Context;
use sqlx::SqlitePool;

use crate::auth::repo_types::{PublicUser, User};

impl User {
    /// Find a user by email. Emails match exactly as stored.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    /// Insert a new user. Returns `None` when the email is already taken.
    pub async fn create(
        db: &SqlitePool,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, password_hash, name, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_optional(db)
        .await
        .context("insert user")?;
        Ok(user)
    }

    /// Administrative removal; favorites and sessions go with the user.
    pub async fn delete(db: &SqlitePool, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(db)
            .await
            .context("delete user")?;
        Ok(res.rows_affected())
    }
}

impl PublicUser {
    pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<PublicUser>> {
        let user = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT id, email, name, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find user by id")?;
        Ok(user)
    }
}

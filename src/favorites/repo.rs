use anyhow::Context;
use sqlx::SqlitePool;

use crate::favorites::repo_types::{AddOutcome, Favorite, NewFavorite};

const COLUMNS: &str =
    "id, user_id, image_id, title, url, thumb, dimension_x, dimension_y, created_at";

impl Favorite {
    /// All favorites of a user, newest first.
    pub async fn list_by_user(db: &SqlitePool, user_id: i64) -> anyhow::Result<Vec<Favorite>> {
        let rows = sqlx::query_as::<_, Favorite>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM favorites
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("list favorites")?;
        Ok(rows)
    }

    pub async fn find(
        db: &SqlitePool,
        user_id: i64,
        image_id: &str,
    ) -> anyhow::Result<Option<Favorite>> {
        let row = sqlx::query_as::<_, Favorite>(&format!(
            "SELECT {COLUMNS} FROM favorites WHERE user_id = ?1 AND image_id = ?2"
        ))
        .bind(user_id)
        .bind(image_id)
        .fetch_optional(db)
        .await
        .context("find favorite")?;
        Ok(row)
    }

    /// Inserts unless `(user_id, image_id)` is already saved. An existing
    /// row is returned untouched; its metadata is never overwritten.
    pub async fn add_if_absent(
        db: &SqlitePool,
        user_id: i64,
        new: &NewFavorite,
    ) -> anyhow::Result<AddOutcome> {
        let inserted = sqlx::query_as::<_, Favorite>(&format!(
            r#"
            INSERT INTO favorites
                (user_id, image_id, title, url, thumb, dimension_x, dimension_y)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (user_id, image_id) DO NOTHING
            RETURNING {COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&new.image_id)
        .bind(&new.title)
        .bind(&new.url)
        .bind(&new.thumb)
        .bind(new.dimension_x)
        .bind(new.dimension_y)
        .fetch_optional(db)
        .await
        .context("insert favorite")?;

        if let Some(fav) = inserted {
            return Ok(AddOutcome::Created(fav));
        }

        let existing = Self::find(db, user_id, &new.image_id)
            .await?
            .context("favorite vanished after conflicting insert")?;
        Ok(AddOutcome::AlreadyExisted(existing))
    }

    /// Number of rows removed: 0 or 1.
    pub async fn remove(db: &SqlitePool, user_id: i64, image_id: &str) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM favorites WHERE user_id = ?1 AND image_id = ?2")
            .bind(user_id)
            .bind(image_id)
            .execute(db)
            .await
            .context("delete favorite")?;
        Ok(res.rows_affected())
    }
}

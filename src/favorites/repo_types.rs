use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Saved wallpaper, with metadata denormalised from the search API.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct Favorite {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub image_id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub thumb: Option<String>,
    pub dimension_x: Option<i64>,
    pub dimension_y: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Values for a favorite that may not exist yet.
#[derive(Debug, Clone, Default)]
pub struct NewFavorite {
    pub image_id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub thumb: Option<String>,
    pub dimension_x: Option<i64>,
    pub dimension_y: Option<i64>,
}

/// Result of [`Favorite::add_if_absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Created(Favorite),
    AlreadyExisted(Favorite),
}

impl AddOutcome {
    pub fn favorite(&self) -> &Favorite {
        match self {
            AddOutcome::Created(f) | AddOutcome::AlreadyExisted(f) => f,
        }
    }

    pub fn into_favorite(self) -> Favorite {
        match self {
            AddOutcome::Created(f) | AddOutcome::AlreadyExisted(f) => f,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, AddOutcome::Created(_))
    }
}

use serde::{Deserialize, Serialize};

use crate::favorites::repo_types::{Favorite, NewFavorite};

/// Body of `POST /api/user/favorites`.
#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub dimension_x: Option<i64>,
    #[serde(default)]
    pub dimension_y: Option<i64>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

fn non_zero(n: Option<i64>) -> Option<i64> {
    n.filter(|n| *n != 0)
}

impl AddFavoriteRequest {
    /// `None` when `image_id` is missing or empty. Empty strings and zero
    /// dimensions are stored as NULL.
    pub fn into_new_favorite(self) -> Option<NewFavorite> {
        let image_id = non_empty(self.image_id)?;
        Some(NewFavorite {
            image_id,
            title: non_empty(self.title),
            url: non_empty(self.url),
            thumb: non_empty(self.thumb),
            dimension_x: non_zero(self.dimension_x),
            dimension_y: non_zero(self.dimension_y),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub ok: bool,
    pub favorites: Vec<Favorite>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub ok: bool,
    pub favorite: Favorite,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub ok: bool,
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: serde_json::Value) -> AddFavoriteRequest {
        serde_json::from_value(body).expect("valid body")
    }

    #[test]
    fn missing_or_empty_image_id_is_rejected() {
        assert!(parse(serde_json::json!({})).into_new_favorite().is_none());
        assert!(parse(serde_json::json!({ "image_id": "" }))
            .into_new_favorite()
            .is_none());
    }

    #[test]
    fn falsy_metadata_becomes_null() {
        let fav = parse(serde_json::json!({
            "image_id": "abc123",
            "title": "",
            "url": "https://walls.example/w/abc123",
            "dimension_x": 0,
            "dimension_y": 1080
        }))
        .into_new_favorite()
        .unwrap();
        assert_eq!(fav.image_id, "abc123");
        assert_eq!(fav.title, None);
        assert_eq!(fav.url.as_deref(), Some("https://walls.example/w/abc123"));
        assert_eq!(fav.thumb, None);
        assert_eq!(fav.dimension_x, None);
        assert_eq!(fav.dimension_y, Some(1080));
    }
}

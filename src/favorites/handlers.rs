use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use tracing::{debug, info, instrument};

use crate::{
    auth::extractors::{AuthUser, MaybeUser},
    error::{ApiError, ApiResult},
    favorites::{
        dto::{AddFavoriteRequest, DeletedResponse, FavoriteResponse, FavoritesResponse},
        repo_types::Favorite,
    },
    state::AppState,
};

pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/user/favorites", get(list_favorites).post(add_favorite))
        .route("/user/favorites/:image_id", delete(remove_favorite))
}

/// Anonymous callers get an empty list, not a 401.
#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
) -> ApiResult<Json<FavoritesResponse>> {
    let favorites = match user_id {
        Some(user_id) => Favorite::list_by_user(&state.db, user_id)
            .await
            .map_err(ApiError::Storage)?,
        None => Vec::new(),
    };
    Ok(Json(FavoritesResponse {
        ok: true,
        favorites,
    }))
}

#[instrument(skip(state, payload))]
pub async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    WithRejection(Json(payload), _): WithRejection<Json<AddFavoriteRequest>, ApiError>,
) -> ApiResult<Json<FavoriteResponse>> {
    let new = payload
        .into_new_favorite()
        .ok_or_else(|| ApiError::Validation("image_id required".into()))?;

    let outcome = Favorite::add_if_absent(&state.db, user_id, &new)
        .await
        .map_err(ApiError::Storage)?;
    let image_id = &outcome.favorite().image_id;
    if outcome.is_created() {
        info!(user_id, image_id = %image_id, "favorite added");
    } else {
        debug!(user_id, image_id = %image_id, "favorite already saved; metadata kept");
    }

    Ok(Json(FavoriteResponse {
        ok: true,
        favorite: outcome.into_favorite(),
    }))
}

#[instrument(skip(state))]
pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(image_id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let deleted = Favorite::remove(&state.db, user_id, &image_id)
        .await
        .map_err(ApiError::Storage)?;
    info!(user_id, image_id = %image_id, deleted, "favorite removed");
    Ok(Json(DeletedResponse { ok: true, deleted }))
}

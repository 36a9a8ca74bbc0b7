use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::{cookie::Key, SignedCookieJar};
use tracing::debug;

use crate::{
    error::ApiError,
    sessions::{cookie, Session},
    state::AppState,
};

/// Resolves the session cookie to a user id, if there is a live session.
pub struct MaybeUser(pub Option<i64>);

/// Like [`MaybeUser`], but rejects with 401 when there is no live session.
pub struct AuthUser(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = match SignedCookieJar::<Key>::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        let Some(token) = cookie::token(&jar) else {
            return Ok(MaybeUser(None));
        };

        let user_id = Session::resolve(&state.db, &token)
            .await
            .map_err(ApiError::Storage)?;
        if user_id.is_none() {
            debug!("session cookie present but not live");
        }
        Ok(MaybeUser(user_id))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybeUser(user_id) = MaybeUser::from_request_parts(parts, state).await?;
        user_id.map(AuthUser).ok_or_else(ApiError::not_authenticated)
    }
}

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::{SignedCookieJar, WithRejection};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{required_credentials, LoginRequest, OkResponse, RegisterRequest, UserResponse},
        extractors::MaybeUser,
        password::{hash_password_blocking, verify_password_blocking},
        repo_types::{PublicUser, User},
    },
    error::{ApiError, ApiResult},
    sessions::{cookie, Session},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

fn missing_credentials() -> ApiError {
    ApiError::Validation("Email and password required".into())
}

fn invalid_credentials() -> ApiError {
    ApiError::Auth("Invalid credentials".into())
}

/// Creates a session for `user_id` and sets its cookie on `jar`.
async fn start_session(
    state: &AppState,
    jar: SignedCookieJar,
    user_id: i64,
) -> ApiResult<SignedCookieJar> {
    // a login over a live cookie replaces that session
    if let Some(old) = cookie::token(&jar) {
        if let Err(e) = Session::destroy(&state.db, &old).await {
            warn!(error = %e, "failed to drop previous session");
        }
    }
    let ttl = state.session_ttl();
    let token = Session::create(&state.db, user_id, ttl)
        .await
        .map_err(ApiError::Storage)?;
    Ok(cookie::attach(
        jar,
        token,
        ttl,
        state.config.session.cookie_secure,
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> ApiResult<(SignedCookieJar, Json<UserResponse>)> {
    let (email, password) =
        required_credentials(payload.email, payload.password).ok_or_else(missing_credentials)?;
    let name = payload.name.filter(|n| !n.is_empty());

    let taken = User::find_by_email(&state.db, &email)
        .await
        .map_err(ApiError::Storage)?;
    if taken.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::Conflict("Email already exists".into()));
    }

    let hash = hash_password_blocking(password)
        .await
        .map_err(ApiError::Internal)?;

    // the insert still guards against a concurrent registration
    let user = User::create(&state.db, &email, &hash, name.as_deref())
        .await
        .map_err(ApiError::Storage)?
        .ok_or_else(|| ApiError::Conflict("Email already exists".into()))?;

    let jar = start_session(&state, jar, user.id).await?;
    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((jar, Json(UserResponse::new(Some(user.into())))))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> ApiResult<(SignedCookieJar, Json<UserResponse>)> {
    let (email, password) =
        required_credentials(payload.email, payload.password).ok_or_else(missing_credentials)?;

    let user = match User::find_by_email(&state.db, &email)
        .await
        .map_err(ApiError::Storage)?
    {
        Some(u) => u,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(invalid_credentials());
        }
    };

    let ok = verify_password_blocking(password, user.password_hash.clone())
        .await
        .map_err(ApiError::Internal)?;
    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(invalid_credentials());
    }

    let jar = start_session(&state, jar, user.id).await?;
    info!(user_id = user.id, "user logged in");
    Ok((jar, Json(UserResponse::new(Some(user.into())))))
}

/// Always clears the cookie, even when the session row could not be deleted.
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, ApiResult<Json<OkResponse>>) {
    let result = match cookie::token(&jar) {
        Some(token) => Session::destroy(&state.db, &token)
            .await
            .map(|_| info!("session destroyed"))
            .map_err(ApiError::SessionTeardown),
        None => Ok(()),
    };
    (cookie::clear(jar), result.map(|_| Json(OkResponse { ok: true })))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
) -> ApiResult<Json<UserResponse>> {
    let Some(user_id) = user_id else {
        return Ok(Json(UserResponse::new(None)));
    };
    // a deleted account with a lingering session reads as logged out
    let user = PublicUser::find_by_id(&state.db, user_id)
        .await
        .map_err(ApiError::Storage)?;
    Ok(Json(UserResponse::new(user)))
}

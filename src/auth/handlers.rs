use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{AccessToken, SignupRequest},
        extractors::ValidatedUser,
    },
    error::AuthError,
    state::AppState,
    users::PublicUser,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicUser>), AuthError> {
    let Json(payload) = payload?;
    info!(email = %payload.email, "signup request received");

    let user = state
        .auth
        .signup(&payload.email, &payload.name, &payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedUser(user): ValidatedUser,
) -> Result<(StatusCode, Json<AccessToken>), AuthError> {
    info!(email = %user.email, "login for validated user");
    let token = state.auth.login(&user)?;
    Ok((StatusCode::CREATED, Json(token)))
}

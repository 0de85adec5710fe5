use axum::{
    async_trait,
    extract::{FromRef, FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
    Form, Json,
};
use tracing::warn;
use uuid::Uuid;

use super::{dto::LoginRequest, services::AuthService};
use crate::{error::AuthError, users::PublicUser};

/// Identity carried by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AuthError::Unauthorized("Missing Authorization header".into()))?;

        // Expect "Bearer <token>", scheme case-insensitive
        let token = match auth_header.trim().split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
            _ => {
                warn!("invalid auth scheme");
                return Err(AuthError::Unauthorized("Invalid Authorization header".into()));
            }
        };

        AuthService::from_ref(state).verify_token(token)
    }
}

/// A user whose email and password were checked against the store.
///
/// Credentials come from a JSON body, or a urlencoded form when the request
/// says so. Anything unreadable counts as missing credentials.
pub struct ValidatedUser(pub PublicUser);

#[async_trait]
impl<S> FromRequest<S> for ValidatedUser
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let credentials = if is_form {
            Form::<LoginRequest>::from_request(req, state)
                .await
                .map(|Form(c)| c)
                .ok()
        } else {
            Json::<LoginRequest>::from_request(req, state)
                .await
                .map(|Json(c)| c)
                .ok()
        }
        .unwrap_or_default();

        AuthService::from_ref(state)
            .validate_credentials(&credentials.email, &credentials.password)
            .await
            .map(ValidatedUser)
    }
}

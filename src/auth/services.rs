use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::{
    dto::AccessToken,
    extractors::AuthUser,
    jwt::JwtKeys,
    password::PasswordHasher,
};
use crate::{
    error::AuthError,
    users::{NewUser, PublicUser, UserStore},
};

/// Signup, credential validation and token issuance over an injected store,
/// hasher and signer.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    keys: JwtKeys,
}

fn require(field: &str, value: &str) -> Result<(), AuthError> {
    if value.is_empty() {
        return Err(AuthError::Validation(format!("{field} is required")));
    }
    Ok(())
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, keys: JwtKeys) -> Self {
        Self {
            store,
            hasher,
            keys,
        }
    }

    #[instrument(skip(self, name, password))]
    pub async fn signup(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<PublicUser, AuthError> {
        require("email", email)?;
        require("name", name)?;
        require("password", password)?;

        if self.store.find_by_email(email).await?.is_some() {
            warn!("signup failed: email already exists");
            return Err(AuthError::Conflict("email already exists".into()));
        }

        debug!("hashing password");
        let password_hash = self.hasher.hash_async(password.to_owned()).await?;

        let user = self
            .store
            .insert_user(NewUser {
                email: email.to_owned(),
                name: name.to_owned(),
                password_hash,
            })
            .await
            .inspect_err(|e| warn!(error = %e, "create user failed"))?;

        info!(user_id = %user.id, "signup successful");
        Ok(user.into())
    }

    #[instrument(skip(self, password))]
    pub async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PublicUser, AuthError> {
        if email.is_empty() || password.is_empty() {
            warn!("missing credentials");
            return Err(AuthError::invalid_credentials());
        }

        let Some(user) = self.store.find_by_email(email).await? else {
            warn!("login unknown email");
            return Err(AuthError::invalid_credentials());
        };

        debug!(user_id = %user.id, "user found, comparing passwords");
        let ok = self
            .hasher
            .verify_async(password.to_owned(), user.password_hash.clone())
            .await?;
        if !ok {
            warn!(user_id = %user.id, "login invalid password");
            return Err(AuthError::invalid_credentials());
        }

        info!(user_id = %user.id, "user authenticated");
        Ok(user.into())
    }

    /// Issues an access token for an already validated user.
    #[instrument(skip_all, fields(user_id = %user.id))]
    pub fn login(&self, user: &PublicUser) -> Result<AccessToken, AuthError> {
        let access_token = self.keys.sign(user.id, &user.email)?;
        info!("access token issued");
        Ok(AccessToken { access_token })
    }

    pub fn verify_token(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = self.keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AuthError::Unauthorized("Invalid or expired token".into())
        })?;
        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

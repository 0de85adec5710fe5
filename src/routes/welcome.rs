use axum::{routing::get, Router};
use tracing::{info, instrument};

use crate::{auth::AuthUser, state::AppState};

pub fn welcome_routes() -> Router<AppState> {
    Router::new().route("/", get(welcome))
}

pub fn welcome_message(email: &str) -> String {
    format!("Welcome to the application {email} !")
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn welcome(user: AuthUser) -> String {
    info!(email = %user.email, "welcome request");
    welcome_message(&user.email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_embeds_email() {
        assert_eq!(
            welcome_message("a@x.com"),
            "Welcome to the application a@x.com !"
        );
    }
}

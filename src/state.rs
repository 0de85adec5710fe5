use crate::auth::{jwt::JwtKeys, password::PasswordHasher, AuthService};
use crate::config::AppConfig;
use crate::db;
use crate::users::{PgUserStore, UserStore};
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
}

impl AppState {
    /// Connects to Postgres, applies migrations and wires the service.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config).await?;
        db::migrate(&pool).await?;
        let store = Arc::new(PgUserStore::new(pool)) as Arc<dyn UserStore>;
        Ok(Self::from_parts(config, store))
    }

    pub fn from_parts(config: AppConfig, store: Arc<dyn UserStore>) -> Self {
        let hasher = PasswordHasher::new(config.password_scheme);
        let keys = JwtKeys::from_config(&config.jwt);
        Self::with_hasher(config, store, hasher, keys)
    }

    pub fn with_hasher(
        config: AppConfig,
        store: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        keys: JwtKeys,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: AuthService::new(store, hasher, keys),
        }
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

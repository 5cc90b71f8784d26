use std::sync::Arc;

use anyhow::Result;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::post_service::PostService;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::reaction_repository::PostgresReactionRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::session::SessionStore;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let sessions = Arc::new(SessionStore::new());
    let auth_service = Arc::new(AuthService::new(
        PostgresUserRepository::new(pool.clone()),
        sessions.clone(),
    ));
    if let Some(admin) = &settings.admin {
        auth_service
            .ensure_admin(&admin.username, &admin.email, &admin.password)
            .await?;
    }

    let post_service = Arc::new(PostService::new(
        PostgresPostRepository::new(pool.clone()),
        PostgresReactionRepository::new(pool),
    ));

    let state = AppState::new(auth_service, post_service, sessions);

    server::run_http(&settings, state).await
}

use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::post_service::PostService;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::reaction_repository::PostgresReactionRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::session::SessionStore;

pub(crate) mod app_error;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) post_service: Arc<PostService<PostgresPostRepository, PostgresReactionRepository>>,
    pub(crate) sessions: Arc<SessionStore>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<PostgresUserRepository>>,
        post_service: Arc<PostService<PostgresPostRepository, PostgresReactionRepository>>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            auth_service,
            post_service,
            sessions,
        }
    }
}

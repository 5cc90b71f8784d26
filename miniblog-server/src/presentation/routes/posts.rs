use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    create_post, delete_post, dislike_post, like_post, list_posts,
};
use crate::presentation::middleware::auth::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/", get(list_posts));

    let protected = Router::new()
        .route("/", post(create_post))
        .route("/{id}", delete(delete_post))
        .route("/{id}/like", post(like_post))
        .route("/{id}/dislike", post(dislike_post))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ));

    public.merge(protected)
}

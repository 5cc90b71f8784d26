use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::{AppState, routes};

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(routes::router(state.clone()))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct Healthz {
    status: &'static str,
}

async fn healthz() -> Json<Healthz> {
    Json(Healthz { status: "ok" })
}

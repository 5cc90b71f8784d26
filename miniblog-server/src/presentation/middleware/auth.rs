use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::infrastructure::session::{SESSION_COOKIE, SessionData};
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionUser(pub(crate) SessionData);

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .copied()
            .ok_or(AppError::Unauthorized)
    }
}

/// Cookie lookup without a rejection, for routes where authentication is
/// optional (post listing, logout).
#[derive(Debug, Clone)]
pub(crate) struct OptionalSession {
    pub(crate) token: Option<String>,
    pub(crate) session: Option<SessionData>,
}

impl OptionalSession {
    pub(crate) fn user_id(&self) -> Option<i64> {
        self.session.map(|s| s.user_id)
    }
}

impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string());
        let session = token.as_deref().and_then(|token| state.sessions.get(token));

        Ok(Self { token, session })
    }
}

pub(crate) async fn session_auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::Unauthorized)?;

    let session = state.sessions.get(&token).ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(SessionUser(session));

    Ok(next.run(request).await)
}

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::session::SESSION_COOKIE;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::ApiJson;
use crate::presentation::handlers::MessageResponseDto;
use crate::presentation::middleware::auth::OptionalSession;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 1))]
    pub(crate) username: String,
    #[validate(length(min = 1))]
    pub(crate) email: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(length(min = 1))]
    pub(crate) email: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LoginResponseDto {
    pub(crate) message: String,
    pub(crate) user: UserDto,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.as_str().to_string(),
        }
    }
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "User created", body = MessageResponseDto),
        (status = 400, description = "Missing fields or duplicate email"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<RegisterDto>,
) -> AppResult<(StatusCode, Json<MessageResponseDto>)> {
    dto.validate()?;

    let req = RegisterRequest {
        username: dto.username,
        email: dto.email,
        password: dto.password,
    };

    state.auth_service.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponseDto::new("user created")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(dto): ApiJson<LoginDto>,
) -> AppResult<(StatusCode, CookieJar, Json<LoginResponseDto>)> {
    dto.validate()?;

    let req = LoginRequest {
        email: dto.email,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;
    let jar = jar.add(session_cookie(result.session_token));

    Ok((
        StatusCode::OK,
        jar,
        Json(LoginResponseDto {
            message: "logged in".to_string(),
            user: result.user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cleared", body = MessageResponseDto)
    )
)]
pub(crate) async fn logout(
    State(state): State<AppState>,
    session: OptionalSession,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponseDto>) {
    // Succeeds whether or not a session existed.
    if let Some(token) = &session.token {
        state.auth_service.logout(token);
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());

    (jar, Json(MessageResponseDto::new("logged out")))
}

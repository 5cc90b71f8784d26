use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::infrastructure::session::SESSION_COOKIE;
use crate::presentation::handlers::MessageResponseDto;
use crate::presentation::handlers::auth::{LoginDto, LoginResponseDto, RegisterDto, UserDto};
use crate::presentation::handlers::posts::{
    CreatePostDto, CreatePostResponseDto, PostDto, PostListItemDto, ReactionSummaryDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::posts::like_post,
        crate::presentation::handlers::posts::dislike_post
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            LoginResponseDto,
            UserDto,
            MessageResponseDto,
            CreatePostDto,
            CreatePostResponseDto,
            PostDto,
            PostListItemDto,
            ReactionSummaryDto
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and logout"),
        (name = "posts", description = "Posts and reactions")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
        openapi.components = Some(components);
    }
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::post::{CreatePostRequest, Post};
use crate::domain::reaction::{PostWithReactions, ReactionKind, ReactionSummary};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::ApiJson;
use crate::presentation::handlers::MessageResponseDto;
use crate::presentation::middleware::auth::{OptionalSession, SessionUser};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) author: String,
    pub(crate) author_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostListItemDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) author: String,
    pub(crate) author_id: i64,
    pub(crate) likes: i64,
    pub(crate) dislikes: i64,
    pub(crate) user_liked: bool,
    pub(crate) user_disliked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CreatePostResponseDto {
    pub(crate) message: String,
    pub(crate) post: PostDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ReactionSummaryDto {
    pub(crate) likes: i64,
    pub(crate) dislikes: i64,
    pub(crate) user_liked: bool,
    pub(crate) user_disliked: bool,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            author: post.author,
            author_id: post.author_id,
        }
    }
}

impl From<PostWithReactions> for PostListItemDto {
    fn from(item: PostWithReactions) -> Self {
        Self {
            id: item.post.id,
            title: item.post.title,
            content: item.post.content,
            created_at: item.post.created_at,
            author: item.post.author,
            author_id: item.post.author_id,
            likes: item.summary.likes,
            dislikes: item.summary.dislikes,
            user_liked: item.summary.user_liked,
            user_disliked: item.summary.user_disliked,
        }
    }
}

impl From<ReactionSummary> for ReactionSummaryDto {
    fn from(summary: ReactionSummary) -> Self {
        Self {
            likes: summary.likes,
            dislikes: summary.dislikes,
            user_liked: summary.user_liked,
            user_disliked: summary.user_disliked,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Posts listed, newest first", body = [PostListItemDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    session: OptionalSession,
) -> AppResult<(StatusCode, Json<Vec<PostListItemDto>>)> {
    let result = state.post_service.list_posts(session.user_id()).await?;

    Ok((
        StatusCode::OK,
        Json(result.into_iter().map(PostListItemDto::from).collect()),
    ))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(
        ("session_cookie" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = CreatePostResponseDto),
        (status = 400, description = "Missing title or content"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: SessionUser,
    ApiJson(dto): ApiJson<CreatePostDto>,
) -> AppResult<(StatusCode, Json<CreatePostResponseDto>)> {
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.title,
        content: dto.content,
    };

    let post = state.post_service.create_post(auth.0.user_id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponseDto {
            message: "post created".to_string(),
            post: post.into(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner and not an admin"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: SessionUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<MessageResponseDto>)> {
    state.post_service.delete_post(auth.0, id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponseDto::new("post deleted")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/like",
    tag = "posts",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Like toggled", body = ReactionSummaryDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn like_post(
    State(state): State<AppState>,
    auth: SessionUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<ReactionSummaryDto>)> {
    let summary = state
        .post_service
        .toggle_reaction(ReactionKind::Like, auth.0.user_id, id)
        .await?;

    Ok((StatusCode::OK, Json(summary.into())))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/dislike",
    tag = "posts",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Dislike toggled", body = ReactionSummaryDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn dislike_post(
    State(state): State<AppState>,
    auth: SessionUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<ReactionSummaryDto>)> {
    let summary = state
        .post_service
        .toggle_reaction(ReactionKind::Dislike, auth.0.user_id, id)
        .await?;

    Ok((StatusCode::OK, Json(summary.into())))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{PostDto, PostListItemDto};
    use crate::domain::post::Post;
    use crate::domain::reaction::{PostWithReactions, ReactionSummary};

    #[test]
    fn post_dto_serializes_created_at_as_utc_with_trailing_z() {
        let created_at = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
            .single()
            .expect("timestamp must be unambiguous");
        let post =
            Post::new(1, "T", "C", 2, "alice", created_at).expect("sample post must be valid");

        let json = serde_json::to_value(PostDto::from(post)).expect("must serialize");
        assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");
        assert_eq!(json["author"], "alice");
        assert_eq!(json["author_id"], 2);
    }

    #[test]
    fn post_list_item_dto_carries_reaction_fields() {
        let post = Post::new(1, "T", "C", 2, "alice", Utc::now())
            .expect("sample post must be valid");
        let item = PostWithReactions {
            post,
            summary: ReactionSummary {
                likes: 3,
                dislikes: 1,
                user_liked: true,
                user_disliked: false,
            },
        };

        let json = serde_json::to_value(PostListItemDto::from(item)).expect("must serialize");
        assert_eq!(json["likes"], 3);
        assert_eq!(json["dislikes"], 1);
        assert_eq!(json["user_liked"], true);
        assert_eq!(json["user_disliked"], false);
    }
}

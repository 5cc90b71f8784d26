use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::reaction_repository::ReactionRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post};
use crate::domain::reaction::{PostWithReactions, ReactionKind, ReactionSummary};
use crate::infrastructure::session::SessionData;

pub(crate) struct PostService<P: PostRepository, R: ReactionRepository> {
    posts: P,
    reactions: R,
}

impl<P: PostRepository, R: ReactionRepository> PostService<P, R> {
    pub(crate) fn new(posts: P, reactions: R) -> Self {
        Self { posts, reactions }
    }

    pub(crate) async fn list_posts(
        &self,
        viewer: Option<i64>,
    ) -> Result<Vec<PostWithReactions>, DomainError> {
        self.posts.list_posts_with_reactions(viewer).await
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            content: req.content,
            author_id,
        };
        self.posts.create_post(new_post).await
    }

    pub(crate) async fn delete_post(
        &self,
        actor: SessionData,
        post_id: i64,
    ) -> Result<(), DomainError> {
        let post = self
            .posts
            .get_post(post_id)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {post_id}")))?;

        if post.author_id != actor.user_id && !actor.role.is_admin() {
            return Err(DomainError::Forbidden);
        }

        let deleted = self.posts.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        Ok(())
    }

    pub(crate) async fn toggle_reaction(
        &self,
        kind: ReactionKind,
        user_id: i64,
        post_id: i64,
    ) -> Result<ReactionSummary, DomainError> {
        if self.posts.get_post(post_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }

        self.reactions.toggle(kind, post_id, user_id).await?;
        self.reactions.summary(post_id, user_id).await
    }
}

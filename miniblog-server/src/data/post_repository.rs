use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::reaction::PostWithReactions;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    /// Deleting a post also removes its reaction rows (storage-level cascade).
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    /// All posts, newest first, with counts and the viewer's own reaction
    /// flags resolved in one pass.
    async fn list_posts_with_reactions(
        &self,
        viewer: Option<i64>,
    ) -> Result<Vec<PostWithReactions>, DomainError>;
}

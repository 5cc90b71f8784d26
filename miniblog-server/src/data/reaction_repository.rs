use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::reaction::{ReactionKind, ReactionSummary};

#[async_trait]
pub(crate) trait ReactionRepository: Send + Sync {
    /// Removes the reaction if the (post, user) pair already holds one,
    /// otherwise creates it. Returns whether the reaction is active after
    /// the call. Must be race-safe against concurrent toggles of the same
    /// pair: the storage-level unique constraint is the source of truth.
    async fn toggle(
        &self,
        kind: ReactionKind,
        post_id: i64,
        user_id: i64,
    ) -> Result<bool, DomainError>;

    async fn summary(&self, post_id: i64, user_id: i64)
    -> Result<ReactionSummary, DomainError>;
}

use serde::Serialize;

use super::post::Post;

/// The two reaction axes are independent: a user may hold a like and a
/// dislike on the same post at the same time, and neither toggle touches
/// the other axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ReactionKind {
    Like,
    Dislike,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub(crate) struct ReactionSummary {
    pub(crate) likes: i64,
    pub(crate) dislikes: i64,
    pub(crate) user_liked: bool,
    pub(crate) user_disliked: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct PostWithReactions {
    pub(crate) post: Post,
    pub(crate) summary: ReactionSummary,
}

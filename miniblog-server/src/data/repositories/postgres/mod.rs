pub(crate) mod post_repository;
pub(crate) mod reaction_repository;
pub(crate) mod user_repository;

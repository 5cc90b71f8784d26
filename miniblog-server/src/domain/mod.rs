pub(crate) mod error;
pub(crate) mod post;
pub(crate) mod reaction;
pub(crate) mod user;

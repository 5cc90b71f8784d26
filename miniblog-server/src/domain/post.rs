use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) author: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: require("title", &self.title)?,
            content: require("content", &self.content)?,
        })
    }
}

impl Post {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: i64,
        author: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("author_id", author_id)?;
        let title = require("title", &title.into())?;
        let content = require("content", &content.into())?;
        let author = require("author", &author.into())?;

        Ok(Self {
            id,
            title,
            content,
            author_id,
            author,
            created_at,
        })
    }
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must not be empty",
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{CreatePostRequest, DomainError, Post};

    #[test]
    fn create_post_request_rejects_blank_title() {
        let req = CreatePostRequest {
            title: "   ".to_string(),
            content: "body".to_string(),
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_post_request_rejects_blank_content() {
        let req = CreatePostRequest {
            title: "title".to_string(),
            content: "   ".to_string(),
        };

        let err = req.validate().expect_err("content must be rejected");
        assert_validation_field(err, "content");
    }

    #[test]
    fn post_new_trims_and_builds_post() {
        let post = Post::new(1, "  Title  ", "  Content  ", 10, "alice", Utc::now())
            .expect("post should be created");

        assert_eq!(post.id, 1);
        assert_eq!(post.author_id, 10);
        assert_eq!(post.author, "alice");
        assert_eq!(post.title, "Title");
        assert_eq!(post.content, "Content");
    }

    #[test]
    fn post_new_rejects_non_positive_author_id() {
        let err = Post::new(1, "Title", "Content", 0, "alice", Utc::now())
            .expect_err("author_id must be > 0");
        assert_validation_field(err, "author_id");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}

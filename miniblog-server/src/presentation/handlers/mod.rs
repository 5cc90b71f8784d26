use serde::Serialize;
use utoipa::ToSchema;

pub(crate) mod auth;
pub(crate) mod posts;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageResponseDto {
    pub(crate) message: String,
}

impl MessageResponseDto {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

//! Path parameter extractors
//!
//! Resolve `:content_type/:content_id` and `:user_id` segments into typed
//! domain values once, at the boundary.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use engage_core::{ContentKind, ContentRef, Snowflake};

use crate::response::ApiError;

/// `/:content_type/:content_id`
#[derive(Debug, Clone, Copy)]
pub struct ContentPath(pub ContentRef);

impl ContentPath {
    /// An unknown content type is reported as not found, a malformed id as a bad request
    pub fn parse(content_type: &str, content_id: &str) -> Result<Self, ApiError> {
        let kind: ContentKind = content_type.parse()?;
        let id: Snowflake = content_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid content_id format"))?;
        Ok(Self(ContentRef::new(kind, id)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ContentPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((content_type, content_id)) =
            Path::<(String, String)>::from_request_parts(parts, state)
                .await
                .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Self::parse(&content_type, &content_id)
    }
}

/// `/:user_id`
#[derive(Debug, Clone, Copy)]
pub struct UserIdPath(pub Snowflake);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(user_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        user_id
            .parse()
            .map(UserIdPath)
            .map_err(|_| ApiError::invalid_path("Invalid user_id format"))
    }
}

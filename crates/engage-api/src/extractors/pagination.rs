//! Pagination extractor
//!
//! Extracts offset pagination parameters from query strings. Clamping to the
//! allowed page size happens in the service layer.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use engage_service::dto::PaginationQuery;

use crate::response::ApiError;

/// Validated pagination parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

impl TryFrom<PaginationQuery> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationQuery) -> Result<Self, Self::Error> {
        if params.limit.is_some_and(|limit| limit < 1) {
            return Err(ApiError::invalid_query("'limit' must be at least 1"));
        }
        if params.skip.is_some_and(|skip| skip < 0) {
            return Err(ApiError::invalid_query("'skip' must not be negative"));
        }

        Ok(Pagination {
            limit: params.limit,
            skip: params.skip,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Pagination::try_from(params)
    }
}

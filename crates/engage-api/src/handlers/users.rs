//! User handlers

use axum::{extract::State, Json};
use engage_service::dto::UserReactionsResponse;
use engage_service::ReactionService;

use crate::extractors::{Pagination, UserIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// List a user's reactions, newest first
///
/// GET /users/{user_id}/reactions?limit=&skip=
pub async fn get_user_reactions(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
    pagination: Pagination,
) -> ApiResult<Json<UserReactionsResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service
        .get_user_reactions(user_id, pagination.limit, pagination.skip)
        .await?;
    Ok(Json(response))
}

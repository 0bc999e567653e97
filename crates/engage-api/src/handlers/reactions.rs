//! Reaction handlers
//!
//! Endpoints for toggling, deleting and listing reactions on content items.

use axum::{extract::State, http::StatusCode, Json};
use engage_service::dto::{
    ContentReactionsResponse, DeleteReactionResponse, ToggleReactionRequest,
    ToggleReactionResponse,
};
use engage_service::ReactionService;

use crate::extractors::{Actor, ContentPath, OptionalActor, Pagination, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Toggle the caller's reaction
///
/// POST /reactions/{content_type}/{content_id}
///
/// 201 when a reaction was added, 200 when removed or switched.
pub async fn toggle_reaction(
    State(state): State<AppState>,
    actor: Actor,
    ContentPath(target): ContentPath,
    ValidatedJson(body): ValidatedJson<ToggleReactionRequest>,
) -> ApiResult<(StatusCode, Json<ToggleReactionResponse>)> {
    let kind = body.reaction_kind()?;

    let service = ReactionService::new(state.service_context());
    let outcome = service
        .toggle_reaction(actor.user_id, target, kind)
        .await?;

    let response = ToggleReactionResponse::from(outcome);
    let status = StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::OK);
    Ok((status, Json(response)))
}

/// Remove the caller's reaction, whatever its kind
///
/// DELETE /reactions/{content_type}/{content_id}
pub async fn delete_reaction(
    State(state): State<AppState>,
    actor: Actor,
    ContentPath(target): ContentPath,
) -> ApiResult<Json<DeleteReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let reaction_count = service.delete_reaction(actor.user_id, target).await?;
    Ok(Json(DeleteReactionResponse { reaction_count }))
}

/// List reactions on a content item
///
/// GET /reactions/{content_type}/{content_id}?limit=
pub async fn get_reactions(
    State(state): State<AppState>,
    viewer: OptionalActor,
    ContentPath(target): ContentPath,
    pagination: Pagination,
) -> ApiResult<Json<ContentReactionsResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service
        .get_reactions_by_content(target, viewer.user_id(), pagination.limit)
        .await?;
    Ok(Json(response))
}

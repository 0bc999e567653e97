//! Route definitions
//!
//! All API routes mounted under /api/v1.

use axum::{routing::get, Router};

use crate::handlers::{health, reactions, users};
use crate::state::AppState;

/// Create the main API router (health routes are separate so they bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(reaction_routes())
        .merge(user_routes())
}

/// Reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new().route(
        "/reactions/:content_type/:content_id",
        get(reactions::get_reactions)
            .post(reactions::toggle_reaction)
            .delete(reactions::delete_reaction),
    )
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id/reactions", get(users::get_user_reactions))
}

//! Data Transfer Objects
//!
//! Request bodies, response payloads and entity-to-DTO mappers for the HTTP API.

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{PaginationQuery, ToggleReactionRequest};
pub use responses::{
    ApiResponse, ContentReactionsResponse, DeleteReactionResponse, HealthChecks, HealthResponse,
    OffsetPagination, ReactionCountResponse, ReactionResponse, ReadinessResponse,
    ToggleReactionResponse, UserReactionsResponse,
};

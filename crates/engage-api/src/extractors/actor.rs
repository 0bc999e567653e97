//! Acting user extractor
//!
//! Identity is resolved upstream (gateway or auth proxy) and forwarded in the
//! `X-User-Id` header as a decimal Snowflake.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use engage_core::Snowflake;

use crate::response::ApiError;

/// Header carrying the acting user's id
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user performing the request
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Snowflake,
}

impl Actor {
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

fn actor_from_parts(parts: &Parts) -> Result<Option<Actor>, ApiError> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let user_id = value
        .to_str()
        .ok()
        .and_then(|raw| raw.parse::<Snowflake>().ok())
        .ok_or_else(|| {
            tracing::warn!("Malformed X-User-Id header");
            ApiError::InvalidActor
        })?;

    Ok(Some(Actor::new(user_id)))
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_parts(parts)?.ok_or(ApiError::MissingActor)
    }
}

/// Optional acting user
///
/// Returns None if the header is absent, or an error if it is malformed.
#[derive(Debug, Clone, Copy)]
pub struct OptionalActor(pub Option<Actor>);

impl OptionalActor {
    pub fn user_id(&self) -> Option<Snowflake> {
        self.0.map(|actor| actor.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalActor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_parts(parts).map(OptionalActor)
    }
}

//! User entity - the identity snapshot the reaction subsystem needs

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub avatar: Option<String>,
}

impl User {
    pub fn new(id: Snowflake, username: String) -> Self {
        Self {
            id,
            username,
            avatar: None,
        }
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

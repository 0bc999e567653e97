//! Reactable content - the closed set of items that carry a cached reaction counter

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// The four kinds of content a user can react to.
///
/// Content-type strings are resolved into this enum once, at the boundary;
/// everything below works with the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Story,
    Poll,
    Comment,
}

impl ContentKind {
    /// Every kind, in the order batch jobs process them
    pub const ALL: [ContentKind; 4] = [Self::Post, Self::Story, Self::Poll, Self::Comment];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Story => "story",
            Self::Poll => "poll",
            Self::Comment => "comment",
        }
    }

    /// Whether toggles on this kind also broadcast an engagement snapshot
    pub fn has_engagement_snapshot(&self) -> bool {
        !matches!(self, Self::Comment)
    }

    /// Whether this kind carries a vote counter
    pub fn has_votes(&self) -> bool {
        matches!(self, Self::Poll)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "post" => Ok(Self::Post),
            "story" => Ok(Self::Story),
            "poll" => Ok(Self::Poll),
            "comment" => Ok(Self::Comment),
            _ => Err(DomainError::InvalidContentType(s.to_string())),
        }
    }
}

/// Address of a single reactable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentRef {
    pub kind: ContentKind,
    pub id: Snowflake,
}

impl ContentRef {
    pub const fn new(kind: ContentKind, id: Snowflake) -> Self {
        Self { kind, id }
    }

    pub const fn post(id: Snowflake) -> Self {
        Self::new(ContentKind::Post, id)
    }

    pub const fn story(id: Snowflake) -> Self {
        Self::new(ContentKind::Story, id)
    }

    pub const fn poll(id: Snowflake) -> Self {
        Self::new(ContentKind::Poll, id)
    }

    pub const fn comment(id: Snowflake) -> Self {
        Self::new(ContentKind::Comment, id)
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Publication state of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Published,
    Draft,
    Archived,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Archived => "archived",
        }
    }

    /// Parse the stored representation; unknown values are treated as drafts
    pub fn from_db(value: &str) -> Self {
        match value {
            "published" => Self::Published,
            "archived" => Self::Archived,
            _ => Self::Draft,
        }
    }
}

/// Read model of a reactable item, as far as the counter subsystem cares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub target: ContentRef,
    pub owner_id: Snowflake,
    pub status: ContentStatus,
    pub reactions_count: i64,
    pub comments_count: i64,
    /// Only polls carry votes
    pub votes_count: Option<i64>,
}

impl Content {
    /// Create a published item with zeroed counters
    pub fn new(target: ContentRef, owner_id: Snowflake) -> Self {
        Self {
            target,
            owner_id,
            status: ContentStatus::Published,
            reactions_count: 0,
            comments_count: 0,
            votes_count: target.kind.has_votes().then_some(0),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: ContentStatus) -> Self {
        self.status = status;
        self
    }

    /// Stories only take reactions once published; everything else always does
    pub fn accepts_reactions(&self) -> bool {
        match self.target.kind {
            ContentKind::Story => self.status == ContentStatus::Published,
            _ => true,
        }
    }

    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Engagement snapshot using `reactions_count` as the authoritative reaction total
    pub fn engagement(&self, reactions_count: i64) -> EngagementSnapshot {
        EngagementSnapshot {
            target: self.target,
            reactions_count,
            comments_count: self.comments_count,
            votes_count: self.votes_count,
        }
    }
}

/// Aggregate engagement counters pushed to clients after a toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementSnapshot {
    pub target: ContentRef,
    pub reactions_count: i64,
    pub comments_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes_count: Option<i64>,
}

//! Shared fixtures: a service context over the in-memory store

#![allow(dead_code)]

use std::sync::Arc;

use engage_cache::RecordingPublisher;
use engage_core::{Content, ContentRef, ContentStatus, Snowflake, SnowflakeGenerator, User};
use engage_db::MemoryStore;
use engage_service::{ServiceContext, ServiceContextBuilder};

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub publisher: Arc<RecordingPublisher>,
    pub ctx: ServiceContext,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let publisher = Arc::new(RecordingPublisher::new());

        let ctx = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .content_repo(store.clone())
            .reaction_repo(store.clone())
            .notification_repo(store.clone())
            .publisher(publisher.clone())
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .expect("all dependencies provided");

        Self {
            store,
            publisher,
            ctx,
        }
    }

    pub fn user(&self, id: i64, name: &str) -> User {
        let user = User::new(Snowflake::new(id), name.to_string());
        self.store.insert_user(user.clone());
        user
    }

    pub fn content(&self, target: ContentRef, owner: &User) -> ContentRef {
        self.store.insert_content(Content::new(target, owner.id));
        target
    }

    pub fn draft_story(&self, id: i64, owner: &User) -> ContentRef {
        let target = ContentRef::story(Snowflake::new(id));
        self.store
            .insert_content(Content::new(target, owner.id).with_status(ContentStatus::Draft));
        target
    }

    pub fn cached(&self, target: ContentRef) -> i64 {
        self.store
            .reactions_count(target)
            .expect("content row exists")
    }
}

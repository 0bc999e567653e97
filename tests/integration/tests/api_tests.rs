//! API Integration Tests
//!
//! The server runs over the in-memory store, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use engage_core::{ContentRef, ContentStatus};
use integration_tests::{
    assert_json, assert_status, fixtures::*, reactions_path, TestServer,
};
use reqwest::StatusCode;

async fn expect_error(response: reqwest::Response, status: StatusCode) -> String {
    let body: ErrorEnvelope = assert_json(response, status).await.unwrap();
    assert!(!body.error.message.is_empty());
    body.error.code
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: HealthBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.status, "healthy");
}

#[tokio::test]
async fn test_health_ready_without_backends() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Toggle Tests
// ============================================================================

#[tokio::test]
async fn test_toggle_add_remove_and_switch() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");
    let alice = server.seed_user(unique_id().into_inner(), "alice");
    let post = server.seed_content(ContentRef::post(unique_id()), &owner);
    let path = reactions_path(post);

    let response = server
        .post_as(&path, alice.id, &ToggleRequest::new("like"))
        .await
        .unwrap();
    let added: ToggleBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(added.reaction_added);
    assert_eq!(added.status_code, 201);
    assert_eq!(added.reaction_count, 1);
    let data = added.data.expect("added reaction is returned");
    assert_eq!(data.kind, "like");
    assert_eq!(data.username, "alice");
    assert_eq!(data.content_type, "post");
    assert_eq!(data.content_id, post.id.to_string());
    assert_eq!(data.user_id, alice.id.to_string());

    let response = server
        .post_as(&path, alice.id, &ToggleRequest::new("love"))
        .await
        .unwrap();
    let switched: ToggleBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(switched.reaction_updated);
    assert_eq!(switched.reaction_count, 1);
    assert_eq!(switched.data.map(|r| r.kind).as_deref(), Some("love"));

    let response = server
        .post_as(&path, alice.id, &ToggleRequest::new("love"))
        .await
        .unwrap();
    let removed: ToggleBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(removed.reaction_removed);
    assert!(removed.data.is_none());
    assert_eq!(removed.reaction_count, 0);
    assert_eq!(server.store.reactions_count(post), Some(0));
}

#[tokio::test]
async fn test_toggle_repairs_drifted_counter() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");
    let bob = server.seed_user(unique_id().into_inner(), "bob");
    let post = server.seed_content(ContentRef::post(unique_id()), &owner);
    server.store.force_reactions_count(post, 42);

    let response = server
        .post_as(&reactions_path(post), bob.id, &ToggleRequest::new("wow"))
        .await
        .unwrap();
    let added: ToggleBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(added.reaction_count, 1);
    assert_eq!(server.store.reactions_count(post), Some(1));
}

#[tokio::test]
async fn test_toggle_requires_user_header() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");
    let post = server.seed_content(ContentRef::post(unique_id()), &owner);

    let response = server
        .post(&reactions_path(post), &ToggleRequest::new("like"))
        .await
        .unwrap();
    assert_eq!(
        expect_error(response, StatusCode::UNAUTHORIZED).await,
        "MISSING_USER_ID"
    );
}

#[tokio::test]
async fn test_toggle_rejects_unknown_reaction_type() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");
    let post = server.seed_content(ContentRef::post(unique_id()), &owner);

    let response = server
        .post_as(&reactions_path(post), owner.id, &ToggleRequest::new("meh"))
        .await
        .unwrap();
    assert_eq!(
        expect_error(response, StatusCode::BAD_REQUEST).await,
        "INVALID_REACTION_TYPE"
    );
    assert!(server.store.reaction_rows(post).is_empty());
}

#[tokio::test]
async fn test_toggle_on_unknown_content_type_is_not_found() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");

    let response = server
        .post_as(
            &format!("/api/v1/reactions/video/{}", unique_id()),
            owner.id,
            &ToggleRequest::new("like"),
        )
        .await
        .unwrap();
    assert_eq!(
        expect_error(response, StatusCode::NOT_FOUND).await,
        "UNKNOWN_CONTENT_TYPE"
    );
}

#[tokio::test]
async fn test_toggle_with_malformed_content_id() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");

    let response = server
        .post_as(
            "/api/v1/reactions/post/not-a-number",
            owner.id,
            &ToggleRequest::new("like"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_toggle_on_missing_or_unpublished_content() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");

    let missing = ContentRef::post(unique_id());
    let response = server
        .post_as(&reactions_path(missing), owner.id, &ToggleRequest::new("like"))
        .await
        .unwrap();
    assert_eq!(
        expect_error(response, StatusCode::NOT_FOUND).await,
        "UNKNOWN_CONTENT"
    );

    let story = ContentRef::story(unique_id());
    server.store.insert_content(
        engage_core::Content::new(story, owner.id).with_status(ContentStatus::Draft),
    );
    let response = server
        .post_as(&reactions_path(story), owner.id, &ToggleRequest::new("like"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_toggle_by_unknown_user() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");
    let post = server.seed_content(ContentRef::post(unique_id()), &owner);

    let response = server
        .post_as(&reactions_path(post), unique_id(), &ToggleRequest::new("like"))
        .await
        .unwrap();
    assert_eq!(
        expect_error(response, StatusCode::NOT_FOUND).await,
        "UNKNOWN_USER"
    );
    assert_eq!(server.store.reactions_count(post), Some(0));
}

#[tokio::test]
async fn test_toggle_survives_broadcast_outage() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");
    let carol = server.seed_user(unique_id().into_inner(), "carol");
    let post = server.seed_content(ContentRef::post(unique_id()), &owner);
    server.publisher.set_failing(true);

    let response = server
        .post_as(&reactions_path(post), carol.id, &ToggleRequest::new("laugh"))
        .await
        .unwrap();
    let added: ToggleBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(added.reaction_count, 1);
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_get_reactions_for_content() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");
    let post = server.seed_content(ContentRef::post(unique_id()), &owner);
    let path = reactions_path(post);

    let mut viewers = Vec::new();
    for (name, kind) in [("u1", "like"), ("u2", "like"), ("u3", "sad")] {
        let user = server.seed_user(unique_id().into_inner(), name);
        let response = server
            .post_as(&path, user.id, &ToggleRequest::new(kind))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
        viewers.push(user);
    }

    let response = server.get_as(&path, viewers[2].id).await.unwrap();
    let body: ContentReactionsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.total_count, 3);
    assert_eq!(body.reactions.len(), 3);
    assert_eq!(body.user_reaction.as_deref(), Some("sad"));
    assert_eq!(body.reaction_counts[0].kind, "like");
    assert_eq!(body.reaction_counts[0].count, 2);

    let response = server.get(&format!("{path}?limit=1")).await.unwrap();
    let body: ContentReactionsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.reactions.len(), 1);
    assert_eq!(body.total_count, 3);
    assert!(body.user_reaction.is_none());
}

#[tokio::test]
async fn test_get_reactions_rejects_bad_limit() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");
    let post = server.seed_content(ContentRef::post(unique_id()), &owner);

    let response = server
        .get(&format!("{}?limit=0", reactions_path(post)))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_get_user_reactions_paginates() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");
    let dave = server.seed_user(unique_id().into_inner(), "dave");

    for _ in 0..3 {
        let post = server.seed_content(ContentRef::post(unique_id()), &owner);
        let response = server
            .post_as(&reactions_path(post), dave.id, &ToggleRequest::new("love"))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get(&format!("/api/v1/users/{}/reactions?limit=2", dave.id))
        .await
        .unwrap();
    let page: UserReactionsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.reactions.len(), 2);
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.limit, 2);
    assert_eq!(page.pagination.skip, 0);
    assert!(page.pagination.has_more);

    let response = server
        .get(&format!("/api/v1/users/{}/reactions?limit=2&skip=2", dave.id))
        .await
        .unwrap();
    let page: UserReactionsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.reactions.len(), 1);
    assert!(!page.pagination.has_more);
    assert!(page.reactions.iter().all(|r| r.user_id == dave.id.to_string()));
}

// ============================================================================
// Delete Tests
// ============================================================================

#[tokio::test]
async fn test_delete_reaction() {
    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(unique_id().into_inner(), "owner");
    let erin = server.seed_user(unique_id().into_inner(), "erin");
    let post = server.seed_content(ContentRef::post(unique_id()), &owner);
    let path = reactions_path(post);

    let response = server
        .post_as(&path, erin.id, &ToggleRequest::new("angry"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.delete_as(&path, erin.id).await.unwrap();
    let body: DeleteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.reaction_count, 0);

    let response = server.delete_as(&path, erin.id).await.unwrap();
    assert_eq!(
        expect_error(response, StatusCode::NOT_FOUND).await,
        "UNKNOWN_REACTION"
    );
}

//! Test helpers for integration tests
//!
//! Provides a test server running on an ephemeral port plus HTTP request helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use engage_api::{create_app, AppState};
use engage_cache::RecordingPublisher;
use engage_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, RateLimitConfig,
    RedisConfig, ServerConfig, SnowflakeConfig,
};
use engage_core::{Content, ContentRef, Snowflake, SnowflakeGenerator, User};
use engage_db::MemoryStore;
use engage_service::ServiceContextBuilder;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Header carrying the acting user
pub const USER_HEADER: &str = "X-User-Id";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub publisher: Arc<RecordingPublisher>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server over an empty in-memory store
    pub async fn start() -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        let publisher = Arc::new(RecordingPublisher::new());

        let service_context = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .content_repo(store.clone())
            .reaction_repo(store.clone())
            .notification_repo(store.clone())
            .publisher(publisher.clone())
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(7)))
            .build()?;

        let app = create_app(AppState::new(service_context, test_config()));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            store,
            publisher,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    // === Fixtures ===

    pub fn seed_user(&self, id: i64, username: &str) -> User {
        let user = User::new(Snowflake::new(id), username.to_string());
        self.store.insert_user(user.clone());
        user
    }

    pub fn seed_content(&self, target: ContentRef, owner: &User) -> ContentRef {
        self.store.insert_content(Content::new(target, owner.id));
        target
    }

    // === Requests ===

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request as a user
    pub async fn get_as(&self, path: &str, user_id: Snowflake) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header(USER_HEADER, user_id.to_string())
            .send()
            .await?)
    }

    /// Make a POST request with JSON body and no user header
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request as a user
    pub async fn post_as<T: Serialize>(
        &self,
        path: &str,
        user_id: Snowflake,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header(USER_HEADER, user_id.to_string())
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request as a user
    pub async fn delete_as(&self, path: &str, user_id: Snowflake) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .delete(&url)
            .header(USER_HEADER, user_id.to_string())
            .send()
            .await?)
    }
}

/// Configuration for an in-memory run; the URLs are never dialed
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "engage-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
        },
        redis: RedisConfig {
            url: "redis://unused".to_string(),
            max_connections: 1,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1_000,
            burst: 1_000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        snowflake: SnowflakeConfig { worker_id: 7 },
    }
}

/// Path of the reaction resource for a content item
pub fn reactions_path(target: ContentRef) -> String {
    format!("/api/v1/reactions/{}/{}", target.kind, target.id)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

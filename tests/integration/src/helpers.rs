//! Test helpers for integration tests
//!
//! Spawns test servers and wraps the envelope-aware HTTP calls.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use community_api::{create_app, create_app_state, run_server, spawn_role_seeding};
use community_common::AppConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const TEST_JWT_SECRET: &str = "integration-tests-secret-that-is-long-enough";

/// In-process server; stops when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over a fresh in-memory store with roles seeded
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        spawn_role_seeding(&state).await?;
        let app = create_app(state);

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let _ = run_server(app, listener).await;
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.get(self.url(path)).bearer_auth(token)).await
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        send(self.client.post(self.url(path)).json(body)).await
    }

    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        send(self.client.post(self.url(path)).bearer_auth(token).json(body)).await
    }

    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        send(self.client.patch(self.url(path)).bearer_auth(token).json(body)).await
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.delete(self.url(path)).bearer_auth(token)).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn send(request: RequestBuilder) -> Result<Response> {
    Ok(request.send().await?)
}

/// Configuration for the in-memory backend with rate limiting off
pub fn test_config() -> Result<AppConfig> {
    config_with(&[])
}

/// Test configuration with extra `(key, value)` overrides
pub fn config_with(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let lookup = |key: &str| -> Option<String> {
        if let Some((_, v)) = overrides.iter().find(|(k, _)| *k == key) {
            return Some((*v).to_string());
        }
        match key {
            "DATABASE_URL" => Some("memory".to_string()),
            "JWT_SECRET" => Some(TEST_JWT_SECRET.to_string()),
            "RATE_LIMIT_PER_SECOND" => Some("0".to_string()),
            _ => None,
        }
    };
    AppConfig::from_lookup(lookup).map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Assert the status and return the `content` of a success envelope
pub async fn assert_content(response: Response, expected: StatusCode) -> Result<Value> {
    let body = assert_body(response, expected).await?;
    anyhow::ensure!(body["status"] == true, "Expected a success envelope: {body}");
    Ok(body["content"].clone())
}

/// Assert the status and return the first entry of an error envelope
pub async fn assert_error(response: Response, expected: StatusCode) -> Result<Value> {
    let body = assert_body(response, expected).await?;
    anyhow::ensure!(body["status"] == false, "Expected an error envelope: {body}");
    Ok(body["errors"][0].clone())
}

async fn assert_body(response: Response, expected: StatusCode) -> Result<Value> {
    let status = response.status();
    let body: Value = response.json().await?;
    anyhow::ensure!(
        status == expected,
        "Expected status {expected}, got {status}. Body: {body}"
    );
    Ok(body)
}

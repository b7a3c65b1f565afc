#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde_json::{json, Value};

use orgauth_api::config::AppConfig;
use orgauth_api::database::MemoryStore;
use orgauth_api::{app, AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    /// Serve the router on a free port inside the current test runtime, backed
    /// by a fresh in-memory store so every test starts empty.
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::new(AppConfig::development(), Arc::new(MemoryStore::new()))?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;

        tokio::spawn(async move {
            axum::serve(listener, app(state)).await.ok();
        });

        Ok(Self {
            port,
            base_url,
            client: Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, payload: Value) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/auth/register"))
            .json(&payload)
            .send()
            .await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Register a user with password "password" and return the response body.
    pub async fn register_user(&self, first_name: &str, email: &str) -> Result<Value> {
        let res = self.register(registration(first_name, email)).await?;
        anyhow::ensure!(res.status() == 201, "registration failed: {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn get_authed(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn post_authed(&self, path: &str, token: &str, payload: Value) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?)
    }
}

pub fn registration(first_name: &str, email: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Doe",
        "email": email,
        "password": "password",
        "phone": "1234567890",
    })
}

pub fn token_of(body: &Value) -> String {
    body["data"]["accessToken"].as_str().unwrap_or_default().to_string()
}

pub fn default_org_id(body: &Value) -> String {
    body["data"]["user"]["organisations"][0]["orgId"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

pub fn user_id_of(body: &Value) -> String {
    body["data"]["user"]["userId"].as_str().unwrap_or_default().to_string()
}

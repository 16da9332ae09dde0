//! HTTP backend client
//!
//! `SqlBackend` is the seam every console flow is written against, so flows
//! can be driven in tests without a network. `RestClient` is the production
//! implementation: a thin reqwest wrapper around the backend's REST
//! description endpoint and its `exec_sql` remote procedure.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::libs::config::{ConnectionConfig, ConnectionStatus};
use crate::libs::error::{AdminError, Result};

/// Remote operations the console needs from one backend project.
///
/// Each method is a single request/response round trip; there is no retry,
/// no cancellation, and no request coordination at this layer.
#[async_trait]
pub trait SqlBackend: Send + Sync {
    /// Keys of the `definitions` mapping in the root REST description
    /// document, unfiltered.
    async fn list_definitions(&self) -> Result<Vec<String>>;

    /// Run one SQL statement through the remote-procedure endpoint and
    /// return its decoded result (`Null` when the body is empty).
    async fn execute_sql(&self, sql: &str) -> Result<Value>;

    /// First `limit` rows of a table via the REST row endpoint.
    async fn fetch_rows(&self, table: &str, limit: u32) -> Result<Vec<Value>>;
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    sql: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// reqwest-backed client for one backend project.
pub struct RestClient {
    config: ConnectionConfig,
    http: Client,
}

impl RestClient {
    /// Build a client for the given credentials. Fails on empty fields or a
    /// malformed endpoint URL; no request is made yet.
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AdminError::Network(e.to_string()))?;
        Ok(Self { config, http })
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base(), path)
    }

    /// Attach the two credential headers every management request carries.
    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.config.privileged_key).header(
            "Authorization",
            format!("Bearer {}", self.config.privileged_key),
        )
    }

    /// Probe the root description endpoint and report whether the
    /// credentials reach the project.
    pub async fn check_connection(&self) -> ConnectionStatus {
        match self.list_definitions().await {
            Ok(_) => ConnectionStatus {
                connected: true,
                error: None,
            },
            Err(e) => ConnectionStatus {
                connected: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Turn a non-success response into a `Backend` error, surfacing the body's
/// `message` field when one is present.
async fn failure_message(response: reqwest::Response) -> AdminError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("request failed with status {}", status));
    AdminError::Backend(message)
}

#[async_trait]
impl SqlBackend for RestClient {
    async fn list_definitions(&self) -> Result<Vec<String>> {
        tracing::debug!(endpoint = %self.config.endpoint_url, "fetching schema description");
        let response = self
            .authed(self.http.get(self.rest_url("")))
            .send()
            .await
            .map_err(|e| AdminError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failure_message(response).await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AdminError::InvalidResponse(e.to_string()))?;

        let names = body
            .get("definitions")
            .and_then(Value::as_object)
            .map(|defs| defs.keys().cloned().collect())
            .unwrap_or_default();
        Ok(names)
    }

    async fn execute_sql(&self, sql: &str) -> Result<Value> {
        tracing::debug!(sql = %sql, "dispatching statement");
        let response = self
            .authed(self.http.post(self.rest_url("rpc/exec_sql")))
            .json(&RpcRequest { sql })
            .send()
            .await
            .map_err(|e| AdminError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failure_message(response).await);
        }

        let text = response
            .text()
            .await
            .map_err(|e| AdminError::Network(e.to_string()))?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| AdminError::InvalidResponse(e.to_string()))
    }

    async fn fetch_rows(&self, table: &str, limit: u32) -> Result<Vec<Value>> {
        let limit = limit.to_string();
        let response = self
            .authed(self.http.get(self.rest_url(table)))
            .query(&[("select", "*"), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| AdminError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failure_message(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AdminError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Scripted backend for flow tests: records every statement it is given
    /// and replays canned responses. The statement log is shared so tests
    /// can keep a handle after boxing the backend away.
    pub(crate) struct MockBackend {
        pub definitions: Vec<String>,
        pub execute_result: Value,
        pub execute_error: Option<AdminError>,
        pub rows: Vec<Value>,
        pub executed: Arc<Mutex<Vec<String>>>,
    }

    impl MockBackend {
        pub fn new(definitions: &[&str]) -> Self {
            Self {
                definitions: definitions.iter().map(|s| s.to_string()).collect(),
                execute_result: Value::Null,
                execute_error: None,
                rows: Vec::new(),
                executed: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn failing_execute(definitions: &[&str], error: AdminError) -> Self {
            let mut backend = Self::new(definitions);
            backend.execute_error = Some(error);
            backend
        }

        pub fn statements(&self) -> Vec<String> {
            self.executed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SqlBackend for MockBackend {
        async fn list_definitions(&self) -> Result<Vec<String>> {
            Ok(self.definitions.clone())
        }

        async fn execute_sql(&self, sql: &str) -> Result<Value> {
            self.executed.lock().unwrap().push(sql.to_string());
            match &self.execute_error {
                Some(err) => Err(err.clone()),
                None => Ok(self.execute_result.clone()),
            }
        }

        async fn fetch_rows(&self, _table: &str, limit: u32) -> Result<Vec<Value>> {
            Ok(self.rows.iter().take(limit as usize).cloned().collect())
        }
    }
}

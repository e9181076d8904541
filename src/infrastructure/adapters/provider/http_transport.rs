//! HTTP Transport - 调用上游经文 API
//!
//! 实现 ScriptureTransportPort trait，每个请求携带 `api-key` 头
//!
//! 上游响应格式:
//! GET {base}/bibles/{bibleId}/...
//! Response: {"data": ...}  (JSON)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::{FetchError, ScriptureTransportPort};

/// 认证头名称
const API_KEY_HEADER: &str = "api-key";

/// HTTP 传输配置
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// 上游 API Key
    pub api_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl HttpTransportConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 传输
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
}

impl HttpTransport {
    /// 创建新的 HTTP 传输
    pub fn new(config: HttpTransportConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ScriptureTransportPort for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Network(format!("Request timed out: {}", e))
                } else if e.is_connect() {
                    FetchError::Network(format!("Cannot connect to scripture provider: {}", e))
                } else {
                    FetchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Scripture provider returned error status");
            return Err(FetchError::Provider {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read response body: {}", e)))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn books(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
        match headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
            Some("secret") => Ok(Json(json!({"data": [{"id": "GEN"}]}))),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }

    async fn broken() -> &'static str {
        "<html>not json</html>"
    }

    async fn spawn_provider() -> String {
        let app = Router::new()
            .route("/v1/books", get(books))
            .route("/v1/broken", get(broken));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    #[test]
    fn test_config_builder() {
        let config = HttpTransportConfig::new("key").with_timeout(5);
        assert_eq!(config.api_key, "key");
        assert_eq!(config.timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_sends_api_key_and_decodes_body() {
        let base = spawn_provider().await;
        let transport = HttpTransport::new(HttpTransportConfig::new("secret")).unwrap();

        let body = transport.get_json(&format!("{}/books", base)).await.unwrap();
        assert_eq!(body, json!({"data": [{"id": "GEN"}]}));
    }

    #[tokio::test]
    async fn test_non_success_status_is_provider_error() {
        let base = spawn_provider().await;
        let transport = HttpTransport::new(HttpTransportConfig::new("wrong")).unwrap();

        let err = transport.get_json(&format!("{}/books", base)).await.unwrap_err();
        assert_eq!(err, FetchError::Provider { status: 401 });

        let err = transport.get_json(&format!("{}/missing", base)).await.unwrap_err();
        assert_eq!(err, FetchError::Provider { status: 404 });
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let base = spawn_provider().await;
        let transport = HttpTransport::new(HttpTransportConfig::new("secret")).unwrap();

        let err = transport.get_json(&format!("{}/broken", base)).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}

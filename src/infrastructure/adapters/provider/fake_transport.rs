//! Fake Transport - 脚本化的上游传输
//!
//! 按 URL 返回预设响应并记录调用；未登记的 URL 返回 HTTP 404

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::ports::{FetchError, ScriptureTransportPort};

#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<HashMap<String, Result<Value, FetchError>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记成功响应（完整响应体，含 `data` 信封）
    pub fn with_response(self, url: impl Into<String>, body: Value) -> Self {
        self.set_response(url, Ok(body));
        self
    }

    pub fn with_error(self, url: impl Into<String>, error: FetchError) -> Self {
        self.set_response(url, Err(error));
        self
    }

    pub fn set_response(&self, url: impl Into<String>, response: Result<Value, FetchError>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(url.into(), response);
        }
    }

    /// 按调用顺序返回所有请求过的 URL
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == url).count()
    }
}

#[async_trait]
impl ScriptureTransportPort for FakeTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        tracing::debug!(url = %url, "FakeTransport: returning scripted response");

        let response = match self.responses.lock() {
            Ok(responses) => responses.get(url).cloned(),
            Err(e) => return Err(FetchError::Network(e.to_string())),
        };
        response.unwrap_or(Err(FetchError::Provider { status: 404 }))
    }
}

//! Scripture Transport Port - 上游 HTTP 传输
//!
//! 只负责一次 GET 并把响应体解码为 JSON；缓存与信封拆解在上层完成

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// 上游获取错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// 非成功状态码
    #[error("Provider error: HTTP {status}")]
    Provider { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    /// 响应体不是合法 JSON，或缺少预期结构
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Scripture Transport Port
#[async_trait]
pub trait ScriptureTransportPort: Send + Sync {
    /// GET 指定 URL，返回解码后的完整响应体
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

//! Cached Fetcher - fetch_with_cache
//!
//! 新鲜条目直接返回；否则请求上游，成功时只缓存 `data` 信封内的负载。
//! 非成功状态、网络错误、解码错误都不写缓存，也不重试

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::application::ports::{FetchCachePort, FetchError, ScriptureTransportPort};

pub struct CachedFetcher {
    transport: Arc<dyn ScriptureTransportPort>,
    cache: Arc<dyn FetchCachePort>,
}

impl CachedFetcher {
    pub fn new(transport: Arc<dyn ScriptureTransportPort>, cache: Arc<dyn FetchCachePort>) -> Self {
        Self { transport, cache }
    }

    pub fn cache(&self) -> &Arc<dyn FetchCachePort> {
        &self.cache
    }

    /// 按逻辑资源 key 获取负载
    ///
    /// `key` 必须对同一逻辑资源稳定；它可以与 URL 不同
    pub async fn fetch_with_cache(&self, url: &str, key: &str) -> Result<Arc<Value>, FetchError> {
        if let Some(value) = self.cache.get_fresh(key) {
            return Ok(value);
        }

        tracing::debug!(url = %url, cache_key = %key, "Fetching from scripture provider");
        let body = self.transport.get_json(url).await?;
        let payload = unwrap_envelope(body)?;
        Ok(self.cache.put(key, payload))
    }

    /// 获取并解码为具体类型
    pub async fn fetch_as<T: DeserializeOwned>(&self, url: &str, key: &str) -> Result<T, FetchError> {
        let value = self.fetch_with_cache(url, key).await?;
        T::deserialize(value.as_ref()).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// 拆解 `{ "data": payload }` 信封
fn unwrap_envelope(body: Value) -> Result<Value, FetchError> {
    match body {
        Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| FetchError::Decode("response is missing the data envelope".to_string())),
        other => Err(FetchError::Decode(format!(
            "expected a JSON object envelope, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

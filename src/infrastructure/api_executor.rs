//! API 执行器 - 基础设施层
//!
//! 持有唯一的 HTTP 连接池，只暴露"发请求"的能力

use crate::config::Config;
use crate::context::RequestContext;
use crate::error::{ApiError, AppError};
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

/// API 执行器
///
/// 职责：
/// - 持有唯一的 `reqwest::Client`（内部是连接池，可安全 clone）
/// - 暴露 post_json / put_bytes 能力
/// - 不认识 Assignment / Submission
/// - 不处理业务流程
///
/// 不配置超时：沿用 HTTP 客户端自身的默认行为。
#[derive(Clone)]
pub struct ApiExecutor {
    http: reqwest::Client,
    base_url: String,
}

impl ApiExecutor {
    /// 创建新的 API 执行器
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 获取基础地址
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 向业务端点发送 JSON 请求并返回 JSON 结果
    ///
    /// # 参数
    /// - `endpoint`: `/api/` 下的端点名
    /// - `ctx`: 请求上下文（携带 Bearer 令牌）
    /// - `payload`: 请求体
    ///
    /// # 返回
    /// 返回 JSON 值；非 2xx 响应一律视为硬失败
    pub async fn post_json(
        &self,
        endpoint: &str,
        ctx: &RequestContext,
        payload: &JsonValue,
    ) -> Result<JsonValue> {
        let url = format!("{}/api/{}", self.base_url, endpoint);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&ctx.token)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api(ApiError::BadStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            })
            .into());
        }

        let value = response.json::<JsonValue>().await.map_err(|e| {
            AppError::Api(ApiError::DecodeFailed {
                endpoint: endpoint.to_string(),
                source: e,
            })
        })?;

        debug!("POST {} 成功", url);

        Ok(value)
    }

    /// 发送请求并将响应反序列化为指定类型
    pub async fn post_json_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        ctx: &RequestContext,
        payload: &JsonValue,
    ) -> Result<T> {
        let value = self.post_json(endpoint, ctx, payload).await?;
        let typed = serde_json::from_value(value).map_err(|e| {
            AppError::Api(ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source: e,
            })
        })?;
        Ok(typed)
    }

    /// 向一次性上传地址直传字节
    ///
    /// 2xx 即成功，其余状态码为硬失败；不分片、不断点续传
    pub async fn put_bytes(&self, url: &str, bytes: Vec<u8>) -> Result<()> {
        debug!("PUT {} ({} 字节)", url, bytes.len());

        let response = self
            .http
            .put(url)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api(ApiError::BadStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
                body,
            })
            .into());
        }

        Ok(())
    }
}

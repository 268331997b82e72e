//! 请求上下文
//!
//! 封装"当前是谁在调用"这一信息：认证令牌与用户 ID。
//! 所有后端操作都显式接收一个 `RequestContext`，而不是隐式读取全局状态。

use crate::error::{AppError, AppResult, ConfigError};

/// 请求上下文
///
/// 每次后端调用携带的凭证与操作者信息
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Bearer 认证令牌
    pub token: String,
    /// 当前用户 ID
    pub user_id: String,
}

impl RequestContext {
    /// 创建新的请求上下文
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }

    /// 从环境变量读取上下文（用于命令行工具和联调测试）
    pub fn from_env() -> AppResult<Self> {
        let token = std::env::var("BLACKBOARD_TOKEN").map_err(|_| {
            AppError::Config(ConfigError::EnvVarNotFound {
                var_name: "BLACKBOARD_TOKEN".to_string(),
            })
        })?;
        let user_id = std::env::var("BLACKBOARD_USER_ID").map_err(|_| {
            AppError::Config(ConfigError::EnvVarNotFound {
                var_name: "BLACKBOARD_USER_ID".to_string(),
            })
        })?;
        Ok(Self { token, user_id })
    }
}

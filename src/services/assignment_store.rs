//! 作业列表服务 - 业务能力层
//!
//! 只负责"拉取当前用户可见的作业"能力

use crate::context::RequestContext;
use crate::error::{ApiError, AppError};
use crate::infrastructure::ApiExecutor;
use crate::models::Assignment;
use anyhow::Result;
use serde_json::json;
use tracing::debug;

/// 作业列表服务
pub struct AssignmentStore;

impl AssignmentStore {
    /// 创建新的作业列表服务
    pub fn new() -> Self {
        Self
    }

    /// 拉取当前用户可见的全部作业
    pub async fn load_all(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
    ) -> Result<Vec<Assignment>> {
        let value = executor.post_json("getallhomework", ctx, &json!({})).await?;

        let entries = value
            .get("assignments")
            .cloned()
            .ok_or(AppError::Api(ApiError::MissingField {
                endpoint: "getallhomework".to_string(),
                field: "assignments",
            }))?;

        let assignments: Vec<Assignment> = serde_json::from_value(entries).map_err(|e| {
            AppError::Api(ApiError::JsonParseFailed {
                endpoint: "getallhomework".to_string(),
                source: e,
            })
        })?;

        debug!("共 {} 个作业", assignments.len());

        Ok(assignments)
    }

    /// 在快照中按 ID 查找作业
    pub fn find<'a>(snapshot: &'a [Assignment], assignment_id: &str) -> Option<&'a Assignment> {
        snapshot.iter().find(|a| a.id == assignment_id)
    }
}

impl Default for AssignmentStore {
    fn default() -> Self {
        Self::new()
    }
}

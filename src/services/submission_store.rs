//! 提交列表服务 - 业务能力层
//!
//! 只负责"拉取某个作业的提交快照"能力，不关心流程
//!
//! 后端是唯一权威：任何可能改变列表的写操作之后都必须重新拉取，
//! 本服务从不用写操作的响应去修补内存中的列表。

use crate::context::RequestContext;
use crate::error::{ApiError, AppError};
use crate::infrastructure::ApiExecutor;
use crate::models::submission::{Submission, SubmissionWire};
use anyhow::Result;
use serde_json::json;
use tracing::debug;

/// 提交列表服务
///
/// 职责：
/// - 按作业 ID 拉取全部提交
/// - 保持后端给出的顺序，不做客户端排序/过滤
/// - 不持有任何资源，不缓存
pub struct SubmissionStore;

impl SubmissionStore {
    /// 创建新的提交列表服务
    pub fn new() -> Self {
        Self
    }

    /// 拉取某个作业的全部提交
    ///
    /// # 参数
    /// - `executor`: API 执行器
    /// - `ctx`: 请求上下文
    /// - `assignment_id`: 作业 ID
    ///
    /// # 返回
    /// 返回后端给出顺序的最新快照
    pub async fn load_for_assignment(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        assignment_id: &str,
    ) -> Result<Vec<Submission>> {
        let payload = json!({ "assignment_id": assignment_id });
        let value = executor
            .post_json("get_homework_submissions", ctx, &payload)
            .await?;

        let entries = value
            .get("submissions")
            .and_then(|v| v.as_array())
            .ok_or(AppError::Api(ApiError::MissingField {
                endpoint: "get_homework_submissions".to_string(),
                field: "submissions",
            }))?;

        let mut submissions = Vec::with_capacity(entries.len());
        for entry in entries {
            let wire: SubmissionWire = serde_json::from_value(entry.clone()).map_err(|e| {
                AppError::Api(ApiError::JsonParseFailed {
                    endpoint: "get_homework_submissions".to_string(),
                    source: e,
                })
            })?;
            submissions.push(Submission::from_wire(assignment_id, wire)?);
        }

        debug!("作业 {} 共 {} 份提交", assignment_id, submissions.len());

        Ok(submissions)
    }

    /// 在快照中按唯一标识查找提交
    pub fn find<'a>(snapshot: &'a [Submission], uuid: &str) -> Option<&'a Submission> {
        snapshot.iter().find(|s| s.uuid == uuid)
    }
}

impl Default for SubmissionStore {
    fn default() -> Self {
        Self::new()
    }
}

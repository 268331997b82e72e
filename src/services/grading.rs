//! 批改服务 - 业务能力层
//!
//! 只负责"请求 AI 批改建议"与"落库确认后的成绩"两个能力，不关心流程
//!
//! AI 批改由后端完成：客户端只传文件引用，模型在服务端运行。

use crate::context::RequestContext;
use crate::error::{ApiError, AppError, AppResult, BusinessError, ValidationError};
use crate::infrastructure::ApiExecutor;
use crate::models::proposal::GradingProposal;
use crate::models::submission::{parse_wire_score, Submission};
use anyhow::Result;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info};

/// 批改服务
///
/// 职责：
/// - 发起 AI 批改调用，返回瞬态建议（不改动提交记录）
/// - 按提交唯一标识落库教师确认的分数/反馈
/// - 只处理单份提交
/// - 不出现 Vec<Submission>
/// - 不关心流程顺序
pub struct GradingCoordinator;

impl GradingCoordinator {
    /// 创建新的批改服务
    pub fn new() -> Self {
        Self
    }

    /// 请求 AI 批改建议
    ///
    /// # 参数
    /// - `submission`: 待批改的提交，必须已有存储键
    /// - `grader_file_ref`: 教师参考文件的存储键（可选）
    ///
    /// # 返回
    /// 返回建议的分数与反馈；本调用不改动提交记录本身，
    /// 可重复调用（重新批改），每次的建议由调用方自行覆盖。
    /// 调用失败时提交保持原状。
    pub async fn request_ai_grade(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        submission: &Submission,
        grader_file_ref: Option<&str>,
    ) -> Result<GradingProposal> {
        if submission.storage_key.trim().is_empty() {
            return Err(AppError::Business(BusinessError::MissingSubmissionFile {
                uuid: submission.uuid.clone(),
            })
            .into());
        }

        let mut payload = json!({ "file_url": submission.storage_key });
        if let Some(reference) = grader_file_ref {
            payload["ref_file_url"] = json!(reference);
        }

        debug!("请求 AI 批改提交 {}", submission.uuid);

        let value = executor.post_json("ai_correcting", ctx, &payload).await?;
        let proposal = parse_proposal(&value)?;

        info!(
            "✓ AI 批改建议: 提交 {} 得分 {}",
            submission.uuid, proposal.score
        );

        Ok(proposal)
    }

    /// 落库确认后的成绩
    ///
    /// # 参数
    /// - `submission_uuid`: 提交唯一标识
    /// - `score`: 分数文本（必填）
    /// - `feedback`: 反馈文本（允许为空）
    ///
    /// # 返回
    /// 调用失败时先前已持久化的分数/反馈保持不变
    pub async fn confirm_grade(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        submission_uuid: &str,
        score: &str,
        feedback: &str,
    ) -> Result<()> {
        let score = validate_confirm_score(score)?;

        let payload = json!({
            "uuid": submission_uuid,
            "score": score,
            "feedback": feedback,
        });

        executor
            .post_json("update_homework_score", ctx, &payload)
            .await?;

        info!("✓ 成绩已确认: 提交 {} 得分 {}", submission_uuid, score);

        Ok(())
    }
}

impl Default for GradingCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// 校验确认时的分数输入
///
/// 分数必填且必须是数字；反馈允许为空
pub(crate) fn validate_confirm_score(score: &str) -> AppResult<u32> {
    let trimmed = score.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyScore.into());
    }
    trimmed.parse::<u32>().map_err(|_| {
        ValidationError::InvalidScore {
            value: trimmed.to_string(),
        }
        .into()
    })
}

/// 解析 AI 批改响应
pub(crate) fn parse_proposal(value: &JsonValue) -> AppResult<GradingProposal> {
    let score = value
        .get("score")
        .and_then(parse_wire_score)
        .ok_or(AppError::Api(ApiError::MissingField {
            endpoint: "ai_correcting".to_string(),
            field: "score",
        }))?;
    let feedback = value
        .get("feedback")
        .and_then(|v| v.as_str())
        .ok_or(AppError::Api(ApiError::MissingField {
            endpoint: "ai_correcting".to_string(),
            field: "feedback",
        }))?;
    Ok(GradingProposal {
        score,
        feedback: feedback.to_string(),
    })
}

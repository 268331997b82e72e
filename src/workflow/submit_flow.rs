//! 学生提交流程 - 流程层
//!
//! 核心职责：定义"一次作业提交"的完整流程
//!
//! 流程顺序：
//! 1. 本地校验（说明非空、文件大小/类型） → 不通过绝不发网络请求
//! 2. 申请上传目标 → 直传字节
//! 3. 记录提交（初始为待批改哨兵）
//! 4. 重新拉取提交快照（写后读一致性靠重查，不靠本地修补）

use anyhow::Result;
use serde_json::json;
use tracing::{info, warn};

use crate::config::Config;
use crate::context::RequestContext;
use crate::error::{AppError, ValidationError};
use crate::infrastructure::ApiExecutor;
use crate::models::file::{UploadFile, UploadTarget};
use crate::models::submission::{Submission, UNGRADED_SENTINEL};
use crate::services::{FileTransferAgent, SubmissionStore};
use crate::utils::logging::truncate_text;
use crate::workflow::submit_ctx::SubmitCtx;

/// 学生提交流程
///
/// - 编排完整的提交流程
/// - 不持有任何资源（HTTP 连接池在执行器里）
/// - 只依赖业务能力（services）
pub struct SubmitFlow {
    file_transfer: FileTransferAgent,
    submission_store: SubmissionStore,
    verbose_logging: bool,
}

impl SubmitFlow {
    /// 创建新的提交流程
    pub fn new(config: &Config) -> Self {
        Self {
            file_transfer: FileTransferAgent::new(config),
            submission_store: SubmissionStore::new(),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 执行一次完整提交
    ///
    /// # 参数
    /// - `file`: 待上传的作业文件
    /// - `description`: 作业说明（必填）
    ///
    /// # 返回
    /// 成功后返回重新拉取的提交快照
    pub async fn run(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        submit_ctx: &SubmitCtx,
        file: &UploadFile,
        description: &str,
    ) -> Result<Vec<Submission>> {
        // ========== 第 1 步: 本地校验 ==========
        if description.trim().is_empty() {
            return Err(AppError::Validation(ValidationError::EmptyDescription).into());
        }

        if self.verbose_logging {
            info!(
                "[作业 {}] 提交说明: {}",
                submit_ctx.assignment_index,
                truncate_text(description, 80)
            );
        }

        // ========== 第 2 步: 申请上传目标并直传 ==========
        info!(
            "[作业 {}] 📤 申请上传地址: {}",
            submit_ctx.assignment_index, file.name
        );

        let target = self
            .file_transfer
            .request_upload_target(executor, ctx, file, &submit_ctx.course_id, description)
            .await?;

        self.file_transfer.upload(executor, &target, file).await?;

        // ========== 第 3 步: 记录提交 ==========
        let date = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();

        if let Err(e) = self
            .record_submission(executor, ctx, submit_ctx, file, &target, &date, description)
            .await
        {
            // 字节已经传上去了，记录失败会留下孤儿文件；没有补偿删除可用
            warn!(
                "[作业 {}] ⚠️ 提交记录失败，存储键 {} 成为孤儿文件",
                submit_ctx.assignment_index, target.storage_key
            );
            return Err(e);
        }

        info!("[作业 {}] ✓ 作业提交成功", submit_ctx.assignment_index);

        // ========== 第 4 步: 重新拉取快照 ==========
        let snapshot = self
            .submission_store
            .load_for_assignment(executor, ctx, &submit_ctx.assignment_id)
            .await?;

        Ok(snapshot)
    }

    /// 把已上传的文件记录为一份提交
    async fn record_submission(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        submit_ctx: &SubmitCtx,
        file: &UploadFile,
        target: &UploadTarget,
        date: &str,
        description: &str,
    ) -> Result<()> {
        let payload = json!({
            "assignment_id": submit_ctx.assignment_id,
            "user_id": ctx.user_id,
            "file": file.name,
            "file_url": target.storage_key,
            "date": date,
            "score": UNGRADED_SENTINEL,
            "feedback": UNGRADED_SENTINEL,
            "description": description,
        });

        executor.post_json("submit_homework", ctx, &payload).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn empty_description_fails_before_any_network_call() {
        // 基础地址指向保留地址，真发请求会立即失败；
        // 校验必须在此之前拦截
        let config = Config {
            api_base_url: "http://192.0.2.1".to_string(),
            ..Config::default()
        };
        let executor = ApiExecutor::new(&config);
        let flow = SubmitFlow::new(&config);
        let ctx = RequestContext::new("token", "stu-1");
        let submit_ctx = SubmitCtx::new("hw-1", "course-1", 1);
        let file = UploadFile::new("report.pdf", vec![0u8; 1024]);

        let err = tokio_test::block_on(flow.run(&executor, &ctx, &submit_ctx, &file, "   "))
            .unwrap_err();
        let err = err.downcast::<AppError>().unwrap();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::EmptyDescription)
        ));
    }

    #[test]
    fn oversized_file_fails_before_any_network_call() {
        let config = Config {
            api_base_url: "http://192.0.2.1".to_string(),
            ..Config::default()
        };
        let executor = ApiExecutor::new(&config);
        let flow = SubmitFlow::new(&config);
        let ctx = RequestContext::new("token", "stu-1");
        let submit_ctx = SubmitCtx::new("hw-1", "course-1", 1);
        let file = UploadFile::new("big.zip", vec![0u8; 20 * 1024 * 1024 + 1]);

        let err =
            tokio_test::block_on(flow.run(&executor, &ctx, &submit_ctx, &file, "final report"))
                .unwrap_err();
        let err = err.downcast::<AppError>().unwrap();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::FileTooLarge { .. })
        ));
    }
}
